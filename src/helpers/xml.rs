//! Event-driven XML reading for the zipped workbook formats (xlsx and ods).

use crate::error::InspectError;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::BytesRef;
use quick_xml::events::BytesStart;
use quick_xml::events::BytesText;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;
use std::io::BufRead;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while decoding XML parts of a workbook.
#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Unknown XML entity '&{0};'")]
    ParseEntityError(String),

    #[error("Parse attribute value '{0}' failed")]
    ParseAttributeValueError(String),
}

/// Streaming XML reader that reuses one event buffer for the whole part.
pub(crate) struct XmlReader<R: BufRead> {
    reader: Reader<R>,
    buffer: Vec<u8>,
}

impl<R: BufRead> XmlReader<R> {
    pub(crate) fn new(buf_reader: R) -> XmlReader<R> {
        let mut reader = Reader::from_reader(buf_reader);
        let config = reader.config_mut();
        config.check_comments = false;
        config.check_end_names = false;
        // `<c/>` and `<c></c>` must produce the same Start/End pair for the cell loops.
        config.expand_empty_elements = true;
        config.trim_text(false);

        XmlReader {
            reader,
            buffer: Vec::with_capacity(1024),
        }
    }

    /// Reads the next event, or `None` at end of document.
    pub(crate) fn next(&'_ mut self) -> Result<Option<Event<'_>>, InspectError> {
        self.buffer.clear();
        match self.reader.read_event_into(&mut self.buffer) {
            Ok(Event::Eof) => Ok(None),
            Ok(event) => Ok(Some(event)),
            Err(error) => Err(InspectError::XmlError(error)),
        }
    }
}

pub(crate) trait XmlAttributeHelper<'a> {
    /// Unescaped attribute value.
    fn get_value(&self) -> Result<Cow<'a, str>, InspectError>;

    fn parse_value<T: FromStr>(&self) -> Result<T, InspectError>;
}

impl<'a> XmlAttributeHelper<'a> for Attribute<'a> {
    fn get_value(&self) -> Result<Cow<'a, str>, InspectError> {
        Ok(self.unescape_value()?)
    }

    fn parse_value<T: FromStr>(&self) -> Result<T, InspectError> {
        self.get_value()?
            .parse()
            .map_err(|_| match std::str::from_utf8(&self.value) {
                Ok(value) => InspectError::XmlHelperError(XmlError::ParseAttributeValueError(value.to_string())),
                Err(error) => InspectError::StringEncodingError(error),
            })
    }
}

pub(crate) trait XmlNodeHelper<'a> {
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, InspectError>;

    fn parse_attribute_value<T: FromStr>(&self, name: &str) -> Result<Option<T>, InspectError>;
}

impl<'a> XmlNodeHelper<'a> for BytesStart<'a> {
    fn get_attribute_value(&'a self, name: &str) -> Result<Option<Cow<'a, str>>, InspectError> {
        self.try_get_attribute(name)?
            .map(|attribute| attribute.get_value())
            .transpose()
    }

    fn parse_attribute_value<T: FromStr>(&self, name: &str) -> Result<Option<T>, InspectError> {
        self.try_get_attribute(name)?
            .map(|attribute| attribute.parse_value())
            .transpose()
    }
}

/// Accumulates decoded character data into a `String`.
pub(crate) trait XmlTextContextHelper {
    fn push_bytes_text(&mut self, text: &BytesText) -> Result<(), InspectError>;

    /// Appends an entity or character reference such as `&amp;` or `&#x41;`.
    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), InspectError>;
}

impl XmlTextContextHelper for String {
    fn push_bytes_text(&mut self, text: &BytesText) -> Result<(), InspectError> {
        self.push_str(&text.xml_content()?);
        Ok(())
    }

    fn push_bytes_ref(&mut self, bytes: &BytesRef) -> Result<(), InspectError> {
        let raw = bytes.xml_content()?;
        if let Some(number) = raw.strip_prefix('#') {
            let code = match number.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16)?,
                None => number.parse::<u32>()?,
            };
            if let Some(character) = char::from_u32(code) {
                self.push(character);
            }
        } else if let Some(entity) = resolve_xml_entity(&raw) {
            self.push_str(entity);
        } else {
            Err(XmlError::ParseEntityError(raw.to_string()))?;
        }
        Ok(())
    }
}

/// Drives an [`XmlReader`] until end of document, dispatching each event to the given arms.
/// Events matched by no arm are ignored; `break` leaves the loop early.
#[macro_export]
macro_rules! match_xml_events {
    ($reader:expr => { $($arms:tt)* }) => {
        while let Some(result) = $reader.next()? {
            match result {
                Event::Eof => break,
                $($arms)*
                _ => (),
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_xml_events;

    fn collect_text(xml: &str) -> Result<String, InspectError> {
        let mut reader = XmlReader::new(xml.as_bytes());
        let mut text = String::new();
        match_xml_events!(reader => {
            Event::Text(event) => text.push_bytes_text(&event)?,
            Event::GeneralRef(event) => text.push_bytes_ref(&event)?,
        });
        Ok(text)
    }

    #[test]
    fn resolves_named_and_numeric_references() {
        let text = collect_text("<t>MCP &amp; MCV &#82;s&#x2E;</t>").unwrap();
        assert_eq!(text, "MCP & MCV Rs.");
    }

    #[test]
    fn rejects_unknown_entities() {
        let error = collect_text("<t>&bogus;</t>").unwrap_err();
        assert!(matches!(error, InspectError::XmlHelperError(XmlError::ParseEntityError(_))));
    }

    #[test]
    fn reads_and_parses_attributes() -> Result<(), InspectError> {
        let mut reader = XmlReader::new(r#"<row r="12" spans="1:8"/>"#.as_bytes());
        let mut row = None;
        let mut spans = None;
        match_xml_events!(reader => {
            Event::Start(event) => {
                row = event.parse_attribute_value::<usize>("r").unwrap();
                spans = event.get_attribute_value("spans").unwrap().map(|it| it.to_string());
            }
        });
        assert_eq!(row, Some(12));
        assert_eq!(spans.as_deref(), Some("1:8"));
        Ok(())
    }
}
