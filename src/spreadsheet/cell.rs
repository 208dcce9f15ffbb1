use crate::spreadsheet::reference::index_to_reference;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use chrono::TimeDelta;
use iso8601_duration::Duration as IsoDuration;

const MICROS_PER_DAY: i64 = 86_400_000_000;

/// Storage kinds of cell data in spreadsheet files.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum CellType {
    #[default]
    Empty,
    /// Boolean values stored as `1` / `0`
    Boolean,
    /// Numeric values
    Number,
    /// Date/time values stored as numbers from 1900 epoch
    NumberDateTime1900,
    /// Date values stored as numbers from 1900 epoch
    NumberDate1900,
    /// Time values stored as numbers from 1900 epoch
    NumberTime1900,
    /// Date/time values stored as numbers from 1904 epoch
    NumberDateTime1904,
    /// Date values stored as numbers from 1904 epoch
    NumberDate1904,
    /// Time values stored as numbers from 1904 epoch
    NumberTime1904,
    /// ISO 8601 date or date/time strings
    IsoDateTime,
    /// ISO 8601 duration strings (ods time cells)
    IsoDuration,
    /// `HH:MM:SS[.f]` strings (delimited text)
    IsoTime,
    /// Inline string values
    InlineString,
    /// Shared string table references, resolved to text before the cell is stored
    SharedString,
    /// Error values
    Error,
}

impl CellType {
    /// Parses built-in Excel number format IDs to determine cell type.
    pub(crate) fn parse_builtin_number_format_id(id: &str, is_1904: bool) -> Option<Self> {
        match id {
            "22" => Some(if is_1904 { Self::NumberDateTime1904 } else { Self::NumberDateTime1900 }),
            "14" | "15" | "16" | "17" => Some(if is_1904 { Self::NumberDate1904 } else { Self::NumberDate1900 }),
            "18" | "19" | "20" | "21" | "45" | "46" | "47" => Some(if is_1904 { Self::NumberTime1904 } else { Self::NumberTime1900 }),
            _ => None,
        }
    }

    /// Parses custom number format strings to determine cell type.
    /// Quoted literals, escapes and bracketed sections (colors, conditions) are skipped.
    pub(crate) fn parse_custom_number_format(format: &str, is_1904: bool) -> Self {
        let mut is_escaped = false;
        let mut is_literal = false;
        let mut is_date = false;
        let mut is_time = false;
        let mut is_bracket = false;
        for character in format.chars() {
            match character {
                _ if is_escaped => is_escaped = false,
                '_' | '\\' => is_escaped = true,

                '"' if is_literal => is_literal = false,
                '"' if !is_bracket => is_literal = true,

                ']' if is_bracket => is_bracket = false,
                '[' if !is_literal => is_bracket = true,
                _ if is_literal || is_bracket => (),

                'Y' | 'y' | 'D' | 'd' => is_date = true,
                'H' | 'h' | 'S' | 's' => is_time = true,
                _ => (),
            }
        }

        match (is_date, is_time, is_1904) {
            (true, true, false) => Self::NumberDateTime1900,
            (true, true, true) => Self::NumberDateTime1904,
            (true, false, false) => Self::NumberDate1900,
            (true, false, true) => Self::NumberDate1904,
            (false, true, false) => Self::NumberTime1900,
            (false, true, true) => Self::NumberTime1904,
            (false, false, _) => Self::Number,
        }
    }

    fn is_1904(&self) -> bool {
        matches!(self, Self::NumberDateTime1904 | Self::NumberDate1904 | Self::NumberTime1904)
    }

    /// True for numbers carrying a date or time number format.
    pub(crate) fn is_serial(&self) -> bool {
        matches!(
            self,
            Self::NumberDateTime1900 | Self::NumberDate1900 | Self::NumberTime1900 |
            Self::NumberDateTime1904 | Self::NumberDate1904 | Self::NumberTime1904
        )
    }
}

/// Represents a single cell in a spreadsheet with position, type, and raw value.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    /// Row index (0-based)
    pub(crate) row: usize,
    /// Column index (0-based)
    pub(crate) col: usize,
    /// Storage kind
    pub(crate) kind: CellType,
    /// Raw value as stored in the file
    pub(crate) value: String,
}

impl Cell {
    /// Returns the Excel-style cell reference (e.g., "A1", "B2").
    pub(crate) fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }

    pub(crate) fn to_boolean(&self) -> bool {
        self.value == "1"
    }

    /// True when the numeric value is written without fractional digits and fits an `i64` exactly.
    /// A decimal point always means a float, so `5.0` stays a float.
    pub(crate) fn is_integer(&self) -> bool {
        if self.value.contains('.') {
            return false;
        }
        self.value.parse::<i64>().is_ok()
            || self.value
                .parse::<f64>()
                .map(|number| number.is_finite() && number.fract() == 0.0 && number.abs() < 9.007_199_254_740_992e15)
                .unwrap_or(false)
    }

    pub(crate) fn to_bigint(&self) -> Result<i64, String> {
        if let Ok(integer) = self.value.parse::<i64>() {
            return Ok(integer);
        }
        match self.value.parse::<f64>() {
            Ok(number) if number.is_finite() && number.fract() == 0.0 && number.abs() < 9.007_199_254_740_992e15 => Ok(number as i64),
            _ => Err(format!("parse '{}' to integer failed", self.value)),
        }
    }

    pub(crate) fn to_double(&self) -> Result<f64, String> {
        self.value.parse::<f64>().map_err(|_| format!("parse '{}' to float failed", self.value))
    }

    pub(crate) fn to_date(&self) -> Result<NaiveDate, String> {
        match self.kind {
            kind if kind.is_serial() => Ok(self.to_datetime()?.date()),
            CellType::IsoDateTime => Ok(self.to_datetime()?.date()),
            _ => Err(format!("parse '{}' to date failed", self.value)),
        }
    }

    pub(crate) fn to_time(&self) -> Result<NaiveTime, String> {
        match self.kind {
            kind if kind.is_serial() => {
                let fraction = self.to_double()?.fract().abs();
                let micros = ((fraction * MICROS_PER_DAY as f64).round() as i64).rem_euclid(MICROS_PER_DAY);
                Ok(time_from_micros(micros))
            }
            CellType::IsoDateTime => Ok(self.to_datetime()?.time()),
            CellType::IsoDuration => {
                let duration = self.value
                    .parse::<IsoDuration>()
                    .map_err(|_| format!("parse '{}' to iso8601 duration failed", self.value))?;
                let seconds = duration.hour as f64 * 3600.0 + duration.minute as f64 * 60.0 + duration.second as f64;
                let micros = ((seconds * 1_000_000.0).round() as i64).rem_euclid(MICROS_PER_DAY);
                Ok(time_from_micros(micros))
            }
            CellType::IsoTime => NaiveTime::parse_from_str(&self.value, "%H:%M:%S%.f")
                .map_err(|_| format!("parse '{}' to time failed", self.value)),
            _ => Err(format!("parse '{}' to time failed", self.value)),
        }
    }

    pub(crate) fn to_datetime(&self) -> Result<NaiveDateTime, String> {
        match self.kind {
            kind if kind.is_serial() => {
                let serial = self.to_double()?;
                let total = (serial * MICROS_PER_DAY as f64).round() as i64;
                let date = date_from_serial(total.div_euclid(MICROS_PER_DAY), kind.is_1904())
                    .ok_or_else(|| format!("serial '{}' is out of the date range", self.value))?;
                Ok(date.and_time(time_from_micros(total.rem_euclid(MICROS_PER_DAY))))
            }
            CellType::IsoDateTime => {
                if self.value.contains('T') {
                    NaiveDateTime::parse_from_str(&self.value, "%Y-%m-%dT%H:%M:%S%.f")
                        .map_err(|_| format!("parse '{}' to datetime failed", self.value))
                } else {
                    NaiveDate::parse_from_str(&self.value, "%Y-%m-%d")
                        .map_err(|_| format!("parse '{}' to date failed", self.value))
                        .map(|date| date.and_time(NaiveTime::MIN))
                }
            }
            _ => Err(format!("parse '{}' to datetime failed", self.value)),
        }
    }
}

/// Converts an Excel day serial into a calendar date.
/// The 1900 system counts the nonexistent 1900-02-29 (Lotus 1-2-3 leap year bug).
/// `None` when the serial falls outside the representable calendar.
fn date_from_serial(days: i64, is_1904: bool) -> Option<NaiveDate> {
    let offset = if is_1904 {
        1462
    } else if days < 60 {
        1
    } else {
        0
    };
    let delta = TimeDelta::try_days(days.checked_add(offset)?)?;
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("NaiveDate Literal").checked_add_signed(delta)
}

fn time_from_micros(micros: i64) -> NaiveTime {
    let seconds = (micros / 1_000_000) as u32;
    let nanos = ((micros % 1_000_000) * 1_000) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos).unwrap_or(NaiveTime::MIN)
}
