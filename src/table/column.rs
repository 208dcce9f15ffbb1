use crate::error::InspectError;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::SpreadsheetError;
use crate::table::value::Value;
use chrono::NaiveDate;
use std::fmt::Display;

/// Inferred data type of a column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Boolean,
    /// 64-bit signed integers
    Integer,
    /// Double-precision floating point numbers
    Float,
    Text,
    Date,
    Time,
    /// Date and time with microsecond precision
    DateTime,
    /// Values that share no common type; each keeps its own.
    Mixed,
}

/// A labelled, typed column of a [`Table`](crate::table::Table).
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Position in the table
    pub index: usize,
    pub label: String,
    pub kind: ColumnType,
    pub values: Vec<Value>,
}

impl ColumnType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Boolean => "boolean",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
            ColumnType::Date => "date",
            ColumnType::Time => "time",
            ColumnType::DateTime => "datetime",
            ColumnType::Mixed => "mixed",
        }
    }

    /// Infers the type a single cell proposes from its storage kind and value.
    pub(crate) fn from(cell: &Cell) -> Option<Self> {
        match cell.kind {
            CellType::Boolean => Some(ColumnType::Boolean),
            CellType::Number if cell.is_integer() => Some(ColumnType::Integer),
            CellType::Number => Some(ColumnType::Float),
            CellType::NumberDateTime1900 | CellType::NumberDateTime1904 => Some(ColumnType::DateTime),
            CellType::NumberDate1900 | CellType::NumberDate1904 => Some(ColumnType::Date),
            CellType::NumberTime1900 | CellType::NumberTime1904 => Some(ColumnType::Time),
            CellType::IsoDateTime if !cell.value.contains('T') => Some(ColumnType::Date),
            CellType::IsoDateTime => Some(ColumnType::DateTime),
            CellType::IsoDuration | CellType::IsoTime => Some(ColumnType::Time),
            CellType::InlineString | CellType::SharedString => Some(ColumnType::Text),
            CellType::Empty | CellType::Error => None,
        }
    }

    /// Unifies the proposals of a column's non-null cells.
    /// No proposals at all gives [`ColumnType::Text`].
    pub fn detect<I>(types: I) -> ColumnType
    where
        I: IntoIterator<Item = ColumnType>,
    {
        let types: Vec<ColumnType> = types.into_iter().collect();
        if types.is_empty() {
            ColumnType::Text
        } else if types.iter().all(|kind| *kind == ColumnType::Boolean) {
            ColumnType::Boolean
        } else if types.iter().all(|kind| *kind == ColumnType::Integer) {
            ColumnType::Integer
        } else if types.iter().all(|kind| kind.is_numeric()) {
            ColumnType::Float
        } else if types.iter().all(|kind| *kind == ColumnType::Date) {
            ColumnType::Date
        } else if types.iter().all(|kind| *kind == ColumnType::Time) {
            ColumnType::Time
        } else if types.iter().all(|kind| kind.is_temporal()) {
            ColumnType::DateTime
        } else if types.iter().all(|kind| *kind == ColumnType::Text) {
            ColumnType::Text
        } else {
            ColumnType::Mixed
        }
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    #[inline]
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::Date | ColumnType::Time | ColumnType::DateTime)
    }

    #[inline]
    pub fn is_categorical(&self) -> bool {
        matches!(self, ColumnType::Text | ColumnType::Boolean)
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Column {
    /// Builds a column whose type is inferred from its values.
    pub fn new(label: &str, values: Vec<Value>) -> Self {
        let kind = ColumnType::detect(values.iter().filter_map(Value::kind));
        Self {
            index: 0,
            label: label.to_owned(),
            kind,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_null()).count()
    }

    pub fn non_null_count(&self) -> usize {
        self.len() - self.null_count()
    }

    pub fn non_null(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|value| !value.is_null())
    }
}

/// Converts a cell to the value its column type calls for.
/// Cells of a [`ColumnType::Mixed`] column keep their own natural type.
pub(crate) fn to_value(sheet: &Sheet, kind: ColumnType, cell: &Cell) -> Result<Value, InspectError> {
    let mapper = |message: String| {
        SpreadsheetError::CellValueError(
            sheet.file_name.to_owned(),
            sheet.name.to_owned(),
            cell.reference(),
            message,
        )
    };
    let value = match kind {
        ColumnType::Text => Value::Text(cell.value.to_owned()),
        ColumnType::Boolean => Value::Boolean(cell.to_boolean()),
        ColumnType::Integer => Value::Integer(cell.to_bigint().map_err(mapper)?),
        ColumnType::Float => Value::Float(cell.to_double().map_err(mapper)?),
        ColumnType::Date => Value::Date(cell.to_date().map_err(mapper)?),
        ColumnType::Time => Value::Time(cell.to_time().map_err(mapper)?),
        // Time-only cells land on Excel's day zero.
        ColumnType::DateTime if ColumnType::from(cell) == Some(ColumnType::Time) => {
            Value::DateTime(excel_day_zero().and_time(cell.to_time().map_err(mapper)?))
        }
        ColumnType::DateTime => Value::DateTime(cell.to_datetime().map_err(mapper)?),
        ColumnType::Mixed => match ColumnType::from(cell) {
            Some(ColumnType::Mixed) | None => Value::Text(cell.value.to_owned()),
            Some(natural) => to_value(sheet, natural, cell)?,
        },
    };
    Ok(value)
}

fn excel_day_zero() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).expect("NaiveDate Literal")
}
