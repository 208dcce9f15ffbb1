use crate::table::column::ColumnType;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use std::cmp::Ordering;
use std::fmt::Display;

/// One cell of a [`Table`](crate::table::Table) after type conversion.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The column type this value proposes on its own; `None` for nulls.
    pub fn kind(&self) -> Option<ColumnType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(ColumnType::Boolean),
            Value::Integer(_) => Some(ColumnType::Integer),
            Value::Float(_) => Some(ColumnType::Float),
            Value::Text(_) => Some(ColumnType::Text),
            Value::Date(_) => Some(ColumnType::Date),
            Value::Time(_) => Some(ColumnType::Time),
            Value::DateTime(_) => Some(ColumnType::DateTime),
        }
    }

    /// Numeric view used by descriptive statistics.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Text written to a CSV field: floats always carry a decimal point, nulls are empty.
    pub fn to_field(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(value) => value.to_string(),
            Value::Integer(value) => value.to_string(),
            Value::Float(value) => format!("{value:?}"),
            Value::Text(value) => value.to_owned(),
            Value::Date(value) => value.format("%Y-%m-%d").to_string(),
            Value::Time(value) => value.format("%H:%M:%S%.f").to_string(),
            Value::DateTime(value) => value.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
        }
    }

    /// Identity used for distinct-value bookkeeping. `Integer(1)` and `Text("1")` differ.
    pub(crate) fn distinct_key(&self) -> (u8, String) {
        (self.rank(), self.to_field())
    }

    /// Total order: nulls first, then by kind, then by value within a kind.
    /// Integers and floats compare numerically with each other.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Time(a), Value::Time(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Date(a), Value::DateTime(b)) => a.and_time(NaiveTime::MIN).cmp(b),
            (Value::DateTime(a), Value::Date(b)) => a.cmp(&b.and_time(NaiveTime::MIN)),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.rank().cmp(&other.rank()),
            },
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Integer(_) | Value::Float(_) => 2,
            Value::Date(_) | Value::DateTime(_) => 3,
            Value::Time(_) => 4,
            Value::Text(_) => 5,
        }
    }
}

impl Display for Value {
    /// Same text as the CSV field, except nulls read `NaN` in reports.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NaN"),
            _ => write!(f, "{}", self.to_field()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_follow_export_formatting() {
        assert_eq!(Value::Float(5.0).to_field(), "5.0");
        assert_eq!(Value::Float(3.25).to_field(), "3.25");
        assert_eq!(Value::Integer(-12).to_field(), "-12");
        assert_eq!(Value::Boolean(true).to_field(), "true");
        assert_eq!(Value::Null.to_field(), "");
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        assert_eq!(Value::Date(date).to_field(), "2024-04-01");
        let datetime = date.and_hms_micro_opt(6, 30, 0, 250_000).unwrap();
        assert_eq!(Value::DateTime(datetime).to_field(), "2024-04-01 06:30:00.250");
        assert_eq!(Value::DateTime(date.and_hms_opt(6, 30, 0).unwrap()).to_field(), "2024-04-01 06:30:00");
        assert_eq!(Value::Time(NaiveTime::from_hms_opt(23, 15, 0).unwrap()).to_field(), "23:15:00");
    }

    #[test]
    fn numbers_compare_across_integer_and_float() {
        assert_eq!(Value::Integer(2).total_cmp(&Value::Float(2.5)), Ordering::Less);
        assert_eq!(Value::Float(3.0).total_cmp(&Value::Integer(3)), Ordering::Equal);
        assert_eq!(Value::Null.total_cmp(&Value::Integer(0)), Ordering::Less);
        assert_eq!(Value::Text("a".into()).total_cmp(&Value::Integer(9)), Ordering::Greater);
    }

    #[test]
    fn distinct_keys_separate_kinds() {
        assert_ne!(Value::Integer(1).distinct_key(), Value::Text("1".into()).distinct_key());
        assert_eq!(Value::Text("DAM".into()).distinct_key(), Value::Text("DAM".into()).distinct_key());
    }

    #[test]
    fn nulls_display_as_nan() {
        assert_eq!(Value::Null.to_string(), "NaN");
        assert_eq!(Value::Text("RTM".into()).to_string(), "RTM");
    }
}
