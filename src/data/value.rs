//! Scalar cell values read back out of Arrow columns.

use std::fmt;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, PrimitiveArray};
use arrow::compute::cast;
use arrow::datatypes::{
    ArrowTimestampType, DataType, Date32Type, Float64Type, Int64Type, TimeUnit,
    TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
    TimestampSecondType,
};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const UNIX_EPOCH_FROM_CE: i32 = 719_163;

/// A single cell of a [`TabularDataset`](super::TabularDataset).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer value.
    Int(i64),
    /// A floating point value.
    Float(f64),
    /// A text value.
    Text(String),
    /// A calendar date.
    Date(NaiveDate),
    /// A boolean value.
    Bool(bool),
    /// A missing value.
    Null,
}

impl Value {
    /// Numeric position of the value, or None if it has none.
    ///
    /// Dates map to days since the Unix epoch so that they can share a
    /// continuous scale with numbers.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) if v.is_finite() => Some(*v),
            Value::Date(d) => Some(f64::from(days_from_date(*d))),
            _ => None,
        }
    }

    /// Get as string slice.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get as date.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Type a single text field.
    ///
    /// Blank text is missing, `true` and `false` are booleans, numeric text
    /// is a float (`NaN` included), and ISO 8601 dates, months and
    /// date-times are dates. Anything else stays text.
    ///
    /// ```rust
    /// use tableplot::data::Value;
    ///
    /// assert_eq!(Value::infer("-0.2"), Value::Float(-0.2));
    /// assert_eq!(Value::infer("***"), Value::from("***"));
    /// assert_eq!(Value::infer(" "), Value::Null);
    /// ```
    #[must_use]
    pub fn infer(text: &str) -> Value {
        let text = text.trim();
        match text {
            "" => return Value::Null,
            "true" => return Value::Bool(true),
            "false" => return Value::Bool(false),
            "NaN" => return Value::Float(f64::NAN),
            _ => {}
        }
        // Digits are required so that `inf` and `nan` stay text.
        if text.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(number) = text.parse::<f64>() {
                return Value::Float(number);
            }
            if let Some(date) = parse_iso_date(text) {
                return Value::Date(date);
            }
        }
        Value::Text(text.to_string())
    }

    /// Check for a missing value.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => Ok(()),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Days since 1970-01-01, the Arrow `Date32` representation.
#[must_use]
pub fn days_from_date(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_FROM_CE
}

/// Inverse of [`days_from_date`].
#[must_use]
pub fn date_from_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_FROM_CE)?)
}

/// Read every cell of an Arrow array as [`Value`]s.
///
/// Integer and float columns widen to 64 bits and timestamps keep their
/// calendar date. Text cells are typed one at a time with
/// [`Value::infer`], so a column holding a few non-numeric markers still
/// yields numbers for the remaining rows.
pub(crate) fn array_values(column: &str, array: &ArrayRef) -> Result<Vec<Value>> {
    let array = match array.data_type() {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => cast(array.as_ref(), &DataType::Int64)?,
        DataType::Float16 | DataType::Float32 => cast(array.as_ref(), &DataType::Float64)?,
        DataType::Date64 => cast(array.as_ref(), &DataType::Date32)?,
        _ => Arc::clone(array),
    };

    let n = array.len();
    let values = match array.data_type() {
        DataType::Int64 => {
            let a = array.as_primitive::<Int64Type>();
            (0..n).map(|i| cell(a, i, |a, i| Value::Int(a.value(i)))).collect()
        }
        DataType::Float64 => {
            let a = array.as_primitive::<Float64Type>();
            (0..n).map(|i| cell(a, i, |a, i| Value::Float(a.value(i)))).collect()
        }
        DataType::Utf8 => {
            let a = array.as_string::<i32>();
            (0..n).map(|i| cell(a, i, |a, i| Value::infer(a.value(i)))).collect()
        }
        DataType::LargeUtf8 => {
            let a = array.as_string::<i64>();
            (0..n).map(|i| cell(a, i, |a, i| Value::infer(a.value(i)))).collect()
        }
        DataType::Boolean => {
            let a = array.as_boolean();
            (0..n).map(|i| cell(a, i, |a, i| Value::Bool(a.value(i)))).collect()
        }
        DataType::Date32 => {
            let a = array.as_primitive::<Date32Type>();
            (0..n)
                .map(|i| cell(a, i, |a, i| a.value_as_date(i).map_or(Value::Null, Value::Date)))
                .collect()
        }
        DataType::Timestamp(TimeUnit::Second, _) => {
            timestamp_dates(array.as_primitive::<TimestampSecondType>())
        }
        DataType::Timestamp(TimeUnit::Millisecond, _) => {
            timestamp_dates(array.as_primitive::<TimestampMillisecondType>())
        }
        DataType::Timestamp(TimeUnit::Microsecond, _) => {
            timestamp_dates(array.as_primitive::<TimestampMicrosecondType>())
        }
        DataType::Timestamp(TimeUnit::Nanosecond, _) => {
            timestamp_dates(array.as_primitive::<TimestampNanosecondType>())
        }
        DataType::Null => vec![Value::Null; n],
        other => {
            return Err(Error::UnsupportedType {
                column: column.to_string(),
                data_type: other.clone(),
            })
        }
    };

    Ok(values)
}

/// Null-aware read of a single cell.
fn cell<A: Array>(array: &A, index: usize, read: impl Fn(&A, usize) -> Value) -> Value {
    if array.is_null(index) {
        Value::Null
    } else {
        read(array, index)
    }
}

/// Calendar dates of a timestamp column, read in UTC.
fn timestamp_dates<T: ArrowTimestampType>(array: &PrimitiveArray<T>) -> Vec<Value> {
    (0..array.len())
        .map(|i| {
            cell(array, i, |a, i| {
                a.value_as_datetime(i).map_or(Value::Null, |datetime| Value::Date(datetime.date()))
            })
        })
        .collect()
}

/// Parse an ISO 8601 date, month or date-time, keeping the calendar date.
fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.naive_utc().date());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|datetime| datetime.date())
}
