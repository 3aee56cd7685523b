//! Auto-typed CSV loading.
//!
//! Column types are inferred by Arrow's CSV reader from the field text:
//! integer literals become `Int64`, decimal literals `Float64`,
//! `YYYY-MM-DD` strings `Date32`, ISO date-times `Timestamp`,
//! `true`/`false` `Boolean`, and anything else stays `Utf8`. Empty fields
//! are read as nulls.
//!
//! A single odd field (a `***` missing marker, say) turns a whole column
//! into `Utf8`. Reading such a column back types every cell on its own, so
//! the numbers and dates around the marker survive.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use tracing::debug;

use super::{DatasetBuilder, TabularDataset};
use crate::error::Result;

/// Parse CSV text with a header row into a dataset.
///
/// # Errors
///
/// Returns [`Error::Arrow`](crate::Error::Arrow) if the text is not valid
/// CSV or a row does not match the inferred schema.
pub fn read_csv(bytes: &[u8]) -> Result<TabularDataset> {
    let format = Format::default().with_header(true);
    let (schema, records) = format.infer_schema(Cursor::new(bytes), None)?;
    let schema = Arc::new(schema);

    let reader =
        ReaderBuilder::new(Arc::clone(&schema)).with_header(true).build(Cursor::new(bytes))?;
    let batches = reader.collect::<std::result::Result<Vec<RecordBatch>, ArrowError>>()?;

    debug!(records, fields = schema.fields().len(), "parsed CSV");
    DatasetBuilder::new().batches(&schema, &batches)?.build()
}

/// Read a CSV file and parse it into a dataset.
///
/// The file read is the only suspension point. A missing file surfaces as
/// [`Error::Io`](crate::Error::Io) with kind `NotFound`.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or an Arrow error if it
/// cannot be parsed.
pub async fn load_csv(path: impl AsRef<Path>) -> Result<TabularDataset> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let data = read_csv(&bytes)?;

    debug!(
        path = %path.display(),
        rows = data.num_rows(),
        columns = data.num_columns(),
        "loaded CSV"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Value;
    use crate::error::Error;
    use arrow::datatypes::DataType;
    use chrono::NaiveDate;

    #[test]
    fn test_read_csv_infers_types() {
        let csv = b"Date,Anomaly,Station\n1900-01-01,-0.2,north\n1950-06-15,0.1,south\n";
        let data = read_csv(csv).unwrap();

        assert_eq!(data.num_rows(), 2);
        assert_eq!(data.column("Date").unwrap().data_type(), &DataType::Date32);
        assert_eq!(data.column("Anomaly").unwrap().data_type(), &DataType::Float64);
        assert_eq!(data.column("Station").unwrap().data_type(), &DataType::Utf8);

        let dates = data.column("Date").unwrap().values().unwrap();
        assert_eq!(dates[1], Value::Date(NaiveDate::from_ymd_opt(1950, 6, 15).unwrap()));

        let anomalies = data.column("Anomaly").unwrap().values().unwrap();
        assert_eq!(anomalies, vec![Value::Float(-0.2), Value::Float(0.1)]);
    }

    #[test]
    fn test_read_csv_iso_datetimes_are_dates() {
        let data = read_csv(b"Date,Anomaly\n1900-01-01T00:00:00,-0.2\n1950-06-15T12:30:00,0.1\n")
            .unwrap();

        let dates = data.column("Date").unwrap();
        assert!(matches!(dates.data_type(), DataType::Timestamp(_, _)));
        assert_eq!(
            dates.values().unwrap(),
            vec![
                Value::Date(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()),
                Value::Date(NaiveDate::from_ymd_opt(1950, 6, 15).unwrap()),
            ]
        );
    }

    #[test]
    fn test_read_csv_mixed_column_typed_per_field() {
        let data = read_csv(b"Date,Anomaly\n1900-01-01,-0.2\n1901-01-01,***\n1902-01-01,0.4\n")
            .unwrap();

        let anomalies = data.column("Anomaly").unwrap();
        assert_eq!(anomalies.data_type(), &DataType::Utf8);
        assert_eq!(
            anomalies.values().unwrap(),
            vec![Value::Float(-0.2), Value::from("***"), Value::Float(0.4)]
        );
    }

    #[test]
    fn test_read_csv_integers() {
        let data = read_csv(b"id,age\n1,35\n2,25\n").unwrap();
        assert_eq!(data.column("age").unwrap().data_type(), &DataType::Int64);
    }

    #[test]
    fn test_read_csv_header_only() {
        let data = read_csv(b"Date,Anomaly\n").unwrap();
        assert_eq!(data.num_rows(), 0);
        assert!(data.has_column("Date"));
        assert!(data.has_column("Anomaly"));
    }

    #[test]
    fn test_read_csv_ragged_row_fails() {
        let result = read_csv(b"a,b\n1,2\n3\n");
        assert!(matches!(result, Err(Error::Arrow(_))));
    }
}
