//! Dataset builder shared by in-memory and parsed sources.

use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Date32Array, Float64Array, Int64Array, StringArray};
use arrow::compute::concat_batches;
use arrow::datatypes::{Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use tracing::debug;

use super::value::days_from_date;
use super::TabularDataset;
use crate::error::{Error, Result};

/// Column contents accepted by [`DatasetBuilder::column`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Integer column.
    Int(Vec<i64>),
    /// Floating point column.
    Float(Vec<f64>),
    /// Text column.
    Text(Vec<String>),
    /// Date column.
    Date(Vec<NaiveDate>),
    /// Boolean column.
    Bool(Vec<bool>),
}

impl ColumnData {
    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Date(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
        }
    }

    /// Check for an empty column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn into_array(self) -> ArrayRef {
        match self {
            ColumnData::Int(v) => Arc::new(Int64Array::from(v)),
            ColumnData::Float(v) => Arc::new(Float64Array::from(v)),
            ColumnData::Text(v) => Arc::new(StringArray::from(v)),
            ColumnData::Date(v) => {
                Arc::new(Date32Array::from(v.into_iter().map(days_from_date).collect::<Vec<_>>()))
            }
            ColumnData::Bool(v) => Arc::new(BooleanArray::from(v)),
        }
    }
}

impl From<Vec<i64>> for ColumnData {
    fn from(v: Vec<i64>) -> Self {
        ColumnData::Int(v)
    }
}

impl<const N: usize> From<[i64; N]> for ColumnData {
    fn from(v: [i64; N]) -> Self {
        ColumnData::Int(v.to_vec())
    }
}

impl From<Vec<f64>> for ColumnData {
    fn from(v: Vec<f64>) -> Self {
        ColumnData::Float(v)
    }
}

impl<const N: usize> From<[f64; N]> for ColumnData {
    fn from(v: [f64; N]) -> Self {
        ColumnData::Float(v.to_vec())
    }
}

impl From<Vec<String>> for ColumnData {
    fn from(v: Vec<String>) -> Self {
        ColumnData::Text(v)
    }
}

impl From<Vec<&str>> for ColumnData {
    fn from(v: Vec<&str>) -> Self {
        ColumnData::Text(v.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ColumnData {
    fn from(v: [&str; N]) -> Self {
        ColumnData::Text(v.iter().map(|s| (*s).to_string()).collect())
    }
}

impl From<Vec<NaiveDate>> for ColumnData {
    fn from(v: Vec<NaiveDate>) -> Self {
        ColumnData::Date(v)
    }
}

impl From<Vec<bool>> for ColumnData {
    fn from(v: Vec<bool>) -> Self {
        ColumnData::Bool(v)
    }
}

/// Builder for [`TabularDataset`].
///
/// Columns are collected in order from any mix of sources and validated
/// together in [`build`](Self::build): every column must have the same row
/// count and names must be unique.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    columns: Vec<(String, ArrayRef)>,
}

impl DatasetBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column from in-memory values.
    #[must_use]
    pub fn column(self, name: impl Into<String>, data: impl Into<ColumnData>) -> Self {
        self.array(name, data.into().into_array())
    }

    /// Add a column from an existing Arrow array.
    #[must_use]
    pub fn array(mut self, name: impl Into<String>, array: ArrayRef) -> Self {
        self.columns.push((name.into(), array));
        self
    }

    /// Add every column of a sequence of record batches sharing `schema`.
    ///
    /// The batches are concatenated in order. An empty sequence contributes
    /// the schema's columns with zero rows.
    ///
    /// # Errors
    ///
    /// Returns an Arrow error if a batch does not match `schema`.
    pub fn batches(mut self, schema: &SchemaRef, batches: &[RecordBatch]) -> Result<Self> {
        let combined = concat_batches(schema, batches)?;
        for (field, array) in schema.fields().iter().zip(combined.columns()) {
            self.columns.push((field.name().clone(), ArrayRef::clone(array)));
        }
        Ok(self)
    }

    /// Validate the columns and build the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateColumn`] or [`Error::ColumnLengthMismatch`]
    /// if the columns do not form a table.
    pub fn build(self) -> Result<TabularDataset> {
        let expected = self.columns.first().map_or(0, |(_, array)| array.len());

        let mut seen = HashSet::with_capacity(self.columns.len());
        for (name, array) in &self.columns {
            if !seen.insert(name.as_str()) {
                return Err(Error::DuplicateColumn(name.clone()));
            }
            if array.len() != expected {
                return Err(Error::ColumnLengthMismatch {
                    column: name.clone(),
                    expected,
                    actual: array.len(),
                });
            }
        }

        let fields: Vec<Field> = self
            .columns
            .iter()
            .map(|(name, array)| Field::new(name.as_str(), array.data_type().clone(), true))
            .collect();
        let schema = Arc::new(Schema::new(fields));

        let batch = if self.columns.is_empty() {
            RecordBatch::new_empty(schema)
        } else {
            let arrays = self.columns.into_iter().map(|(_, array)| array).collect();
            RecordBatch::try_new(schema, arrays)?
        };

        debug!(rows = batch.num_rows(), columns = batch.num_columns(), "built dataset");
        Ok(TabularDataset::from_batch(batch))
    }
}
