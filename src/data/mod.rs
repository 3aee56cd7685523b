//! Columnar datasets.
//!
//! A [`TabularDataset`] is a set of named, equal-length columns backed by an
//! Arrow [`RecordBatch`]. Datasets are built with [`DatasetBuilder`], either
//! from in-memory column arrays or from parsed CSV record batches, and read
//! back one column at a time through [`ColumnRef`] handles.
//!
//! # Example
//!
//! ```rust
//! use tableplot::data::TabularDataset;
//!
//! let data = TabularDataset::builder()
//!     .column("id", [1i64, 2, 3])
//!     .column("name", ["Alice", "Bob", "Charlie"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(data.num_rows(), 3);
//! assert_eq!(data.column("name").unwrap().len(), 3);
//! ```

mod builder;
mod csv;
mod value;

pub use builder::{ColumnData, DatasetBuilder};
pub use csv::{load_csv, read_csv};
pub use value::{date_from_days, days_from_date, Value};

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::{DataType, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::error::{Error, Result};

/// A set of named columns with identical row counts.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularDataset {
    batch: RecordBatch,
}

impl TabularDataset {
    /// Start building a dataset.
    #[must_use]
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::new()
    }

    pub(crate) fn from_batch(batch: RecordBatch) -> Self {
        Self { batch }
    }

    /// Get number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Get number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Column names in declaration order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.batch.schema_ref().fields().iter().map(|f| f.name().as_str()).collect()
    }

    /// Check if a column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.batch.column_by_name(name).is_some()
    }

    /// Arrow schema of the dataset.
    #[must_use]
    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    /// Underlying Arrow record batch.
    #[must_use]
    pub fn record_batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Fetch a column handle by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] if no column has that name.
    pub fn column(&self, name: &str) -> Result<ColumnRef> {
        self.batch
            .column_by_name(name)
            .map(|array| ColumnRef { name: name.to_string(), array: ArrayRef::clone(array) })
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }
}

/// Handle to a single named column of a [`TabularDataset`].
///
/// Holds a reference-counted view of the column, so it stays valid after the
/// dataset it came from is dropped.
#[derive(Debug, Clone)]
pub struct ColumnRef {
    name: String,
    array: ArrayRef,
}

impl PartialEq for ColumnRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.array.as_ref() == other.array.as_ref()
    }
}

impl ColumnRef {
    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.array.len()
    }

    /// Check for an empty column.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Arrow data type of the column.
    #[must_use]
    pub fn data_type(&self) -> &DataType {
        self.array.data_type()
    }

    /// Underlying Arrow array.
    #[must_use]
    pub fn array(&self) -> &ArrayRef {
        &self.array
    }

    /// Read the column as scalar values, in row order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] for column types that have no
    /// [`Value`] representation (binary, nested, ...).
    pub fn values(&self) -> Result<Vec<Value>> {
        value::array_values(&self.name, &self.array)
    }
}
