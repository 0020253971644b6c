//! The in-memory table summarized by tabscope.
//!
//! A [`Dataset`] wraps an Arrow [`RecordBatch`] (ordered, named, typed
//! columns) plus an optional [`RowIndex`]. Datasets are cheap to clone: the
//! column buffers are reference counted.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, UInt64Array};
use arrow::compute::{concat_batches, take, take_record_batch};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};

use crate::classify::ColumnKind;
use crate::error::{Result, TabscopeError};

/// Row labels attached to a dataset.
///
/// Without an index, rows are labelled by position (`0..n`).
#[derive(Debug, Clone)]
pub struct RowIndex {
    name: Option<String>,
    values: ArrayRef,
}

impl RowIndex {
    /// Creates an unnamed index.
    pub fn new(values: ArrayRef) -> Self {
        Self { name: None, values }
    }

    /// Creates a named index.
    pub fn named(name: impl Into<String>, values: ArrayRef) -> Self {
        Self {
            name: Some(name.into()),
            values,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn values(&self) -> &ArrayRef {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn data_type(&self) -> &DataType {
        self.values.data_type()
    }

    /// Classification of the index values.
    pub fn kind(&self) -> ColumnKind {
        ColumnKind::of(self.values.data_type())
    }

    /// Returns true when the index holds timestamps or dates.
    pub fn is_datetime(&self) -> bool {
        self.kind() == ColumnKind::Datetime
    }
}

/// An ordered collection of named, typed columns with an optional row index.
#[derive(Debug, Clone)]
pub struct Dataset {
    batch: RecordBatch,
    index: Option<RowIndex>,
}

impl Dataset {
    /// Wraps a record batch without an index.
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch, index: None }
    }

    /// Builds a dataset from a schema and its columns.
    ///
    /// Columns whose lengths or types disagree with the schema are rejected
    /// as invalid input.
    pub fn try_new(schema: SchemaRef, columns: Vec<ArrayRef>) -> Result<Self> {
        let batch = RecordBatch::try_new(schema, columns)
            .map_err(|e| TabscopeError::invalid_input(format!("malformed columns ({e})")))?;
        Ok(Self::new(batch))
    }

    /// Attaches a row index. Its length must match the row count.
    pub fn with_index(mut self, index: RowIndex) -> Result<Self> {
        if index.len() != self.num_rows() {
            return Err(TabscopeError::invalid_input(format!(
                "an index of {} entries for {} rows",
                index.len(),
                self.num_rows()
            )));
        }
        self.index = Some(index);
        Ok(self)
    }

    /// Moves a column out of the data and into the row index.
    pub fn set_index(mut self, column: &str) -> Result<Self> {
        let position = self
            .batch
            .schema()
            .index_of(column)
            .map_err(|_| TabscopeError::column_not_found(column))?;
        let values = self.batch.remove_column(position);
        self.index = Some(RowIndex::named(column, values));
        Ok(self)
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn columns(&self) -> &[ArrayRef] {
        self.batch.columns()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn index(&self) -> Option<&RowIndex> {
        self.index.as_ref()
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Classification of every column, in column order.
    pub fn column_kinds(&self) -> Vec<ColumnKind> {
        crate::classify::classify_schema(&self.batch.schema())
    }

    /// Total size of the column buffers (and index) in bytes.
    pub fn memory_size(&self) -> usize {
        let index_size = self
            .index
            .as_ref()
            .map(|index| index.values.get_array_memory_size())
            .unwrap_or(0);
        self.batch.get_array_memory_size() + index_size
    }

    /// Returns the first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        let len = n.min(self.num_rows());
        Self {
            batch: self.batch.slice(0, len),
            index: self.index.as_ref().map(|index| RowIndex {
                name: index.name.clone(),
                values: index.values.slice(0, len),
            }),
        }
    }

    /// Returns the selected rows, in the given order, with the index carried along.
    pub fn take_rows(&self, rows: &[usize]) -> Result<Self> {
        let indices = positions_array(rows);
        let batch = if self.batch.num_columns() == 0 {
            RecordBatch::try_new_with_options(
                self.batch.schema(),
                vec![],
                &RecordBatchOptions::new().with_row_count(Some(rows.len())),
            )?
        } else {
            take_record_batch(&self.batch, &indices)?
        };
        let index = match &self.index {
            Some(index) => Some(RowIndex {
                name: index.name.clone(),
                values: take(index.values.as_ref(), &indices, None)?,
            }),
            None => None,
        };
        Ok(Self { batch, index })
    }

    /// Selected rows as a batch whose first column holds the row labels.
    ///
    /// The label column is the index when present, otherwise the original row
    /// positions. Used for terminal rendering.
    pub fn labelled_rows(&self, rows: &[usize]) -> Result<RecordBatch> {
        let indices = positions_array(rows);
        let (label_name, labels): (String, ArrayRef) = match &self.index {
            Some(index) => (
                index.name.clone().unwrap_or_default(),
                take(index.values.as_ref(), &indices, None)?,
            ),
            None => (String::new(), Arc::new(indices.clone()) as ArrayRef),
        };

        let mut fields = vec![Arc::new(Field::new(
            label_name,
            labels.data_type().clone(),
            true,
        ))];
        let mut columns = vec![labels];
        for (field, column) in self.batch.schema().fields().iter().zip(self.batch.columns()) {
            fields.push(Arc::clone(field));
            columns.push(take(column.as_ref(), &indices, None)?);
        }
        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
    }
}

fn positions_array(rows: &[usize]) -> UInt64Array {
    UInt64Array::from_iter_values(rows.iter().map(|&row| row as u64))
}

impl From<RecordBatch> for Dataset {
    fn from(batch: RecordBatch) -> Self {
        Self::new(batch)
    }
}

impl TryFrom<Vec<RecordBatch>> for Dataset {
    type Error = TabscopeError;

    fn try_from(batches: Vec<RecordBatch>) -> Result<Self> {
        let Some(first) = batches.first() else {
            return Err(TabscopeError::invalid_input(
                "an empty list of record batches",
            ));
        };
        let schema = first.schema();
        if let Some(other) = batches.iter().find(|b| b.schema() != schema) {
            return Err(TabscopeError::invalid_input(format!(
                "record batches with mismatched schemas ({} vs {})",
                schema,
                other.schema()
            )));
        }
        let batch = concat_batches(&schema, &batches)?;
        Ok(Self::new(batch))
    }
}

impl TryFrom<ArrayRef> for Dataset {
    type Error = TabscopeError;

    /// Only a struct array without null rows is a table; any other array is
    /// rejected with its type named.
    fn try_from(array: ArrayRef) -> Result<Self> {
        match array.as_struct_opt() {
            Some(structs) if structs.null_count() == 0 => {
                Ok(Self::new(RecordBatch::from(structs.clone())))
            }
            Some(structs) => Err(TabscopeError::invalid_input(format!(
                "a Struct array with {} null rows",
                structs.null_count()
            ))),
            None => Err(TabscopeError::invalid_input(format!(
                "a {} array",
                array.data_type()
            ))),
        }
    }
}
