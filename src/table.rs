//! Table type for explorar.
//!
//! A [`Table`] is the input to every analysis in this crate: an ordered set
//! of named, equal-length columns backed by Arrow [`RecordBatch`]es. The
//! table itself is never mutated; every analysis returns a fresh derived
//! report.
//!
//! Cell access is normalized in one place. A cell is either present or
//! missing, and both SQL-style nulls and float `NaN` count as missing, so
//! every downstream statistic shares a single definition of "missing".

use std::{path::Path, sync::Arc};

use arrow::{
    array::{
        Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int16Array, Int32Array,
        Int64Array, Int8Array, LargeStringArray, RecordBatch, StringArray, UInt16Array,
        UInt32Array, UInt64Array, UInt8Array,
    },
    datatypes::{DataType, SchemaRef},
    util::display::array_value_to_string,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::{Error, Result};

/// An immutable in-memory table backed by Arrow RecordBatches.
///
/// All batches share one schema; the row count is the sum over batches.
/// Zero-row and zero-column tables are valid.
///
/// # Example
///
/// ```no_run
/// use explorar::Table;
///
/// let table = Table::from_csv("events.csv").unwrap();
/// println!("{} rows, {} columns", table.num_rows(), table.num_columns());
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    batches: Vec<RecordBatch>,
    schema: SchemaRef,
    row_count: usize,
}

impl Table {
    /// Creates a table from a vector of RecordBatches.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The batches vector is empty
    /// - The batches have inconsistent schemas
    pub fn new(batches: Vec<RecordBatch>) -> Result<Self> {
        let Some(first) = batches.first() else {
            return Err(Error::EmptyTable);
        };
        let schema = first.schema();

        for (i, batch) in batches.iter().enumerate().skip(1) {
            if batch.schema() != schema {
                return Err(Error::schema_mismatch(format!(
                    "batch {} has different schema than batch 0",
                    i
                )));
            }
        }

        let row_count = batches.iter().map(|b| b.num_rows()).sum();

        Ok(Self {
            batches,
            schema,
            row_count,
        })
    }

    /// Creates a table from a single RecordBatch.
    ///
    /// # Errors
    ///
    /// Never fails for a single batch; kept fallible for symmetry with
    /// [`Table::new`].
    pub fn from_batch(batch: RecordBatch) -> Result<Self> {
        Self::new(vec![batch])
    }

    /// Loads a table from a CSV file, inferring the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not valid CSV.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_csv_with_options(path, CsvOptions::default())
    }

    /// Loads a table from a CSV file with explicit options.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    pub fn from_csv_with_options(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        use std::io::{BufReader, Seek, SeekFrom};

        use arrow_csv::{reader::Format, ReaderBuilder};

        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
        let mut buf_reader = BufReader::new(file);

        let schema = if let Some(schema) = options.schema {
            Arc::new(schema)
        } else {
            let mut format = Format::default().with_header(options.has_header);
            if let Some(delim) = options.delimiter {
                format = format.with_delimiter(delim);
            }
            let (inferred, _) = format
                .infer_schema(&mut buf_reader, Some(1000))
                .map_err(Error::Arrow)?;

            buf_reader
                .seek(SeekFrom::Start(0))
                .map_err(|e| Error::io(e, path))?;

            Arc::new(inferred)
        };

        let mut builder = ReaderBuilder::new(Arc::clone(&schema))
            .with_batch_size(options.batch_size)
            .with_header(options.has_header);

        if let Some(delim) = options.delimiter {
            builder = builder.with_delimiter(delim);
        }

        let reader = builder.build(buf_reader).map_err(Error::Arrow)?;

        let mut batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        // A header-only file still describes a valid zero-row table.
        if batches.is_empty() {
            batches.push(RecordBatch::new_empty(schema));
        }

        Self::new(batches)
    }

    /// Loads a table from a Parquet file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not valid Parquet.
    pub fn from_parquet(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(Error::Parquet)?;
        let schema = Arc::clone(builder.schema());
        let reader = builder.build().map_err(Error::Parquet)?;

        let mut batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        if batches.is_empty() {
            batches.push(RecordBatch::new_empty(schema));
        }

        Self::new(batches)
    }

    /// Loads a table from a JSON Lines file, inferring the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_with_options(path, JsonOptions::default())
    }

    /// Loads a table from a JSON Lines file with explicit options.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsed.
    pub fn from_json_with_options(path: impl AsRef<Path>, options: JsonOptions) -> Result<Self> {
        use std::io::BufReader;

        use arrow_json::ReaderBuilder;

        let path = path.as_ref();

        let schema = if let Some(schema) = options.schema {
            Arc::new(schema)
        } else {
            let infer_file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
            let infer_reader = BufReader::new(infer_file);
            let (inferred, _) = arrow_json::reader::infer_json_schema(infer_reader, Some(1000))
                .map_err(Error::Arrow)?;
            Arc::new(inferred)
        };

        let file = std::fs::File::open(path).map_err(|e| Error::io(e, path))?;
        let buf_reader = BufReader::new(file);

        let builder = ReaderBuilder::new(Arc::clone(&schema)).with_batch_size(options.batch_size);
        let reader = builder.build(buf_reader).map_err(Error::Arrow)?;

        let mut batches: Vec<RecordBatch> = reader
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::Arrow)?;

        if batches.is_empty() {
            batches.push(RecordBatch::new_empty(schema));
        }

        Self::new(batches)
    }

    /// Saves the table to a CSV file with a header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    pub fn to_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        use arrow_csv::WriterBuilder;

        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| Error::io(e, path))?;

        let mut writer = WriterBuilder::new().with_header(true).build(file);
        for batch in &self.batches {
            writer.write(batch).map_err(Error::Arrow)?;
        }

        Ok(())
    }

    /// Saves the table to a Parquet file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    pub fn to_parquet(&self, path: impl AsRef<Path>) -> Result<()> {
        use parquet::{arrow::ArrowWriter, file::properties::WriterProperties};

        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| Error::io(e, path))?;

        let props = WriterProperties::builder().build();
        let mut writer = ArrowWriter::try_new(file, self.schema(), Some(props))
            .map_err(Error::Parquet)?;
        for batch in &self.batches {
            writer.write(batch).map_err(Error::Parquet)?;
        }
        writer.close().map_err(Error::Parquet)?;

        Ok(())
    }

    /// Returns the table schema.
    pub fn schema(&self) -> SchemaRef {
        Arc::clone(&self.schema)
    }

    /// Returns the total number of rows.
    pub fn num_rows(&self) -> usize {
        self.row_count
    }

    /// Returns the number of columns.
    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Returns the underlying record batches.
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Returns the index of a named column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnNotFound`] if no column has this name.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.schema
            .fields()
            .iter()
            .position(|f| f.name() == name)
            .ok_or_else(|| Error::column_not_found(name))
    }

    /// Collects one column as canonical text cells across all batches.
    ///
    /// `None` marks a missing cell: an Arrow null or a float `NaN`. All
    /// other values are rendered to their canonical string form, which is
    /// what distinct counting and frequency tables operate on.
    pub(crate) fn column_text(&self, index: usize) -> Vec<Option<String>> {
        let mut cells = Vec::with_capacity(self.row_count);
        for batch in &self.batches {
            let array = batch.column(index);
            for row in 0..array.len() {
                cells.push(cell_text(array, row));
            }
        }
        cells
    }

    /// Collects one column as row-aligned numeric cells across all batches.
    ///
    /// Arrow numeric columns convert directly; text columns are parsed per
    /// cell. `None` marks a missing cell or a cell with no numeric reading.
    pub(crate) fn column_numeric(&self, index: usize) -> Vec<Option<f64>> {
        let mut cells = Vec::with_capacity(self.row_count);
        for batch in &self.batches {
            let array = batch.column(index);
            for row in 0..array.len() {
                cells.push(cell_numeric(array, row));
            }
        }
        cells
    }
}

/// Renders one cell to its canonical text, `None` when missing.
fn cell_text(array: &ArrayRef, row: usize) -> Option<String> {
    if array.is_null(row) {
        return None;
    }
    let any = array.as_any();
    if let Some(arr) = any.downcast_ref::<StringArray>() {
        Some(arr.value(row).to_string())
    } else if let Some(arr) = any.downcast_ref::<LargeStringArray>() {
        Some(arr.value(row).to_string())
    } else if let Some(arr) = any.downcast_ref::<Float64Array>() {
        finite_text(arr.value(row))
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        finite_text(f64::from(arr.value(row)))
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Some(arr.value(row).to_string())
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        Some(arr.value(row).to_string())
    } else if let Some(arr) = any.downcast_ref::<BooleanArray>() {
        Some(arr.value(row).to_string())
    } else {
        // Dates, timestamps, and nested types go through Arrow's own
        // formatter so their text form stays stable across batches.
        array_value_to_string(array, row).ok()
    }
}

fn finite_text(value: f64) -> Option<String> {
    if value.is_nan() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Reads one cell as `f64`, `None` when missing or non-numeric.
#[allow(clippy::cast_precision_loss)]
fn cell_numeric(array: &ArrayRef, row: usize) -> Option<f64> {
    if array.is_null(row) {
        return None;
    }
    let any = array.as_any();
    let value = match array.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| f64::from(a.value(row))),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| f64::from(a.value(row))),
        DataType::Int16 => any
            .downcast_ref::<Int16Array>()
            .map(|a| f64::from(a.value(row))),
        DataType::Int8 => any
            .downcast_ref::<Int8Array>()
            .map(|a| f64::from(a.value(row))),
        DataType::UInt64 => any
            .downcast_ref::<UInt64Array>()
            .map(|a| a.value(row) as f64),
        DataType::UInt32 => any
            .downcast_ref::<UInt32Array>()
            .map(|a| f64::from(a.value(row))),
        DataType::UInt16 => any
            .downcast_ref::<UInt16Array>()
            .map(|a| f64::from(a.value(row))),
        DataType::UInt8 => any
            .downcast_ref::<UInt8Array>()
            .map(|a| f64::from(a.value(row))),
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .and_then(|a| a.value(row).trim().parse::<f64>().ok()),
        DataType::LargeUtf8 => any
            .downcast_ref::<LargeStringArray>()
            .and_then(|a| a.value(row).trim().parse::<f64>().ok()),
        _ => None,
    };
    value.filter(|v| !v.is_nan())
}

/// Options for reading CSV files.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Whether the CSV file has a header row.
    pub has_header: bool,
    /// Delimiter character (default is comma).
    pub delimiter: Option<u8>,
    /// Batch size for reading.
    pub batch_size: usize,
    /// Optional schema (inferred if not provided).
    pub schema: Option<arrow::datatypes::Schema>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: None,
            batch_size: 8192,
            schema: None,
        }
    }
}

impl CsvOptions {
    /// Creates new CSV options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the file has a header row.
    #[must_use]
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Sets the delimiter character.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Sets the batch size for reading.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the schema for parsing.
    #[must_use]
    pub fn with_schema(mut self, schema: arrow::datatypes::Schema) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Options for reading JSON Lines files.
#[derive(Debug, Clone)]
pub struct JsonOptions {
    /// Batch size for reading.
    pub batch_size: usize,
    /// Optional schema (inferred if not provided).
    pub schema: Option<arrow::datatypes::Schema>,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            batch_size: 8192,
            schema: None,
        }
    }
}

impl JsonOptions {
    /// Creates new JSON options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the batch size for reading.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the schema for parsing.
    #[must_use]
    pub fn with_schema(mut self, schema: arrow::datatypes::Schema) -> Self {
        self.schema = Some(schema);
        self
    }
}
