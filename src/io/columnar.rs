use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder, Int64Builder, StringBuilder};
use arrow::csv::WriterBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::error::Result;
use crate::model::{Cell, Column, Table};

/// Arrow type a column is written as: integers stay Int64, any real makes the
/// column Float64, any text makes it Utf8.
pub fn column_type(column: &Column) -> DataType {
    let mut data_type = DataType::Int64;
    for cell in &column.cells {
        match cell {
            Cell::Text(_) => return DataType::Utf8,
            Cell::Float(_) => data_type = DataType::Float64,
            Cell::Int(_) | Cell::Empty => {}
        }
    }
    if column.cells.iter().all(Cell::is_empty) {
        return DataType::Utf8;
    }
    data_type
}

/// Converts a table into a single Arrow record batch.
pub fn to_record_batch(table: &Table) -> Result<RecordBatch> {
    let mut fields = Vec::with_capacity(table.width());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(table.width());

    for column in table.columns() {
        let data_type = column_type(column);
        let array: ArrayRef = match data_type {
            DataType::Int64 => {
                let mut b = Int64Builder::with_capacity(column.cells.len());
                for cell in &column.cells {
                    b.append_option(cell.as_year());
                }
                Arc::new(b.finish())
            }
            DataType::Float64 => {
                let mut b = Float64Builder::with_capacity(column.cells.len());
                for cell in &column.cells {
                    b.append_option(cell.as_f64());
                }
                Arc::new(b.finish())
            }
            _ => {
                let mut b = StringBuilder::new();
                for cell in &column.cells {
                    match cell {
                        Cell::Empty => b.append_null(),
                        other => b.append_value(other.to_string()),
                    }
                }
                Arc::new(b.finish())
            }
        };
        fields.push(Field::new(&column.name, data_type, true));
        arrays.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    if arrays.is_empty() {
        return Ok(RecordBatch::new_empty(schema));
    }
    RecordBatch::try_new(schema, arrays).map_err(Into::into)
}

/// Writes the table as CSV with a header row.
pub fn write_csv(path: &Path, table: &Table) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    write_csv_to(file, table)
}

/// Writes the table as CSV into any writer, e.g. stdout.
pub fn write_csv_to<W: Write>(sink: W, table: &Table) -> Result<()> {
    let batch = to_record_batch(table)?;
    let mut writer = WriterBuilder::new().with_header(true).build(sink);
    writer.write(&batch)?;
    writer.into_inner().flush()?;
    Ok(())
}

/// Writes the table as a Snappy-compressed Parquet file.
pub fn write_parquet(path: &Path, table: &Table) -> Result<()> {
    let batch = to_record_batch(table)?;
    let file = File::create(path)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
