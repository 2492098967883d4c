use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, StringArray};
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};

use crate::error::{DataError, Result};
use crate::io::excel_read::dedup_names;
use crate::model::{Cell, Column, Table};

/// Reads a comma-separated file with a header row into a [`Table`].
///
/// Every field is read as text and then inferred cell by cell, so a column
/// can mix numbers and free text. Short rows are padded with missing values.
pub fn read_csv(path: &Path) -> Result<Table> {
    let (inferred, _) = Format::default()
        .with_header(true)
        .infer_schema(File::open(path)?, Some(1))?;

    let names = dedup_names(
        inferred
            .fields()
            .iter()
            .map(|field| field.name().trim().to_string())
            .collect(),
    );
    let schema = Schema::new(
        names
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    );

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_header(true)
        .with_truncated_rows(true)
        .build(File::open(path)?)?;

    let mut cells: Vec<Vec<Cell>> = vec![Vec::new(); names.len()];
    for batch in reader {
        let batch = batch?;
        for (index, array) in batch.columns().iter().enumerate() {
            let strings = array
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| {
                    DataError::InvalidWorkbook(format!("column {index} is not text"))
                })?;
            cells[index].extend((0..strings.len()).map(|row| {
                if strings.is_null(row) {
                    Cell::Empty
                } else {
                    Cell::infer(strings.value(row))
                }
            }));
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();
    Table::from_columns(columns)
}
