use std::path::Path;

use rust_xlsxwriter::{TableColumn, Workbook};

use crate::error::Result;
use crate::model::{Cell, Table};

/// Writes `table` to a single-sheet workbook at `path`.
pub fn write_table(path: &Path, sheet_name: &str, table: &Table) -> Result<()> {
    let mut workbook_writer = Workbook::new();
    let worksheet = workbook_writer.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col_idx, column) in table.columns().iter().enumerate() {
        let col = col_idx as u16;
        worksheet.write_string(0, col, &column.name)?;

        for (row_idx, cell) in column.cells.iter().enumerate() {
            let row = (row_idx + 1) as u32;
            match cell {
                Cell::Empty => {}
                Cell::Int(value) => {
                    worksheet.write_number(row, col, *value as f64)?;
                }
                Cell::Float(value) => {
                    worksheet.write_number(row, col, *value)?;
                }
                Cell::Text(value) => {
                    worksheet.write_string(row, col, value)?;
                }
            }
        }
    }

    if table.width() > 0 && !table.is_empty() {
        let headers: Vec<TableColumn> = table
            .columns()
            .iter()
            .map(|column| TableColumn::new().set_header(&column.name))
            .collect();
        let mut excel_table = rust_xlsxwriter::Table::new();
        excel_table.set_autofilter(true).set_columns(&headers);
        let col_end = (table.width() as u16).saturating_sub(1);
        let row_end = table.height() as u32;
        worksheet.add_table(0, 0, row_end, col_end, &excel_table)?;
    }

    workbook_writer.save(path)?;
    Ok(())
}
