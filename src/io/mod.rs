//! File adapters: workbook and CSV readers, XLSX, CSV and Parquet writers.

pub mod columnar;
pub mod csv_read;
pub mod excel_read;
pub mod excel_write;

use std::path::Path;

/// `true` for paths the flat-file reader handles rather than the workbook
/// reader.
pub fn is_flat_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
