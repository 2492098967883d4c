use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, instrument};

use crate::error::{DataError, Result};
use crate::io::{columnar, excel_write};
use crate::processor::CrimeDataProcessor;

/// File stem of the exported series.
pub const EXPORT_STEM: &str = "criminal_incidents_extended_2010_2021";

/// Sheet the merged series is written to in XLSX exports.
pub const EXPORT_SHEET: &str = "Merged";

/// Flat-file formats the merged series can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Excel,
    Parquet,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Parquet => "parquet",
        }
    }

    /// Default file name for this format.
    pub fn default_file_name(self) -> String {
        format!("{EXPORT_STEM}.{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = DataError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "parquet" => Ok(ExportFormat::Parquet),
            _ => Err(DataError::UnsupportedFormat(value.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl CrimeDataProcessor {
    /// Merges the series with the default policy and writes it to the output
    /// directory. Returns the path written.
    ///
    /// The format is checked before anything is read or written.
    #[instrument(level = "info", skip(self))]
    pub fn export_merged_data(&mut self, format: &str, filename: Option<&str>) -> Result<PathBuf> {
        let format: ExportFormat = format.parse()?;
        let merged = self.merge_time_series(true)?;

        let output_dir = self.config().output_dir.clone();
        fs::create_dir_all(&output_dir)?;
        let path = match filename {
            Some(name) => output_dir.join(name),
            None => output_dir.join(format.default_file_name()),
        };

        match format {
            ExportFormat::Csv => columnar::write_csv(&path, &merged)?,
            ExportFormat::Excel => excel_write::write_table(&path, EXPORT_SHEET, &merged)?,
            ExportFormat::Parquet => columnar::write_parquet(&path, &merged)?,
        }

        info!(path = %path.display(), rows = merged.height(), %format, "exported merged series");
        Ok(path)
    }
}
