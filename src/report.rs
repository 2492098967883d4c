//! Availability report and dataset metadata export.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, SecondsFormat};
use serde::Serialize;
use tracing::info;

use crate::catalog::{Dataset, DatasetInfo, dataset_2010_2019_info};
use crate::config::ProcessorConfig;
use crate::error::Result;
use crate::model::{Table, columns};
use crate::processor::CrimeDataProcessor;

/// File the 2010–2019 dataset description is written to.
pub const METADATA_FILE_NAME: &str = "2010_2019_dataset_metadata.json";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Presence and size of one data file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileStatus {
    pub path: PathBuf,
    pub exists: bool,
    pub size_mb: Option<f64>,
}

impl FileStatus {
    pub fn of(path: &Path) -> Self {
        let size_mb = fs::metadata(path)
            .ok()
            .filter(|meta| meta.is_file())
            .map(|meta| meta.len() as f64 / BYTES_PER_MB);
        Self {
            path: path.to_path_buf(),
            exists: path.exists(),
            size_mb,
        }
    }
}

/// Shape of a table held in the processor cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedSummary {
    pub rows: usize,
    pub columns: Vec<String>,
    pub years: Option<Vec<i64>>,
}

impl LoadedSummary {
    pub fn of(table: &Table) -> Self {
        Self {
            rows: table.height(),
            columns: table.column_names(),
            years: table
                .contains(columns::YEAR)
                .then(|| table.distinct_years(columns::YEAR)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DataReport {
    pub generated_at: String,
    pub data_files: BTreeMap<String, FileStatus>,
    pub loaded_data: BTreeMap<String, LoadedSummary>,
}

#[derive(Debug, Clone, Serialize)]
struct DatasetMetadata {
    #[serde(flatten)]
    info: DatasetInfo,
    local_path: PathBuf,
    created_at: String,
    project: &'static str,
}

/// Presence and size of the 2010–2019 workbook. Needs no data directory.
pub fn check_2010_2019(config: &ProcessorConfig) -> FileStatus {
    FileStatus::of(&config.path_for(Dataset::CriminalIncidents2010_2019))
}

fn timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

impl CrimeDataProcessor {
    /// Describes every catalog file and every cached table.
    pub fn generate_report(&self) -> DataReport {
        let data_files = Dataset::ALL
            .iter()
            .map(|dataset| {
                let status = FileStatus::of(&self.config().path_for(*dataset));
                (dataset.key().to_string(), status)
            })
            .collect();
        let loaded_data = self
            .loaded_tables()
            .map(|(dataset, table)| (dataset.to_string(), LoadedSummary::of(table)))
            .collect();

        DataReport {
            generated_at: timestamp(),
            data_files,
            loaded_data,
        }
    }

    /// Presence and size of the 2010–2019 workbook.
    pub fn check_2010_2019(&self) -> FileStatus {
        check_2010_2019(self.config())
    }

    /// Writes the 2010–2019 dataset description into the data directory.
    pub fn save_metadata(&self) -> Result<PathBuf> {
        let metadata = DatasetMetadata {
            info: dataset_2010_2019_info(),
            local_path: self.config().path_for(Dataset::CriminalIncidents2010_2019),
            created_at: timestamp(),
            project: "Victorian Crime Data Analytics",
        };
        let path = self.config().data_dir.join(METADATA_FILE_NAME);
        fs::write(&path, serde_json::to_string_pretty(&metadata)?)?;
        info!(path = %path.display(), "saved dataset metadata");
        Ok(path)
    }
}
