use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::catalog::Dataset;

/// Directories the processor reads from and writes to.
///
/// Built once per process and handed to
/// [`CrimeDataProcessor::new`](crate::processor::CrimeDataProcessor::new).
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    file_overrides: BTreeMap<Dataset, PathBuf>,
}

impl ProcessorConfig {
    pub fn new(data_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            output_dir: output_dir.into(),
            file_overrides: BTreeMap::new(),
        }
    }

    /// Uses `<root>/Data` and `<root>/Output_data`.
    pub fn from_project_root(root: &Path) -> Self {
        Self::new(root.join("Data"), root.join("Output_data"))
    }

    /// Points a dataset at a file other than its catalog name, e.g. a CSV
    /// extract of the same table.
    pub fn with_file(mut self, dataset: Dataset, path: impl Into<PathBuf>) -> Self {
        self.file_overrides.insert(dataset, path.into());
        self
    }

    /// Where `dataset` is expected on disk.
    pub fn path_for(&self, dataset: Dataset) -> PathBuf {
        self.file_overrides
            .get(&dataset)
            .cloned()
            .unwrap_or_else(|| self.data_dir.join(dataset.file_name()))
    }

    /// Which catalog files exist on disk.
    pub fn available_files(&self) -> BTreeMap<Dataset, bool> {
        Dataset::ALL
            .iter()
            .map(|dataset| (*dataset, self.path_for(*dataset).exists()))
            .collect()
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::new("Data", "Output_data")
    }
}
