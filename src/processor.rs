use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::{debug, info, instrument, warn};

use crate::catalog::{DEFAULT_2012_2021_SHEET, Dataset};
use crate::config::ProcessorConfig;
use crate::error::{DataError, Result};
use crate::io::{self, csv_read, excel_read};
use crate::model::{Cell, Table, Vintage, columns};
use crate::standardize::standardize;

/// Loads, caches, and combines the CSA criminal-incident tables.
///
/// Loaded tables are cached by dataset for the lifetime of the processor.
/// The cache is plain owned state; the processor is meant for one caller at a
/// time.
#[derive(Debug)]
pub struct CrimeDataProcessor {
    config: ProcessorConfig,
    loaded: BTreeMap<Dataset, Table>,
}

impl CrimeDataProcessor {
    /// Creates a processor over `config`. The data directory must exist.
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        if !config.data_dir.is_dir() {
            return Err(DataError::NotFound {
                path: config.data_dir.clone(),
                hint: Some("Create the data directory and place the CSA workbooks in it".into()),
            });
        }
        Ok(Self {
            config,
            loaded: BTreeMap::new(),
        })
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Which catalog files exist on disk.
    pub fn available_files(&self) -> BTreeMap<Dataset, bool> {
        self.config.available_files()
    }

    /// Table previously loaded for `dataset`, if any.
    pub fn loaded(&self, dataset: Dataset) -> Option<&Table> {
        self.loaded.get(&dataset)
    }

    pub fn loaded_tables(&self) -> impl Iterator<Item = (Dataset, &Table)> {
        self.loaded.iter().map(|(dataset, table)| (*dataset, table))
    }

    /// Loads the September-ending workbook. `sheet` defaults to `Table 01`.
    pub fn load_incidents_2012_2021(&mut self, sheet: Option<&str>) -> Result<&Table> {
        self.load(Vintage::V2012_2021, sheet)
    }

    /// Loads the March-ending workbook. Without `sheet`, the first sheet that
    /// is not contents, notes, or metadata is used.
    pub fn load_incidents_2010_2019(&mut self, sheet: Option<&str>) -> Result<&Table> {
        self.load(Vintage::V2010_2019, sheet)
    }

    /// Reads, standardizes, and tags the workbook of `vintage`, replacing any
    /// cached copy.
    #[instrument(level = "info", skip(self), fields(vintage = %vintage))]
    pub fn load(&mut self, vintage: Vintage, sheet: Option<&str>) -> Result<&Table> {
        let dataset = Dataset::for_vintage(vintage);
        let path = self.config.path_for(dataset);
        if !path.exists() {
            return Err(DataError::NotFound {
                path,
                hint: dataset.missing_hint(),
            });
        }

        let raw = if io::is_flat_file(&path) {
            csv_read::read_csv(&path)?
        } else {
            let sheet = match (sheet, vintage) {
                (Some(sheet), _) => sheet.to_string(),
                (None, Vintage::V2012_2021) => DEFAULT_2012_2021_SHEET.to_string(),
                (None, Vintage::V2010_2019) => {
                    let sheets = excel_read::sheet_names(&path)?;
                    excel_read::first_data_sheet(&sheets)
                        .map(str::to_string)
                        .ok_or_else(|| DataError::InvalidWorkbook("workbook has no sheets".into()))?
                }
            };
            debug!(path = %path.display(), sheet = %sheet, "reading sheet");
            excel_read::read_sheet(&path, &sheet)?
        };

        let mut table = standardize(raw, vintage)?;
        table.set_constant(
            columns::DATA_SOURCE,
            Cell::from(vintage.data_source().as_str()),
        )?;
        table.set_constant(
            columns::YEAR_ENDING_MONTH,
            Cell::from(vintage.year_ending_month().as_str()),
        )?;
        info!(
            rows = table.height(),
            columns = table.width(),
            years = ?table.distinct_years(columns::YEAR),
            "loaded dataset"
        );

        let slot = match self.loaded.entry(dataset) {
            Entry::Occupied(mut entry) => {
                entry.insert(table);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(table),
        };
        Ok(slot)
    }

    /// Makes sure `vintage` is cached. Returns `false` when its file is
    /// missing; other failures propagate.
    pub(crate) fn ensure_loaded(&mut self, vintage: Vintage) -> Result<bool> {
        if self.loaded.contains_key(&Dataset::for_vintage(vintage)) {
            return Ok(true);
        }
        match self.load(vintage, None) {
            Ok(_) => Ok(true),
            Err(error) if error.is_not_found() => {
                warn!(vintage = %vintage, %error, "source unavailable");
                Ok(false)
            }
            Err(error) => Err(error),
        }
    }
}
