//! Tabular data model shared by the loaders, the merger and the writers.

mod cell;
mod table;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use cell::Cell;
pub use table::{Column, Table};

/// Canonical column names produced by the standardizer.
pub mod columns {
    pub const YEAR: &str = "year";
    pub const YEAR_ENDING: &str = "year_ending";
    pub const YEAR_ENDING_MONTH: &str = "year_ending_month";
    pub const LGA_CODE: &str = "lga_code";
    pub const LGA_NAME: &str = "lga_name";
    pub const POLICE_REGION: &str = "police_region";
    pub const POLICE_SERVICE_AREA: &str = "police_service_area";
    pub const OFFENCE_DIVISION: &str = "offence_division";
    pub const OFFENCE_SUBDIVISION: &str = "offence_subdivision";
    pub const OFFENCE_SUBGROUP: &str = "offence_subgroup";
    pub const INCIDENTS_RECORDED: &str = "incidents_recorded";
    pub const RATE_PER_100000: &str = "rate_per_100000";
    pub const POSTCODE: &str = "postcode";
    pub const SUBURB: &str = "suburb";
    pub const LOCATION_DIVISION: &str = "location_division";
    pub const LOCATION_SUBDIVISION: &str = "location_subdivision";
    pub const LOCATION_GROUP: &str = "location_group";
    pub const CHARGE_STATUS: &str = "charge_status";
    pub const DATA_SOURCE: &str = "data_source";
}

/// Release a table comes from. Fixed at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Vintage {
    /// Years ending March 2010–2019, ASGS 2011 LGA boundaries.
    #[serde(rename = "2010_2019")]
    V2010_2019,
    /// Years ending September 2012–2021, current LGA boundaries.
    #[serde(rename = "2012_2021")]
    V2012_2021,
}

impl Vintage {
    pub fn id(self) -> &'static str {
        match self {
            Vintage::V2010_2019 => "2010_2019",
            Vintage::V2012_2021 => "2012_2021",
        }
    }

    pub fn data_source(self) -> DataSource {
        match self {
            Vintage::V2010_2019 => DataSource::Csa2010_2019,
            Vintage::V2012_2021 => DataSource::Csa2012_2021,
        }
    }

    pub fn year_ending_month(self) -> YearEndingMonth {
        match self {
            Vintage::V2010_2019 => YearEndingMonth::March,
            Vintage::V2012_2021 => YearEndingMonth::September,
        }
    }
}

impl fmt::Display for Vintage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Provenance tag stamped into the `data_source` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSource {
    #[serde(rename = "CSA_2010_2019")]
    Csa2010_2019,
    #[serde(rename = "CSA_2012_2021")]
    Csa2012_2021,
}

impl DataSource {
    pub fn as_str(self) -> &'static str {
        match self {
            DataSource::Csa2010_2019 => "CSA_2010_2019",
            DataSource::Csa2012_2021 => "CSA_2012_2021",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CSA_2010_2019" => Ok(DataSource::Csa2010_2019),
            "CSA_2012_2021" => Ok(DataSource::Csa2012_2021),
            other => Err(format!("unknown data source '{other}'")),
        }
    }
}

/// Month closing each reporting year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YearEndingMonth {
    March,
    September,
}

impl YearEndingMonth {
    pub fn as_str(self) -> &'static str {
        match self {
            YearEndingMonth::March => "March",
            YearEndingMonth::September => "September",
        }
    }
}

impl fmt::Display for YearEndingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for YearEndingMonth {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "march" => Ok(YearEndingMonth::March),
            "september" => Ok(YearEndingMonth::September),
            other => Err(format!("unknown year-ending month '{other}'")),
        }
    }
}

/// Typed view over one row of a standardized table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentRecord {
    pub year: Option<i64>,
    pub year_ending_month: Option<YearEndingMonth>,
    pub lga_name: Option<String>,
    pub offence_division: Option<String>,
    pub offence_subdivision: Option<String>,
    pub offence_subgroup: Option<String>,
    pub incidents_recorded: Option<u64>,
    pub rate_per_100000: Option<f64>,
    pub data_source: Option<DataSource>,
    pub police_region: Option<String>,
    pub postcode: Option<String>,
    pub suburb: Option<String>,
    pub charge_status: Option<String>,
}

impl IncidentRecord {
    /// Reads row `index` of a standardized table. Absent columns and
    /// values of the wrong shape come back as `None`.
    pub fn from_row(table: &Table, index: usize) -> Option<Self> {
        if index >= table.height() {
            return None;
        }
        let text = |name: &str| {
            table
                .cell(name, index)
                .filter(|cell| !cell.is_empty())
                .map(ToString::to_string)
        };
        let non_negative = |name: &str| {
            table
                .cell(name, index)
                .and_then(Cell::as_f64)
                .filter(|value| *value >= 0.0)
        };

        Some(Self {
            year: table.cell(columns::YEAR, index).and_then(Cell::as_year),
            year_ending_month: text(columns::YEAR_ENDING_MONTH).and_then(|v| v.parse().ok()),
            lga_name: text(columns::LGA_NAME),
            offence_division: text(columns::OFFENCE_DIVISION),
            offence_subdivision: text(columns::OFFENCE_SUBDIVISION),
            offence_subgroup: text(columns::OFFENCE_SUBGROUP),
            incidents_recorded: non_negative(columns::INCIDENTS_RECORDED)
                .filter(|value| value.fract() == 0.0)
                .map(|value| value as u64),
            rate_per_100000: non_negative(columns::RATE_PER_100000),
            data_source: text(columns::DATA_SOURCE).and_then(|v| v.parse().ok()),
            police_region: text(columns::POLICE_REGION),
            postcode: text(columns::POSTCODE),
            suburb: text(columns::SUBURB),
            charge_status: text(columns::CHARGE_STATUS),
        })
    }

    /// Typed records for every row of the table.
    pub fn from_table(table: &Table) -> Vec<Self> {
        (0..table.height())
            .filter_map(|index| Self::from_row(table, index))
            .collect()
    }
}
