//! Fixed catalog of the CSA workbooks the processor knows about.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::model::Vintage;

/// Page the 2010–2019 workbook has to be fetched from by hand.
pub const CSA_DOWNLOAD_URL: &str = "https://www.crimestatistics.vic.gov.au/download-data-11";

/// Default sheet of the 2012–2021 workbook: LGA summary by Police Region.
pub const DEFAULT_2012_2021_SHEET: &str = "Table 01";

/// Sheets of the 2012–2021 workbook and what they break incidents down by.
pub const SHEETS_2012_2021: &[(&str, &str)] = &[
    ("Table 01", "LGA summary by Police Region"),
    ("Table 02", "By PSA, LGA, and Offence"),
    ("Table 03", "By LGA, Suburb, and Offence"),
    ("Table 04", "By LGA and Location"),
    ("Table 05", "By LGA and Charge Status"),
];

/// Data files expected in the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Dataset {
    CriminalIncidents2012_2021,
    CriminalIncidents2010_2019,
    RecordedOffences,
    AllegedOffenders,
    FamilyIncidents,
    VictimReports,
}

impl Dataset {
    pub const ALL: [Dataset; 6] = [
        Dataset::CriminalIncidents2012_2021,
        Dataset::CriminalIncidents2010_2019,
        Dataset::RecordedOffences,
        Dataset::AllegedOffenders,
        Dataset::FamilyIncidents,
        Dataset::VictimReports,
    ];

    /// Criminal-incident workbook of a vintage.
    pub fn for_vintage(vintage: Vintage) -> Self {
        match vintage {
            Vintage::V2010_2019 => Dataset::CriminalIncidents2010_2019,
            Vintage::V2012_2021 => Dataset::CriminalIncidents2012_2021,
        }
    }

    /// Name used as cache and report key.
    pub fn key(self) -> &'static str {
        match self {
            Dataset::CriminalIncidents2012_2021 => "criminal_incidents_2012_2021",
            Dataset::CriminalIncidents2010_2019 => "criminal_incidents_2010_2019",
            Dataset::RecordedOffences => "recorded_offences",
            Dataset::AllegedOffenders => "alleged_offenders",
            Dataset::FamilyIncidents => "family_incidents",
            Dataset::VictimReports => "victim_reports",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Dataset::CriminalIncidents2012_2021 => {
                "LGA_Criminal_Incidents_Year_Ending_September_2021.xlsx"
            }
            Dataset::CriminalIncidents2010_2019 => {
                "LGA_Criminal_Incidents_Principal_Offence_2010_2019.xlsx"
            }
            Dataset::RecordedOffences => "LGA_Recorded_Offences_Year_Ending_September_2021.xlsx",
            Dataset::AllegedOffenders => "LGA_Alleged_Offenders_Year_Ending_September_2021.xlsx",
            Dataset::FamilyIncidents => "LGA_Family_Incidents_Year_Ending_September_2021.xlsx",
            Dataset::VictimReports => "LGA_Victim_Reports_Year_Ending_September_2021.xlsx",
        }
    }

    /// Remediation text attached to a missing-file error.
    pub fn missing_hint(self) -> Option<String> {
        match self {
            Dataset::CriminalIncidents2010_2019 => Some(format!(
                "Please download the 2010-2019 data from:\n{CSA_DOWNLOAD_URL}\nor run: vic-crime-series download"
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimePeriod {
    pub start_year: i64,
    pub end_year: i64,
    pub year_ending: &'static str,
    pub asgs_version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DownloadSource {
    pub name: &'static str,
    pub url: &'static str,
    pub access_type: &'static str,
    pub format: &'static str,
}

/// Static description of the 2010–2019 release.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub name: &'static str,
    pub publisher: &'static str,
    pub time_period: TimePeriod,
    pub description: &'static str,
    pub download_sources: Vec<DownloadSource>,
    pub expected_columns: Vec<&'static str>,
    pub offence_divisions: BTreeMap<&'static str, &'static str>,
    pub data_quality_notes: Vec<&'static str>,
    pub expected_filename: &'static str,
}

/// Offence division codes and their titles.
pub const OFFENCE_DIVISIONS: &[(&str, &str)] = &[
    ("A", "Crimes against the person"),
    ("B", "Property and deception offences"),
    ("C", "Drug offences"),
    ("D", "Public order and security offences"),
    ("E", "Justice procedures offences"),
    ("F", "Other offences"),
];

pub fn dataset_2010_2019_info() -> DatasetInfo {
    DatasetInfo {
        name: "VIC CSA - Crime Statistics - Criminal Incidents by Principal Offence (LGA) 2010-2019",
        publisher: "Crime Statistics Agency Victoria",
        time_period: TimePeriod {
            start_year: 2010,
            end_year: 2019,
            year_ending: "March",
            asgs_version: "2011",
        },
        description: "Number of criminal incidents by principal offence recorded on the Victoria \
            Police Law Enforcement Assistance Program (LEAP). A recorded criminal incident is a \
            criminal event that may include multiple offences, alleged offenders and/or victims \
            recorded on a single date at one location. Years ending March 2010 to 2019, \
            aggregated to 2011 ASGS Local Government Areas.",
        download_sources: vec![
            DownloadSource {
                name: "AURIN Data Catalogue",
                url: "https://data.aurin.org.au/dataset/vic-govt-csa-csa-crime-stats-criminal-incidents-princ-offence-lga-2010-2019-lga2011",
                access_type: "Institutional Login",
                format: "CSV/GeoJSON",
            },
            DownloadSource {
                name: "Research Data Australia",
                url: "https://researchdata.edu.au/vic-csa-crime-2010-2019/2746422",
                access_type: "Public Metadata",
                format: "Reference",
            },
            DownloadSource {
                name: "data.gov.au",
                url: "https://data.gov.au/dataset/ds-aurin-55c99905-75fe-49b8-a663-85b6f24b827d",
                access_type: "Public",
                format: "Various",
            },
            DownloadSource {
                name: "Crime Statistics Agency Victoria",
                url: CSA_DOWNLOAD_URL,
                access_type: "Public",
                format: "Excel (XLSX)",
            },
        ],
        expected_columns: vec![
            "lga_code",
            "lga_name",
            "year",
            "year_ending",
            "offence_division",
            "offence_subdivision",
            "offence_subgroup",
            "incidents_recorded",
            "rate_per_100000",
        ],
        offence_divisions: OFFENCE_DIVISIONS.iter().copied().collect(),
        data_quality_notes: vec![
            "Data excludes Justice institutions and immigration facilities",
            "Data excludes Unincorporated Victoria",
            "Data excludes incidents where geographic location is unknown or outside Victoria",
            "Recorded crime statistics are subject to movement between releases",
            "Not representative of all crime that occurs in Victoria",
        ],
        expected_filename: Dataset::CriminalIncidents2010_2019.file_name(),
    }
}
