mod common;

use std::fs;

use common::{all_values, data_dir, processor_in, write_march_workbook, write_september_workbook};
use tempfile::tempdir;
use vic_crime_series::catalog::{CSA_DOWNLOAD_URL, Dataset};
use vic_crime_series::model::{Cell, DataSource, IncidentRecord, Vintage, YearEndingMonth};
use vic_crime_series::{CrimeDataProcessor, DataError, ProcessorConfig};

#[test]
fn march_workbook_skips_contents_sheet_and_tags_rows() {
    let temp_dir = tempdir().expect("temporary directory");
    let mut processor = processor_in(&temp_dir);
    write_march_workbook(&data_dir(&temp_dir));

    let table = processor
        .load_incidents_2010_2019(None)
        .expect("2010-2019 loaded");

    assert_eq!(table.height(), 30);
    assert_eq!(
        table.column_names(),
        vec![
            "year",
            "year_ending",
            "lga_name",
            "offence_division",
            "incidents_recorded",
            "rate_per_100000",
            "data_source",
            "year_ending_month",
        ]
    );
    assert_eq!(
        table.distinct_years("year"),
        (2010..=2019).collect::<Vec<_>>()
    );
    assert!(all_values(table, "data_source", "CSA_2010_2019"));
    assert!(all_values(table, "year_ending_month", "March"));

    let record = IncidentRecord::from_row(table, 0).expect("first record");
    assert_eq!(record.year, Some(2010));
    assert_eq!(record.year_ending_month, Some(YearEndingMonth::March));
    assert_eq!(record.data_source, Some(DataSource::Csa2010_2019));
    assert_eq!(record.incidents_recorded, Some(100));
    assert_eq!(record.rate_per_100000, Some(1234.5));
    assert_eq!(record.police_region, None);
}

#[test]
fn september_workbook_defaults_to_table_01() {
    let temp_dir = tempdir().expect("temporary directory");
    let mut processor = processor_in(&temp_dir);
    write_september_workbook(&data_dir(&temp_dir));

    let table = processor
        .load_incidents_2012_2021(None)
        .expect("2012-2021 loaded");
    assert_eq!(table.height(), 30);
    assert!(table.contains("police_region"));
    assert!(all_values(table, "year_ending_month", "September"));

    let records = IncidentRecord::from_table(table);
    assert_eq!(records.len(), 30);
    assert_eq!(
        records[0].police_region.as_deref(),
        Some("North West Metro")
    );
    assert_eq!(records[0].data_source, Some(DataSource::Csa2012_2021));
}

#[test]
fn explicit_sheet_is_honoured_and_unknown_sheet_fails() {
    let temp_dir = tempdir().expect("temporary directory");
    let mut processor = processor_in(&temp_dir);
    write_september_workbook(&data_dir(&temp_dir));

    let table = processor
        .load_incidents_2012_2021(Some("Table 02"))
        .expect("Table 02 loaded");
    assert_eq!(table.height(), 1);
    assert_eq!(
        table.cell("police_service_area", 0),
        Some(&Cell::from("Yarra PSA"))
    );

    let result = processor.load_incidents_2012_2021(Some("Table 09"));
    assert!(matches!(result, Err(DataError::InvalidWorkbook(_))));
}

#[test]
fn missing_march_file_points_to_download_instructions() {
    let temp_dir = tempdir().expect("temporary directory");
    let mut processor = processor_in(&temp_dir);
    let march_file = Dataset::CriminalIncidents2010_2019.file_name();
    let expected = data_dir(&temp_dir).join(march_file);

    match processor.load_incidents_2010_2019(None) {
        Err(DataError::NotFound { path, hint }) => {
            assert_eq!(path, expected);
            assert!(hint.expect("hint present").contains(CSA_DOWNLOAD_URL));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }

    let error = processor
        .load_incidents_2012_2021(None)
        .expect_err("2012-2021 file missing");
    assert!(matches!(error, DataError::NotFound { hint: None, .. }));
}

#[test]
fn loaded_tables_are_cached_by_dataset() {
    let temp_dir = tempdir().expect("temporary directory");
    let mut processor = processor_in(&temp_dir);
    write_september_workbook(&data_dir(&temp_dir));
    let dataset = Dataset::CriminalIncidents2012_2021;

    assert!(processor.loaded(dataset).is_none());
    processor
        .load(Vintage::V2012_2021, None)
        .expect("2012-2021 loaded");
    fs::remove_file(data_dir(&temp_dir).join(dataset.file_name()))
        .expect("workbook removed");

    let cached = processor.loaded(dataset).expect("cached table");
    assert_eq!(cached.height(), 30);

    // The cache keeps the merge working after the file is gone.
    let merged = processor.merge_time_series(true).expect("merged");
    assert_eq!(merged.height(), 30);
}

#[test]
fn csv_extract_can_replace_the_workbook() {
    let temp_dir = tempdir().expect("temporary directory");
    let csv_path = temp_dir.path().join("march.csv");
    fs::write(
        &csv_path,
        "Year,LGA_NAME,Offence Division,Incidents Recorded,\"Rate per 100,000 population\"\n\
         2010,Yarra,A,12,4.5\n\
         N/A,Alpine,B,,3.5\n",
    )
    .expect("CSV written");

    let config = ProcessorConfig::new(temp_dir.path(), temp_dir.path().join("out"))
        .with_file(Dataset::CriminalIncidents2010_2019, &csv_path);
    let mut processor = CrimeDataProcessor::new(config).expect("processor created");
    let table = processor
        .load_incidents_2010_2019(None)
        .expect("CSV loaded");

    assert_eq!(table.height(), 2);
    assert_eq!(table.cell("year", 0), Some(&Cell::Int(2010)));
    assert_eq!(table.cell("year", 1), Some(&Cell::Empty));
    assert_eq!(table.cell("incidents_recorded", 0), Some(&Cell::Int(12)));
    assert_eq!(table.cell("incidents_recorded", 1), Some(&Cell::Empty));
    assert_eq!(table.cell("rate_per_100000", 1), Some(&Cell::Float(3.5)));
    assert_eq!(table.cell("lga_name", 1), Some(&Cell::from("Alpine")));
}

#[test]
fn short_csv_rows_are_padded_like_workbook_rows() {
    let temp_dir = tempdir().expect("temporary directory");
    let csv_path = temp_dir.path().join("short.csv");
    fs::write(
        &csv_path,
        "Year,LGA_NAME,Incidents Recorded\n2010,Yarra,7\n2011,Alpine\n",
    )
    .expect("CSV written");

    let config = ProcessorConfig::new(temp_dir.path(), temp_dir.path().join("out"))
        .with_file(Dataset::CriminalIncidents2010_2019, &csv_path);
    let mut processor = CrimeDataProcessor::new(config).expect("processor created");
    let table = processor
        .load_incidents_2010_2019(None)
        .expect("CSV loaded");

    assert_eq!(table.height(), 2);
    assert_eq!(table.cell("year", 1), Some(&Cell::Int(2011)));
    assert_eq!(table.cell("lga_name", 1), Some(&Cell::from("Alpine")));
    assert_eq!(table.cell("incidents_recorded", 1), Some(&Cell::Empty));
}

#[test]
fn processor_requires_the_data_directory() {
    let temp_dir = tempdir().expect("temporary directory");
    let config = ProcessorConfig::from_project_root(temp_dir.path());

    let result = CrimeDataProcessor::new(config);
    assert!(matches!(result, Err(DataError::NotFound { .. })));
}
