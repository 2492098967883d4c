use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use vic_crime_series::catalog::{self, CSA_DOWNLOAD_URL, Dataset, SHEETS_2012_2021};
use vic_crime_series::io::columnar;
use vic_crime_series::model::{Table, Vintage};
use vic_crime_series::{CrimeDataProcessor, DataError, ProcessorConfig, Result, report, summary};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| DataError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let config = ProcessorConfig::new(cli.data_dir, cli.output_dir);

    match cli.command {
        Some(command) => execute(command, config),
        None => {
            print_dataset_info();
            println!();
            print_check(&config);
            println!("\nUse --help for more options");
            Ok(())
        }
    }
}

fn execute(command: Command, config: ProcessorConfig) -> Result<()> {
    match command {
        Command::Info => {
            print_dataset_info();
            Ok(())
        }
        Command::Check => {
            print_check(&config);
            Ok(())
        }
        Command::Download => {
            print_download_instructions(&config);
            Ok(())
        }
        Command::Validate => {
            let check = CrimeDataProcessor::new(config)?.validate_2010_2019()?;
            println!("{}", serde_json::to_string_pretty(&check)?);
            if check.has_warnings() {
                eprintln!("data validation completed with warnings");
            }
            Ok(())
        }
        Command::Metadata => {
            let path = CrimeDataProcessor::new(config)?.save_metadata()?;
            println!("Metadata saved to: {}", path.display());
            Ok(())
        }
        Command::Report(args) => {
            let mut processor = CrimeDataProcessor::new(config)?;
            if args.load {
                for vintage in [Vintage::V2012_2021, Vintage::V2010_2019] {
                    if let Err(error) = processor.load(vintage, None) {
                        if !error.is_not_found() {
                            return Err(error);
                        }
                        eprintln!("note: {error}");
                    }
                }
            }
            let data_report = processor.generate_report();
            println!("{}", serde_json::to_string_pretty(&data_report)?);
            Ok(())
        }
        Command::Merge(args) => {
            let mut processor = CrimeDataProcessor::new(config)?;
            let merged = processor.merge_time_series(args.prefer.prefers_september())?;
            if let Some(coverage) = processor.year_coverage() {
                println!("Years in 2012-2021 dataset: {:?}", coverage.september);
                println!("Years in 2010-2019 dataset: {:?}", coverage.march);
                println!("Overlapping years: {:?}", coverage.overlapping);
            }
            println!(
                "Merged series: {} rows, years {:?}",
                merged.height(),
                merged.distinct_years("year")
            );
            Ok(())
        }
        Command::Export(args) => {
            let mut processor = CrimeDataProcessor::new(config)?;
            let path = processor.export_merged_data(&args.format, args.filename.as_deref())?;
            println!("Exported to: {}", path.display());
            Ok(())
        }
        Command::Summary(args) => {
            let mut processor = CrimeDataProcessor::new(config)?;
            let merged = processor.merge_time_series(args.prefer.prefers_september())?;
            let groups: Vec<&str> = args.group_by.iter().map(String::as_str).collect();
            let group_cols = (!groups.is_empty()).then_some(groups.as_slice());
            print_table(&summary::lga_summary(&merged, group_cols)?)
        }
        Command::Trends(args) => {
            let mut processor = CrimeDataProcessor::new(config)?;
            let merged = processor.merge_time_series(args.prefer.prefers_september())?;
            print_table(&summary::offence_trends(&merged)?)
        }
    }
}

fn print_table(table: &Table) -> Result<()> {
    columnar::write_csv_to(std::io::stdout().lock(), table)
}

fn print_dataset_info() {
    let info = catalog::dataset_2010_2019_info();
    println!("{}", "=".repeat(80));
    println!("VICTORIAN CRIME STATISTICS - 2010-2019 DATASET INFORMATION");
    println!("{}", "=".repeat(80));
    println!("\nDataset Name: {}", info.name);
    println!("Publisher: {}", info.publisher);
    println!("\nTime Period:");
    println!(
        "  - Years: {} - {}",
        info.time_period.start_year, info.time_period.end_year
    );
    println!("  - Year Ending: {}", info.time_period.year_ending);
    println!("  - ASGS Version: {}", info.time_period.asgs_version);
    println!("\nDescription: {}", info.description);
    println!("\nDownload Sources:");
    for (index, source) in info.download_sources.iter().enumerate() {
        println!("  {}. {}", index + 1, source.name);
        println!("     URL: {}", source.url);
        println!(
            "     Access: {} | Format: {}",
            source.access_type, source.format
        );
    }
    println!("\nOffence Divisions:");
    for (code, title) in &info.offence_divisions {
        println!("  {code}: {title}");
    }
    println!("\nExpected Columns:");
    for column in &info.expected_columns {
        println!("  - {column}");
    }
    println!("\nData Quality Notes:");
    for note in &info.data_quality_notes {
        println!("  * {note}");
    }
    println!("\n2012-2021 workbook sheets:");
    for (sheet, title) in SHEETS_2012_2021 {
        println!("  {sheet}: {title}");
    }
    println!("{}", "=".repeat(80));
}

fn print_check(config: &ProcessorConfig) {
    for (dataset, available) in config.available_files() {
        let status = if available { "[OK]" } else { "[NOT FOUND]" };
        println!("  {status} {dataset}");
    }

    let status = report::check_2010_2019(config);
    match status.size_mb {
        Some(size_mb) if status.exists => {
            println!("[OK] Data file found: {}", status.path.display());
            println!("     Size: {size_mb:.2} MB");
        }
        _ => {
            println!("[!] Data file not found: {}", status.path.display());
            println!("\n    To obtain this data:");
            println!("    1. Visit: {CSA_DOWNLOAD_URL}");
            println!("    2. Download the Criminal Incidents data for 2010-2019");
            println!("    3. Save the file as:");
            println!("       {}", status.path.display());
        }
    }
}

fn print_download_instructions(config: &ProcessorConfig) {
    let target = config.path_for(Dataset::CriminalIncidents2010_2019);
    println!("{}", "=".repeat(80));
    println!("MANUAL DOWNLOAD INSTRUCTIONS");
    println!("{}", "=".repeat(80));
    println!(
        "
OPTION 1: Crime Statistics Agency Victoria (Recommended)
1. Visit: {CSA_DOWNLOAD_URL}
2. Look for \"Criminal Incidents\" data tables
3. Download data covering years 2010-2019
4. Save to: {target}

OPTION 2: AURIN Data Catalogue (Requires Institutional Access)
1. Visit: https://data.aurin.org.au
2. Search for: \"Criminal Incidents Principal Offence LGA 2010-2019\"
3. Login with your institutional credentials (Australian universities)
4. Download the dataset in your preferred format
5. Save to: {data_dir}

OPTION 3: data.gov.au
1. Visit: https://data.gov.au/dataset/ds-aurin-55c99905-75fe-49b8-a663-85b6f24b827d
2. Look for available downloads or related resources

After downloading, run validation:
    vic-crime-series validate",
        target = target.display(),
        data_dir = config.data_dir.display(),
    );
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Merge the Victorian CSA criminal incident releases into one 2010-2021 series."
)]
struct Cli {
    /// Directory holding the CSA workbooks.
    #[arg(long, global = true, default_value = "Data")]
    data_dir: PathBuf,

    /// Directory exports are written to.
    #[arg(long, global = true, default_value = "Output_data")]
    output_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show information about the 2010-2019 dataset.
    Info,
    /// Check which data files are present.
    Check,
    /// Validate the structure of the 2010-2019 workbook.
    Validate,
    /// Show manual download instructions.
    Download,
    /// Save the 2010-2019 dataset metadata as JSON.
    Metadata,
    /// Print a JSON report of data files and loaded tables.
    Report(ReportArgs),
    /// Merge both releases and print year coverage.
    Merge(MergeArgs),
    /// Merge both releases and write the series to the output directory.
    Export(ExportArgs),
    /// Print incident totals per group of the merged series as CSV.
    Summary(SummaryArgs),
    /// Print year-over-year change per offence division as CSV.
    Trends(MergeArgs),
}

#[derive(clap::Args)]
struct ReportArgs {
    /// Load both releases before reporting.
    #[arg(long)]
    load: bool,
}

#[derive(clap::Args)]
struct MergeArgs {
    /// Release that owns the overlapping years.
    #[arg(long, value_enum, default_value_t = Preference::September)]
    prefer: Preference,
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Output format: csv, excel (xlsx), or parquet.
    #[arg(long, default_value = "csv")]
    format: String,

    /// File name inside the output directory.
    #[arg(long)]
    filename: Option<String>,
}

#[derive(clap::Args)]
struct SummaryArgs {
    /// Columns to group by.
    #[arg(long, value_delimiter = ',')]
    group_by: Vec<String>,

    /// Release that owns the overlapping years.
    #[arg(long, value_enum, default_value_t = Preference::September)]
    prefer: Preference,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Preference {
    March,
    September,
}

impl Preference {
    fn prefers_september(self) -> bool {
        matches!(self, Preference::September)
    }
}
