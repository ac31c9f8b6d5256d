mod fetch;
mod nhtsa;
mod normalize;
mod settings;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use fetch::{FetchError, fetch_wmi_datasets};
use nhtsa::WmiResponse;
use settings::{SettingsError, load_or_default};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use wmigen_codegen::{CodegenError, CompileOptions, DictCompiler};
use wmigen_core::{CountryRecord, ManufacturerRecord};

#[derive(Debug, Error)]
enum CliError {
    #[error("codegen error: {0}")]
    Codegen(#[from] CodegenError),
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset decode error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid dataset: {0}")]
    InvalidData(String),
    #[error("logging setup error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "wmigen", version, about = "WMI dictionary generator")]
struct Cli {
    /// Settings file consulted for defaults.
    #[arg(long, global = true, default_value = "wmigen.toml")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the WMI datasets from the NHTSA vPIC API.
    Fetch(FetchArgs),
    /// Compile the cached datasets into dictionary sources.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Directory the datasets are saved into.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Vehicle type(s) to download; repeatable.
    #[arg(long = "vehicle-type", value_name = "TYPE")]
    vehicle_types: Vec<String>,
    /// Request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Directory holding countries.json and the WMI_*.json datasets.
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Directory the dictionary sources and the report are written to.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging()?;

    let Cli { config, command } = cli;
    match command {
        Command::Fetch(args) => run_fetch(&config, args).await,
        Command::Generate(args) => run_generate(&config, args),
    }
}

fn init_logging() -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_timer(UtcTime::rfc_3339())
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::Logging(err.to_string()))
}

async fn run_fetch(config: &Path, args: FetchArgs) -> Result<(), CliError> {
    let FetchArgs {
        data_dir,
        vehicle_types,
        timeout_secs,
    } = args;

    let settings = load_or_default(config)?;
    let data_dir = data_dir.unwrap_or(settings.data_dir);
    let vehicle_types = if vehicle_types.is_empty() {
        settings.vehicle_types
    } else {
        vehicle_types
    };
    let timeout = Duration::from_secs(timeout_secs.unwrap_or(settings.fetch_timeout_secs));

    fetch_wmi_datasets(&data_dir, &vehicle_types, timeout).await?;
    Ok(())
}

fn run_generate(config: &Path, args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs { data_dir, out_dir } = args;

    let settings = load_or_default(config)?;
    let data_dir = data_dir.unwrap_or(settings.data_dir);
    let out_dir = out_dir.unwrap_or(settings.out_dir);

    let countries = read_country_records(&data_dir)?;
    let manufacturers = read_manufacturer_records(&data_dir)?;
    tracing::info!(
        event = "datasets_loaded",
        countries = countries.len(),
        manufacturers = manufacturers.len()
    );

    let timer = Instant::now();
    let options = CompileOptions {
        out_dir,
        country_policy: settings.country_policy,
        manufacturer_policy: settings.manufacturer_policy,
    };
    let result = DictCompiler::new(options).run(&countries, &manufacturers)?;

    tracing::info!(
        event = "generate_finished",
        run_id = %result.report.run_id,
        entries = result.report.dicts.iter().map(|dict| dict.entries).sum::<u64>(),
        duration_ms = timer.elapsed().as_millis() as u64
    );

    Ok(())
}

/// Reads `countries.json`, an object of code ranges to country names.
/// Entry order is preserved so later ranges overwrite earlier ones the
/// same way they are listed in the file.
fn read_country_records(data_dir: &Path) -> Result<Vec<CountryRecord>, CliError> {
    let path = data_dir.join("countries.json");
    let content = std::fs::read_to_string(&path)?;
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)?;

    let mut records = Vec::with_capacity(map.len());
    for (code, value) in map {
        let label = value
            .as_str()
            .ok_or_else(|| CliError::InvalidData(format!("country '{code}' is not a string")))?;
        records.push(CountryRecord {
            code,
            label: label.to_string(),
        });
    }
    Ok(records)
}

/// Reads every cached `WMI_*.json` dataset in file name order.
fn read_manufacturer_records(data_dir: &Path) -> Result<Vec<ManufacturerRecord>, CliError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(data_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with("WMI_") && name.ends_with(".json") {
            paths.push(entry.path());
        }
    }
    paths.sort();

    let mut records = Vec::new();
    for path in &paths {
        let content = std::fs::read_to_string(path)?;
        let response: WmiResponse = serde_json::from_str(&content)?;
        tracing::info!(
            event = "dataset_read",
            path = %path.display(),
            rows = response.results.len()
        );
        records.extend(response.results.into_iter().map(nhtsa::WmiEntry::into_record));
    }
    Ok(records)
}
