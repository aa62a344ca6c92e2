//! CLI entry point for the gradebook ingest tool.
//!
//! Fetches a published grade sheet (or reads a local export), turns it into
//! typed grade records, and prints them, a per-subject summary for one user,
//! or parse diagnostics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gradebook_ingest::{
    analyzers::aggregate::{records_for_user, summarize_subjects},
    config::IngestConfig,
    fetch::{BasicClient, fetch_text},
    infra::{demo::DemoSource, sheets::SheetsClient},
    output::{append_records, to_json, write_csv},
    parser::{parse_grades, parse_with_report},
    records::GradeRecord,
    services::gradebook::{GradebookSource, Provenance, load_or_fallback},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gradebook_ingest")]
#[command(about = "Turns a published grade sheet into typed grade records", long_about = None)]
struct Cli {
    /// JSON file overriding the sheet layout (falls back to GRADEBOOK_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a sheet export and print every record
    Parse {
        /// Path to file or URL to fetch (falls back to GRADEBOOK_URL)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Only print records for this user id
        #[arg(short, long)]
        user: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// CSV file to append records to instead of printing
        #[arg(short, long)]
        output: Option<String>,

        /// Substitute demonstration data when the sheet cannot be fetched
        #[arg(long, default_value_t = false)]
        demo_on_error: bool,
    },
    /// Print per-subject averages and marker counts for one user
    Summary {
        /// Path to file or URL to fetch (falls back to GRADEBOOK_URL)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// User id to summarize
        #[arg(short, long)]
        user: String,
    },
    /// Report what the parser dropped, per block
    Diagnose {
        /// Path to file or URL to fetch (falls back to GRADEBOOK_URL)
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/gradebook_ingest.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gradebook_ingest.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .or_else(|| std::env::var("GRADEBOOK_CONFIG").ok());
    let config = IngestConfig::load_or_default(config_path.as_deref())?;

    if let Err(e) = run(cli.command, config).await {
        error!(error = %e, "Command failed");
        return Err(e);
    }

    Ok(())
}

async fn run(command: Commands, config: IngestConfig) -> Result<()> {
    match command {
        Commands::Parse {
            source,
            user,
            format,
            output,
            demo_on_error,
        } => {
            let source = resolve_source(source)?;
            let records = load_records(&source, config, demo_on_error).await?;
            let records: Vec<GradeRecord> = match &user {
                Some(id) => records_for_user(&records, id).into_iter().cloned().collect(),
                None => records,
            };
            info!(records = records.len(), "Records ready");

            match (output, format) {
                (Some(path), _) => append_records(&path, &records)?,
                (None, Format::Csv) => write_csv(std::io::stdout().lock(), &records)?,
                (None, Format::Json) => println!("{}", to_json(&records)?),
            }
        }
        Commands::Summary { source, user } => {
            let source = resolve_source(source)?;
            let records = load_records(&source, config, false).await?;
            let summaries = summarize_subjects(&records, &user);
            if summaries.is_empty() {
                warn!(user = %user, "No records for user");
            }
            println!("{}", to_json(&summaries)?);
        }
        Commands::Diagnose { source } => {
            let source = resolve_source(source)?;
            let text = fetcher(&source).await?;
            let outcome = parse_with_report(&text, &config);
            info!(
                records = outcome.stats.total_records,
                recognized_pct = outcome.stats.recognized_pct(),
                skipped_blocks = outcome.stats.skipped_blocks.len(),
                "Diagnostics"
            );
            println!("{}", to_json(&outcome.stats)?);
        }
    }

    Ok(())
}

fn resolve_source(source: Option<String>) -> Result<String> {
    source
        .or_else(|| std::env::var("GRADEBOOK_URL").ok())
        .context("no FILE_OR_URL given and GRADEBOOK_URL is not set")
}

/// Loads records from a URL through [`SheetsClient`], or parses a local file.
#[tracing::instrument(skip(config))]
async fn load_records(
    source: &str,
    config: IngestConfig,
    demo_on_error: bool,
) -> Result<Vec<GradeRecord>> {
    if !source.starts_with("http") {
        let text = fetcher(source).await?;
        return Ok(parse_grades(&text, &config));
    }

    let sheets = SheetsClient::new(BasicClient::new(), source, config);
    if demo_on_error {
        let (records, provenance) = load_or_fallback(&sheets, &DemoSource).await?;
        if provenance == Provenance::Demo {
            warn!("Showing demonstration data");
        }
        Ok(records)
    } else {
        Ok(sheets.load().await?)
    }
}

/// Loads sheet text from a local file path or fetches it over HTTP.
#[tracing::instrument]
async fn fetcher(source: &str) -> Result<String> {
    let text = if source.starts_with("http") {
        let client = BasicClient::new();
        fetch_text(&client, source).await?
    } else {
        std::fs::read_to_string(source).with_context(|| format!("reading '{source}'"))?
    };
    Ok(text)
}
