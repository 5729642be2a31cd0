// src/main.rs
mod document;
mod extractors;
mod profile;
mod storage;
mod utils;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use extractors::{ProfileParser, SectionSegmenter};
use storage::ProfileStore;
use utils::AppError;

const OUTPUT_DIR_ENV: &str = "PROFILE_OUTPUT_DIR";
const DEFAULT_OUTPUT_DIR: &str = "./output";

/// Command Line Interface for the LinkedIn profile parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse an exported profile (PDF or text) and print it as JSON
    Parse {
        /// Path to the exported profile document
        input: PathBuf,

        /// Directory for stored profiles and debug output (falls back to $PROFILE_OUTPUT_DIR, then ./output)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Persist the parsed profile and report its id
        #[arg(short, long)]
        store: bool,

        /// Debug mode - save the raw text and annotated sections
        #[arg(short, long)]
        debug: bool,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },
    /// Print a previously stored profile
    Show {
        /// Identifier returned by `parse --store`
        id: String,

        /// Directory holding stored profiles (falls back to $PROFILE_OUTPUT_DIR, then ./output)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Print the flattened text summary instead of the JSON record
        #[arg(long)]
        summary: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting with args: {:?}", args);

    match args.command {
        Command::Parse { input, output_dir, store, debug, pretty } => {
            run_parse(&input, output_dir, store, debug, pretty).await
        }
        Command::Show { id, output_dir, summary } => {
            let output_dir = resolve_output_dir(output_dir)?;
            run_show(&id, &output_dir, summary)
        }
    }
}

/// Command-line value first, then the environment, then the default.
fn resolve_output_dir(arg: Option<PathBuf>) -> Result<PathBuf, AppError> {
    if let Some(dir) = arg {
        tracing::debug!("Using output dir {} from command-line argument", dir.display());
        return Ok(dir);
    }
    match std::env::var(OUTPUT_DIR_ENV) {
        Ok(dir) if dir.trim().is_empty() => Err(AppError::Config(format!("{} is set but empty", OUTPUT_DIR_ENV))),
        Ok(dir) => {
            tracing::debug!("Using output dir {} from {}", dir, OUTPUT_DIR_ENV);
            Ok(PathBuf::from(dir))
        }
        Err(_) => Ok(PathBuf::from(DEFAULT_OUTPUT_DIR)),
    }
}

async fn run_parse(input: &Path, output_dir: Option<PathBuf>, store: bool, debug: bool, pretty: bool) -> Result<(), AppError> {
    // The output dir is only needed when something gets written to it.
    let output_dir = if store || debug { Some(resolve_output_dir(output_dir)?) } else { None };

    // Acquisition failures abort the whole parse; nothing partial is emitted.
    let text = document::read_document(input).await?;

    let sections = SectionSegmenter::new().segment(&text);
    if let (true, Some(output_dir)) = (debug, &output_dir) {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let debug_dir = output_dir.join("debug").join(stem);
        if let Err(e) = utils::debug_dump::write_debug_dump(&debug_dir, &text, &sections) {
            tracing::warn!("Failed to write debug dump: {}", e);
        }
    }

    let record = ProfileParser::new().build_record(&sections);
    tracing::info!("Populated sections: {:?}", record.populated_sections());

    let json = record
        .to_pruned_json()
        .map_err(|e| AppError::Processing(format!("Failed to serialize profile: {}", e)))?;
    let rendered = if pretty { serde_json::to_string_pretty(&json) } else { serde_json::to_string(&json) };
    let rendered = rendered.map_err(|e| AppError::Processing(format!("Failed to render profile: {}", e)))?;
    println!("{}", rendered);

    if let (true, Some(output_dir)) = (store, &output_dir) {
        let profile_store = ProfileStore::new(output_dir)?;
        let stored = profile_store.save(&record)?;
        tracing::info!("Stored profile id: {} ({})", stored.id, stored.dir.display());
    }

    Ok(())
}

fn run_show(id: &str, output_dir: &Path, summary: bool) -> Result<(), AppError> {
    let profile_store = ProfileStore::new(output_dir)?;

    if summary {
        println!("{}", profile_store.load_summary(id)?);
        return Ok(());
    }

    let record = profile_store.load(id)?;
    let json = record
        .to_pruned_json()
        .map_err(|e| AppError::Processing(format!("Failed to serialize profile: {}", e)))?;
    let rendered = serde_json::to_string_pretty(&json)
        .map_err(|e| AppError::Processing(format!("Failed to render profile: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
