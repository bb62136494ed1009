//! plist-melt: Flatten a property-list library export into CSV
//!
//! Usage:
//!   # Read from file, output to stdout
//!   plist-melt "iTunes Music Library.xml" > tracks.csv
//!
//!   # Read from stdin
//!   cat Library.xml | plist-melt
//!
//!   # Pick other columns and write to a file
//!   plist-melt Library.xml --fields "Name,Artist,Play Count" -o tracks.csv

// Use MiMalloc allocator for better performance
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use plist_melt::{melt_plist, MeltConfig};
use std::fs::File;
use std::io::{stdin, BufRead, BufReader, BufWriter, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "plist-melt")]
#[command(about = "Flatten a property-list library into CSV rows", long_about = None)]
struct Args {
    /// Input file (use stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Comma-separated fields to export, in column order
    #[arg(long)]
    fields: Option<String>,

    /// JSON config file; command-line flags override it
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Output file (stdout if omitted)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<String>,

    /// Print a progress line every N elements (0 disables)
    #[arg(long, value_name = "N")]
    progress_every: Option<u64>,

    /// No progress lines
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Print a JSON summary of the run to stderr
    #[arg(long)]
    stats: bool,

    /// Debug logging on stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "plist_melt=debug" } else { "plist_melt=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    // Build config
    let mut config = match &args.config {
        Some(path) => MeltConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => MeltConfig::default(),
    };
    if let Some(fields) = &args.fields {
        config = config.with_fields_list(fields);
    }
    if let Some(every) = args.progress_every {
        config.progress_interval = every;
    }
    if args.quiet {
        config.progress_interval = 0;
    }
    config.validate()?;

    // Open input before touching the output so a bad path writes nothing
    let reader: Box<dyn BufRead> = if let Some(file_path) = &args.input {
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open input: {}", file_path))?;
        Box::new(BufReader::new(file))
    } else {
        Box::new(BufReader::new(stdin()))
    };

    let writer: Box<dyn Write> = if let Some(path) = &args.output {
        let file =
            File::create(path).with_context(|| format!("Failed to create output: {}", path))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(std::io::stdout().lock())
    };

    tracing::debug!(fields = ?config.fields, section = %config.tracked_section, "starting melt");

    let stats = melt_plist(reader, writer, std::io::stderr(), &config)
        .context("Failed to convert input")?;

    if args.stats {
        eprintln!("{}", serde_json::to_string(&stats)?);
    }

    Ok(())
}
