//! ALT Reliability - Accelerated Life Test reliability engine
//!
//! Reads calculation requests as JSON and writes the response JSON to stdout.
//! Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Single request from a file (or stdin when --input is omitted)
//! alt-reliability calculate --input request.json --pretty
//!
//! # Many requests: a JSON array or one request per line
//! alt-reliability batch --input requests.jsonl
//!
//! # Inspect configuration
//! alt-reliability config show
//! alt-reliability config check --file reliability.toml
//! ```
//!
//! # Environment Variables
//!
//! - `ALT_RELIABILITY_CONFIG`: Path to a TOML configuration file
//! - `RUST_LOG`: Logging level (default: info)

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{error, info, warn};

use alt_reliability::config::{self, ReliabilityConfig};
use alt_reliability::engine::calculate_value;
use alt_reliability::CalculationResponse;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "alt-reliability")]
#[command(about = "Accelerated Life Test reliability engine")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML configuration file (overrides ALT_RELIABILITY_CONFIG)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Evaluate one request
    Calculate {
        /// Request JSON file; reads stdin when omitted
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Pretty-print the response
        #[arg(long)]
        pretty: bool,
    },
    /// Evaluate many requests in parallel, writing one response per line
    Batch {
        /// JSON array of requests, or one request per line
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Validate a configuration file and report warnings
    Check {
        #[arg(long)]
        file: PathBuf,
    },
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.log_json);

    if let SubCommand::Config {
        action: ConfigAction::Check { file },
    } = &args.command
    {
        return check_config(file);
    }

    let cfg = match &args.config {
        Some(path) => ReliabilityConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ReliabilityConfig::load(),
    };
    config::init(cfg);
    let cfg = config::get();

    match args.command {
        SubCommand::Calculate { input, pretty } => {
            let doc = read_input(input.as_deref())?;
            let value: Value = serde_json::from_str(&doc).context("Request is not valid JSON")?;
            let response = calculate_value(value, cfg);
            if response.is_error() {
                warn!(error = ?response.error, "Calculation returned an error response");
            }
            write_response(&response, pretty)?;
        }
        SubCommand::Batch { input } => {
            let doc = read_input(input.as_deref())?;
            let requests = parse_batch(&doc)?;
            info!(count = requests.len(), "Evaluating batch");

            // Output order follows input order.
            let responses: Vec<CalculationResponse> = requests
                .into_par_iter()
                .map(|value| calculate_value(value, cfg))
                .collect();

            let failed = responses.iter().filter(|r| r.is_error()).count();
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for response in &responses {
                serde_json::to_writer(&mut out, response)?;
                writeln!(out)?;
            }
            info!(count = responses.len(), failed, "Batch complete");
        }
        SubCommand::Config { action: ConfigAction::Show } => {
            print!("{}", cfg.to_toml()?);
        }
        SubCommand::Config { action: ConfigAction::Check { .. } } => {}
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => fs::read_to_string(p).with_context(|| format!("Failed to read {}", p.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            Ok(buf)
        }
    }
}

/// A JSON array of requests, or JSON Lines.
fn parse_batch(doc: &str) -> Result<Vec<Value>> {
    let trimmed = doc.trim_start();
    if trimmed.starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(trimmed).context("Batch array is not valid JSON")?;
        return Ok(values);
    }
    doc.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("Batch line {} is not valid JSON", i + 1))
        })
        .collect()
}

fn write_response(response: &CalculationResponse, pretty: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, response)?;
    } else {
        serde_json::to_writer(&mut out, response)?;
    }
    writeln!(out)?;
    Ok(())
}

fn check_config(path: &Path) -> Result<()> {
    match ReliabilityConfig::load_from_file(path) {
        // Unknown keys and suspicious values were already logged while loading.
        Ok(cfg) => {
            info!(path = %path.display(), tiers = cfg.benchmarks.tiers.len(), "Configuration is valid");
            Ok(())
        }
        Err(e) => {
            error!(path = %path.display(), "{}", e);
            Err(e).context("Configuration check failed")
        }
    }
}
