#![forbid(unsafe_code)]
//! servesim: generate synthetic robot-restaurant service logs
//!
//! Builds a generator configuration (the preset week or a JSON file),
//! runs it and writes the log as pretty-printed JSON to a file or stdout.
//! Per-day outcomes go to the tracing subscriber on stderr, so piping
//! stdout still yields clean JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use servesim_core::{GeneratorConfig, LogGenerator, LogOrdering, PlacementPolicy};

/// servesim: service log generator for the robot restaurant
#[derive(Parser)]
#[command(name = "servesim")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a service log and write it as JSON
    Generate {
        /// configuration file (json); defaults to the preset week
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// RNG seed, overriding the configuration
        #[arg(long)]
        seed: Option<u64>,

        /// output file; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// sort the log by calendar order instead of date-string order
        #[arg(long)]
        chronological: bool,

        /// keep hourly volume within the drawn targets (no trailing singles)
        #[arg(long)]
        grouped_only: bool,
    },
    /// Write the preset week's configuration as JSON, ready for editing
    Preset {
        /// output file; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // Summaries go to stderr; stdout carries only the JSON document
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Commands::Generate {
            config,
            seed,
            out,
            chronological,
            grouped_only,
        } => {
            let mut config = load_config(config)?;
            if let Some(seed) = seed {
                config.seed = seed;
            }
            if chronological {
                config.ordering = LogOrdering::Chronological;
            }
            if grouped_only {
                config.trips.placement = PlacementPolicy::Grouped;
            }

            let mut generator = LogGenerator::new(config).context("validating configuration")?;
            let log = generator.generate();

            for day in &log.days {
                tracing::info!(
                    date = %day.date,
                    orders = day.records,
                    target = day.target,
                    shortfall = day.shortfall,
                    attempts = day.attempts,
                    "day generated"
                );
            }
            tracing::info!(
                orders = log.orders().count(),
                faults = log.faults().count(),
                "week complete"
            );

            let json =
                serde_json::to_string_pretty(&log.records).context("serializing the log")?;
            write_output(out, &json, "log")
        }
        Commands::Preset { out } => {
            let json = serde_json::to_string_pretty(&GeneratorConfig::sample_week())
                .context("serializing the preset configuration")?;
            write_output(out, &json, "preset")
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("reading configuration {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing configuration {}", path.display()))
        }
        None => Ok(GeneratorConfig::sample_week()),
    }
}

fn write_output(out: Option<PathBuf>, json: &str, what: &str) -> Result<()> {
    if let Some(path) = out {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("{} written to {}", what, path.display());
    } else {
        println!("{}", json);
    }
    Ok(())
}
