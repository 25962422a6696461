// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Main entry point for the wave fixture generator

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{debug, error};
use std::path::{Path, PathBuf};
use std::process;

use rust_wave_fixtures::config::{self, Config};
use rust_wave_fixtures::signal::WavePair;
use rust_wave_fixtures::{FixtureError, FixturePipeline};

/// Deterministic multi-tone wave and truth signal generator
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML), created with default values if missing
    #[arg(short, long, value_name = "FILE", default_value = "fixtures.yaml")]
    config: PathBuf,

    /// Override the random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the directory receiving the wave parameter files
    #[arg(long, value_name = "DIR")]
    waves_dir: Option<PathBuf>,

    /// Override the directory receiving the truth signal files
    #[arg(long, value_name = "DIR")]
    signals_dir: Option<PathBuf>,

    /// Waves to sample and combine (default: 0 1), given at most once
    #[arg(long, num_args = 2, value_names = ["FIRST", "SECOND"], action = ArgAction::Set)]
    pair: Option<Vec<u32>>,

    /// Write a JSON report of the run to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    show_config_schema: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<FixtureError>()
            .map(FixtureError::exit_code)
            .unwrap_or(1);
        process::exit(code);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    if args.show_config_schema {
        return config::output_config_schema();
    }

    let mut config = Config::from_file(&args.config)?;

    // Relative output directories are relative to the configuration file
    let base = args
        .config
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    config.output = config.output.resolve(base);
    debug!("Output directories resolved against {:?}", base);

    let pair = args
        .pair
        .as_deref()
        .map(|ids| WavePair::new(ids[0], ids[1]));
    config.apply_args(args.seed, args.waves_dir, args.signals_dir, pair);
    config::validate_specific_rules(&config)?;

    let report = FixturePipeline::new(config).run()?;

    println!("Wave fixtures");
    println!("-------------");
    println!("Seed: {}", report.seed);
    println!("Pair: {}", report.pair);
    println!(
        "Duration: {} s, sample rate: {} Hz, {} samples",
        report.duration, report.sample_rate, report.num_samples
    );
    for path in report.wave_files.iter().chain(&report.signal_files) {
        println!("  {}", path.display());
    }

    if let Some(report_path) = args.report {
        println!("Saving report to: {}", report_path.display());
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        std::fs::write(&report_path, json)
            .with_context(|| format!("Failed to write report to {:?}", report_path))?;
    }

    Ok(())
}
