// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//! Fixture verification utility
//!
//! This binary tool reloads a written fixture set and checks it for consistency:
//! 1. Every truth signal shares the same timestamps and sample count
//! 2. `Neg_0` and `Neg_1` match a re-synthesis of the wave parameter files
//! 3. Sums and products are commutative, differences are anti-symmetric
//!
//! It exits with a non-zero status when any check fails.

use clap::{ArgAction, Parser};
use rust_wave_fixtures::fixtures::verify_fixtures;
use rust_wave_fixtures::signal::WavePair;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "verify_fixtures")]
#[command(version = "1.0")]
#[command(about = "Check a fixture set for internal consistency", long_about = None)]
struct Args {
    /// Directory holding the wave parameter files
    #[arg(short, long, default_value = "test_data/random_waves")]
    waves_dir: PathBuf,

    /// Directory holding the truth signal files
    #[arg(short, long, default_value = "test_data/truth_signals")]
    signals_dir: PathBuf,

    /// Waves the truth signals were derived from
    #[arg(
        long,
        num_args = 2,
        value_names = ["FIRST", "SECOND"],
        default_values_t = [0, 1],
        action = ArgAction::Set
    )]
    pair: Vec<u32>,

    /// Relative tolerance for value comparisons
    #[arg(short, long, default_value_t = 1e-9)]
    tolerance: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.pair.len() != 2 {
        return Err("--pair takes exactly two wave identifiers".into());
    }
    let pair = WavePair::new(args.pair[0], args.pair[1]);

    println!(
        "Verifying pair {} in {:?} and {:?}",
        pair, args.waves_dir, args.signals_dir
    );
    let violations = verify_fixtures(&args.waves_dir, &args.signals_dir, pair, args.tolerance)?;

    if violations.is_empty() {
        println!("All checks passed");
        return Ok(());
    }

    for violation in &violations {
        eprintln!("FAILED {}", violation);
    }
    eprintln!("{} check(s) failed", violations.len());
    std::process::exit(1);
}
