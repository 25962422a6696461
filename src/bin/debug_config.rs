// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Print the effective configuration and the time base it leads to,
// without writing any fixture.

use anyhow::Result;
use clap::Parser;
use rust_wave_fixtures::config::Config;
use rust_wave_fixtures::FixturePipeline;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "debug_config")]
#[command(about = "Show the effective fixture configuration", long_about = None)]
struct Args {
    /// Configuration file (YAML)
    #[arg(short, long, default_value = "fixtures.yaml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Testing file: {:?}", args.config);
    println!("File exists: {}", args.config.exists());

    let config = Config::from_file(&args.config)?;
    println!("{}", serde_yml::to_string(&config)?);

    let pipeline = FixturePipeline::new(config);
    let waves = pipeline.generate_waves()?;
    for (id, wave) in waves.iter() {
        println!(
            "Wave {}: {} tones, |freq| in [{}, {}]",
            id,
            wave.len(),
            wave.min_abs_frequency(),
            wave.max_abs_frequency()
        );
    }

    let signals = pipeline.derive(&waves)?;
    println!(
        "Pair {}: duration {} s, sample rate {} Hz, {} samples",
        pipeline.config().pair,
        signals.time_base.duration(),
        signals.time_base.sample_rate(),
        signals.time_base.len()
    );

    Ok(())
}
