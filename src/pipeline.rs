// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Fixture generation pipeline
//!
//! One sequential pass: configuration → wave parameters → samples →
//! derived signals → files. Output directories are checked before anything is
//! drawn, so a precondition failure never leaves partial output.

use std::path::PathBuf;

use log::info;
use serde::Serialize;

use crate::config::Config;
use crate::error::FixtureResult;
use crate::fixtures::FixtureWriter;
use crate::signal::{
    create_signal_combiner, DerivedSignalSet, SignalCombiner, TimeBase, WavePair, WaveSet,
};
use crate::utility::WaveParameterGenerator;

/// Summary of one generation run
#[derive(Debug, Clone, Serialize)]
pub struct FixtureReport {
    pub seed: u64,
    pub pair: WavePair,
    pub wave_count: usize,
    /// Shared duration of the sampled pair, in seconds
    pub duration: f64,
    /// Shared sample rate of the sampled pair, in Hz
    pub sample_rate: f64,
    pub num_samples: usize,
    pub wave_files: Vec<PathBuf>,
    pub signal_files: Vec<PathBuf>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Truth signals of a wave pair with the time base they were sampled on
#[derive(Debug, Clone)]
pub struct PairSignals {
    pub time_base: TimeBase,
    pub derived: DerivedSignalSet,
}

pub struct FixturePipeline {
    config: Config,
    combiner: Box<dyn SignalCombiner>,
}

impl FixturePipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            combiner: create_signal_combiner(),
        }
    }

    /// Replace the default elementwise combiner
    pub fn with_combiner(mut self, combiner: Box<dyn SignalCombiner>) -> Self {
        self.combiner = combiner;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Draw every configured wave from a fresh stream seeded with the configured seed
    pub fn generate_waves(&self) -> FixtureResult<WaveSet> {
        let mut generator = WaveParameterGenerator::new(self.config.seed);
        generator.generate(&self.config.wave)
    }

    /// Sample the configured pair over its shared time base and derive the truth signals
    pub fn derive(&self, waves: &WaveSet) -> FixtureResult<PairSignals> {
        let (first, second) = waves.pair(self.config.pair)?;
        let time_base = TimeBase::for_pair(first, second)?;

        let s0 = time_base.sample(first);
        let s1 = time_base.sample(second);
        let derived = self.combiner.combine(&s0, &s1)?;

        Ok(PairSignals { time_base, derived })
    }

    /// Run the whole pipeline and write every fixture file
    pub fn run(&self) -> FixtureResult<FixtureReport> {
        let writer = FixtureWriter::new(&self.config.output)?;

        info!("Generating waves with seed {}", self.config.seed);
        let waves = self.generate_waves()?;
        // Fail on an unknown pair before the first file is written
        waves.pair(self.config.pair)?;
        let wave_files = writer.write_waves(&waves)?;

        let PairSignals { time_base, derived } = self.derive(&waves)?;
        info!(
            "Sampling pair {}: duration {} s at {} Hz ({} samples)",
            self.config.pair,
            time_base.duration(),
            time_base.sample_rate(),
            time_base.len()
        );
        let signal_files = writer.write_derived(&derived)?;

        Ok(FixtureReport {
            seed: self.config.seed,
            pair: self.config.pair,
            wave_count: waves.len(),
            duration: time_base.duration(),
            sample_rate: time_base.sample_rate(),
            num_samples: time_base.len(),
            wave_files,
            signal_files,
            generated_at: chrono::Utc::now(),
        })
    }
}
