// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management for the fixture generator
//!
//! This module provides functionality for loading, validating, and applying
//! configuration settings for the fixture generator. The configuration
//! is backed by a YAML file and validated against a JSON schema for robustness.
//!
//! ## Configuration Structure
//!
//! - `seed`: seed of the single random stream used for every draw
//! - `wave`: per-wave tone count and parameter ranges, keyed by identifier
//! - `pair`: the two waves sampled and combined into truth signals
//! - `output`: directories receiving the wave and truth signal files
//!
//! ## Usage
//!
//! ```no_run
//! use rust_wave_fixtures::config::Config;
//! use std::path::Path;
//!
//! // Load config from file, creates a default if not found
//! let mut config = Config::from_file(Path::new("fixtures.yaml")).unwrap();
//!
//! // Apply command line overrides if needed
//! config.apply_args(
//!     Some(7),    // Seed
//!     None,       // Random waves directory
//!     None,       // Truth signals directory
//!     None,       // Wave pair
//! );
//!
//! println!("Seed: {}", config.seed);
//! ```

pub mod output;
pub mod utils;
pub mod wave;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::signal::WavePair;

// Re-export all types for public API
pub use output::OutputConfig;
pub use utils::{output_config_schema, validate_specific_rules};
pub use wave::{ParameterSpec, WaveSection, WaveSpec};

/// JSON schema the YAML configuration is validated against
pub const CONFIG_SCHEMA: &str = include_str!("../../resources/config.schema.json");

/// Root configuration structure for the fixture generator.
///
/// # Default Values
///
/// The default configuration is the reference scenario: seed 42 and two
/// three-tone waves with integer frequencies in `[1, 5)`, real amplitudes in
/// `[0.1, 1.0]` and real phases in `[0, 6.28]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Seed of the random stream.
    ///
    /// The same seed and wave section always produce bit-identical waves.
    pub seed: u64,

    /// Wave specifications, in the order their parameters are drawn.
    pub wave: WaveSection,

    /// Waves sampled and combined into truth signals.
    ///
    /// Defaults to waves `0` and `1`.
    #[serde(default)]
    pub pair: WavePair,

    /// Output directories. If not specified, default values are used.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        let reference_wave = || WaveSpec {
            num: 3,
            freq: ParameterSpec::int(1, 5),
            amp: ParameterSpec::real(0.1, 1.0),
            phase: ParameterSpec::real(0.0, 6.28),
        };
        Self {
            seed: 42,
            wave: WaveSection::new()
                .with_wave(0, reference_wave())
                .with_wave(1, reference_wave()),
            pair: WavePair::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Helper method to create a sample config file when validation fails
    fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let sample_path = path.with_extension("sample.yaml");
        debug!("Original path: {:?}, Sample path: {:?}", path, sample_path);

        if let Some(parent) = sample_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating parent directory: {:?}", parent);
                std::fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create parent directory for sample config at {:?}",
                        parent
                    )
                })?;
            }
        }

        Self::default()
            .save_to_file(&sample_path)
            .with_context(|| format!("Failed to save sample config to {:?}", sample_path))?;

        error!(
            "Sample configuration file created at {:?}\nPlease edit and rename it",
            sample_path
        );
        Ok(())
    }

    /// Load configuration from a file
    ///
    /// A missing file is replaced by the default configuration, which is
    /// written to `path` and returned. An invalid file fails the load and
    /// leaves a `<name>.sample.yaml` with default values next to it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "Configuration file not found at {:?}, creating default",
                path
            );
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;

        Self::from_yaml_str(&contents).map_err(|err| {
            error!("Invalid configuration in {}", path.display());
            // We generate a <name>.sample.yaml file with the default values
            // for the user to edit
            if let Err(sample_err) = Self::create_sample_config(path) {
                error!("Failed to create sample config: {}", sample_err);
            }
            err
        })
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        // First step: convert YAML to a generic Value
        let yaml_value: serde_yml::Value =
            serde_yml::from_str(contents).context("Failed to parse YAML configuration")?;

        // Convert to JSON Value for validation
        let json_value = serde_json::to_value(&yaml_value)
            .context("Failed to convert YAML to JSON for validation")?;

        let schema: serde_json::Value =
            serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

        let validator = jsonschema::draft202012::options()
            .should_validate_formats(true)
            .build(&schema)?;

        debug!("Validating configuration against schema");
        if let Err(error) = validator.validate(&json_value) {
            error!("Configuration validation error before deserialization");
            anyhow::bail!("Configuration validation failed: {}", error);
        }

        debug!("Schema validation passed, deserializing into Config structure");
        let config: Config = serde_yml::from_str(contents).map_err(|err| {
            error!("Configuration deserialization error: {}", err);
            anyhow::anyhow!("Failed to deserialize configuration: {}", err)
        })?;

        if let Err(err) = validate_specific_rules(&config) {
            error!("Configuration specific validation error: {}", err);
            return Err(err);
        }

        Ok(config)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml =
            serde_yml::to_string(self).context("Failed to serialize configuration to YAML")?;

        let mut file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create config file at {:?}", path.as_ref()))?;

        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Apply command line arguments to override configuration values.
    ///
    /// Only values that are explicitly provided override the configuration.
    ///
    /// # Parameters
    ///
    /// * `seed` - Seed of the random stream
    /// * `random_waves_dir` - Directory for the wave parameter files
    /// * `truth_signals_dir` - Directory for the truth signal files
    /// * `pair` - Waves sampled and combined
    pub fn apply_args(
        &mut self,
        seed: Option<u64>,
        random_waves_dir: Option<PathBuf>,
        truth_signals_dir: Option<PathBuf>,
        pair: Option<WavePair>,
    ) {
        if let Some(seed) = seed {
            debug!("Overriding seed from command line: {}", seed);
            self.seed = seed;
        }
        if let Some(dir) = random_waves_dir {
            debug!("Overriding random waves directory from command line: {:?}", dir);
            self.output.random_waves_dir = dir;
        }
        if let Some(dir) = truth_signals_dir {
            debug!("Overriding truth signals directory from command line: {:?}", dir);
            self.output.truth_signals_dir = dir;
        }
        if let Some(pair) = pair {
            debug!("Overriding wave pair from command line: {}", pair);
            self.pair = pair;
        }
    }
}
