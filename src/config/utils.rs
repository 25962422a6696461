// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! This module provides utility functions for working with configuration
//! settings, including validation and schema management.

use anyhow::{Context, Result};
use log::debug;

use super::{Config, ParameterSpec, CONFIG_SCHEMA};
use crate::signal::WaveId;

/// Output the embedded JSON schema to the console.
///
/// This function is called when the `--show-config-schema` flag is provided
/// on the command line.
///
/// # Example
///
/// ```bash
/// ./rust_wave_fixtures --show-config-schema > config_schema.json
/// ```
pub fn output_config_schema() -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

    let formatted_schema =
        serde_json::to_string_pretty(&schema).context("Failed to format JSON schema")?;

    println!("{}", formatted_schema);

    Ok(())
}

/// Validates the configuration against additional rules that aren't covered by the JSON schema.
///
/// # Validation Rules
///
/// - **Tone count**: every wave declares at least one tone
/// - **Bounds**: finite, whole-valued in integer mode
/// - **Ranges**: `low < high` for integer draws (half-open range must be
///   non-empty), `low <= high` for real draws
/// - **Pair**: both waves of `pair` are declared
pub fn validate_specific_rules(config: &Config) -> Result<()> {
    debug!("Performing additional validation checks");

    if config.wave.is_empty() {
        anyhow::bail!("No wave declared in the wave section");
    }

    for (id, spec) in config.wave.iter() {
        if spec.num == 0 {
            anyhow::bail!("Wave {} must declare at least one tone (num >= 1)", id);
        }
        validate_parameter(id, "freq", &spec.freq)?;
        validate_parameter(id, "amp", &spec.amp)?;
        validate_parameter(id, "phase", &spec.phase)?;
    }

    for id in [config.pair.first, config.pair.second] {
        if !config.wave.contains(id) {
            anyhow::bail!(
                "Wave {} selected in pair {} is not declared in the wave section",
                id,
                config.pair
            );
        }
    }

    Ok(())
}

/// Check one parameter range, returning the reason it is unusable
pub fn check_parameter(spec: &ParameterSpec) -> std::result::Result<(), String> {
    if !spec.low.is_finite() || !spec.high.is_finite() {
        return Err(format!(
            "bounds must be finite (low={}, high={})",
            spec.low, spec.high
        ));
    }
    if spec.use_int {
        if spec.low.fract() != 0.0 || spec.high.fract() != 0.0 {
            return Err(format!(
                "integer bounds must be whole numbers (low={}, high={})",
                spec.low, spec.high
            ));
        }
        if spec.low < i64::MIN as f64 || spec.high > i64::MAX as f64 {
            return Err(format!(
                "integer bounds must fit in 64 bits (low={}, high={})",
                spec.low, spec.high
            ));
        }
        if spec.low >= spec.high {
            return Err(format!(
                "integer range [{}, {}) is empty",
                spec.low, spec.high
            ));
        }
    } else if spec.low > spec.high {
        return Err(format!(
            "real range [{}, {}] is empty",
            spec.low, spec.high
        ));
    } else if !(spec.high - spec.low).is_finite() {
        return Err(format!(
            "real range [{}, {}] is too wide",
            spec.low, spec.high
        ));
    }
    Ok(())
}

fn validate_parameter(id: WaveId, name: &str, spec: &ParameterSpec) -> Result<()> {
    check_parameter(spec).map_err(|reason| anyhow::anyhow!("Wave {} {}: {}", id, name, reason))
}
