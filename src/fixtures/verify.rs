// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Consistency checks over a written fixture set
//!
//! Reloads the wave files of a pair and the eight truth signals, then checks
//! the algebraic relations the truth signals must satisfy among themselves and
//! against a re-synthesis of the waves.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use log::debug;

use super::reader::{read_truth_signal, read_wave_from_dir};
use crate::error::FixtureResult;
use crate::signal::{Operation, SampledSignal, TimeBase, WavePair};

/// One failed check
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub check: &'static str,
    pub detail: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.check, self.detail)
    }
}

/// Check the fixtures of `pair` found in the two directories.
///
/// Returns the list of violations, empty when every check passes. I/O and
/// parse failures are returned as errors rather than violations.
pub fn verify_fixtures<P: AsRef<Path>, Q: AsRef<Path>>(
    random_waves_dir: P,
    truth_signals_dir: Q,
    pair: WavePair,
    tolerance: f64,
) -> FixtureResult<Vec<Violation>> {
    let first = read_wave_from_dir(&random_waves_dir, pair.first)?;
    let second = read_wave_from_dir(&random_waves_dir, pair.second)?;

    let mut signals = BTreeMap::new();
    for operation in Operation::ALL {
        signals.insert(operation, read_truth_signal(&truth_signals_dir, operation)?);
    }
    let signal = |operation: Operation| &signals[&operation];

    let mut violations = Vec::new();
    let reference = signal(Operation::Neg0);

    let expected_len = TimeBase::for_pair(&first, &second)?.len();
    for operation in Operation::ALL {
        let current = signal(operation);
        if current.len() != expected_len {
            violations.push(Violation {
                check: "sample count",
                detail: format!(
                    "{} has {} rows, expected {}",
                    operation,
                    current.len(),
                    expected_len
                ),
            });
        } else if current.timestamps != reference.timestamps {
            violations.push(Violation {
                check: "shared time base",
                detail: format!("{} timestamps differ from {}", operation, Operation::Neg0),
            });
        }
    }
    if !violations.is_empty() {
        return Ok(violations);
    }

    let neg0 = &signal(Operation::Neg0).amplitudes;
    let neg1 = &signal(Operation::Neg1).amplitudes;
    let resynthesized = |wave: &crate::signal::Wave| -> Vec<f64> {
        reference
            .timestamps
            .iter()
            .map(|&t| -wave.evaluate(t))
            .collect()
    };

    let mut check_against = |check: &'static str, operation: Operation, expected: Vec<f64>| {
        if let Some(detail) = compare(signal(operation), &expected, tolerance) {
            violations.push(Violation {
                check,
                detail: format!("{}: {}", operation, detail),
            });
        }
    };

    check_against("negation", Operation::Neg0, resynthesized(&first));
    check_against("negation", Operation::Neg1, resynthesized(&second));
    check_against(
        "addition",
        Operation::Add01,
        neg0.iter().zip(neg1).map(|(a, b)| -a - b).collect(),
    );
    check_against(
        "commutativity",
        Operation::Add10,
        signal(Operation::Add01).amplitudes.clone(),
    );
    check_against(
        "subtraction",
        Operation::Sub01,
        neg0.iter().zip(neg1).map(|(a, b)| b - a).collect(),
    );
    check_against(
        "anti-symmetry",
        Operation::Sub10,
        signal(Operation::Sub01).amplitudes.iter().map(|v| -v).collect(),
    );
    check_against(
        "multiplication",
        Operation::Mul01,
        neg0.iter().zip(neg1).map(|(a, b)| a * b).collect(),
    );
    check_against(
        "commutativity",
        Operation::Mul10,
        signal(Operation::Mul01).amplitudes.clone(),
    );

    debug!("Verification finished with {} violations", violations.len());
    Ok(violations)
}

fn compare(actual: &SampledSignal, expected: &[f64], tolerance: f64) -> Option<String> {
    actual
        .amplitudes
        .iter()
        .zip(expected)
        .enumerate()
        .find(|&(_, (&a, &e))| (a - e).abs() > tolerance * e.abs().max(1.0))
        .map(|(row, (a, e))| {
            format!(
                "row {} (t={}) is {}, expected {}",
                row + 1,
                actual.timestamps[row],
                a,
                e
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, OutputConfig};
    use crate::fixtures::write_signal_csv;
    use crate::FixturePipeline;
    use tempfile::tempdir;

    fn generate(root: &Path) -> OutputConfig {
        let output = OutputConfig {
            random_waves_dir: root.join("random_waves"),
            truth_signals_dir: root.join("truth_signals"),
        };
        std::fs::create_dir_all(&output.random_waves_dir).unwrap();
        std::fs::create_dir_all(&output.truth_signals_dir).unwrap();
        let config = Config {
            output: output.clone(),
            ..Config::default()
        };
        FixturePipeline::new(config).run().unwrap();
        output
    }

    #[test]
    fn test_generated_fixtures_pass() {
        let dir = tempdir().unwrap();
        let output = generate(dir.path());

        let violations = verify_fixtures(
            &output.random_waves_dir,
            &output.truth_signals_dir,
            WavePair::default(),
            1e-9,
        )
        .unwrap();
        assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn test_tampered_signal_is_reported() {
        let dir = tempdir().unwrap();
        let output = generate(dir.path());

        let path = output.truth_signals_dir.join("Mul_1_0.csv");
        let mut signal = crate::fixtures::read_signal_csv(&path).unwrap();
        signal.amplitudes[0] += 0.5;
        write_signal_csv(&path, &signal.timestamps, &signal.amplitudes).unwrap();

        let violations = verify_fixtures(
            &output.random_waves_dir,
            &output.truth_signals_dir,
            WavePair::default(),
            1e-9,
        )
        .unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].check, "commutativity");
        assert!(violations[0].detail.starts_with("Mul_1_0"));
    }
}
