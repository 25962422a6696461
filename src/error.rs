// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Error type shared by the generator, sampler, combiner and fixture I/O.

use std::path::PathBuf;
use thiserror::Error;

use crate::signal::WaveId;

/// Errors raised while generating, sampling, combining or serializing waves
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Wave {wave} must contain at least one tone")]
    EmptyWave { wave: WaveId },

    #[error("Invalid {parameter} range for wave {wave}: {reason}")]
    InvalidRange {
        wave: WaveId,
        parameter: &'static str,
        reason: String,
    },

    #[error("Wave {wave} not found. Available waves: {available}")]
    WaveNotFound { wave: WaveId, available: String },

    #[error("Cannot derive a time base from frequencies (min {min_frequency}, max {max_frequency})")]
    DegenerateFrequency {
        min_frequency: f64,
        max_frequency: f64,
    },

    #[error("Length mismatch: {left_name} has {left} samples, {right_name} has {right}")]
    LengthMismatch {
        left_name: &'static str,
        left: usize,
        right_name: &'static str,
        right: usize,
    },

    #[error("Signals do not share the same time base")]
    TimeBaseMismatch,

    #[error("File {path:?} must have a .{expected} extension")]
    InvalidExtension { path: PathBuf, expected: &'static str },

    #[error("Output directory {path:?} does not exist or is not a directory")]
    MissingDirectory { path: PathBuf },

    #[error("Failed to parse {path:?} line {line}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FixtureError {
    pub fn exit_code(&self) -> i32 {
        match self {
            FixtureError::EmptyWave { .. } => 2,
            FixtureError::InvalidRange { .. } => 3,
            FixtureError::WaveNotFound { .. } => 4,
            FixtureError::DegenerateFrequency { .. } => 5,
            FixtureError::LengthMismatch { .. } => 6,
            FixtureError::TimeBaseMismatch => 7,
            FixtureError::InvalidExtension { .. } => 8,
            FixtureError::MissingDirectory { .. } => 9,
            FixtureError::Parse { .. } => 10,
            FixtureError::Io { .. } => 11,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FixtureError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type FixtureResult<T> = Result<T, FixtureError>;
