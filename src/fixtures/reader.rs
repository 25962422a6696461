// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Loading of previously written fixtures
//!
//! Used by the verification tool and by consumers comparing their own output
//! with the truth signals. The generation pipeline never reads its own files.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{writer::wave_file_name, SIGNAL_HEADER, WAVE_HEADER};
use crate::error::{FixtureError, FixtureResult};
use crate::signal::{Operation, SampledSignal, Tone, Wave, WaveId};

/// Load a `freq, amp, phase` wave file
pub fn read_wave_csv<P: AsRef<Path>>(path: P, id: WaveId) -> FixtureResult<Wave> {
    let path = path.as_ref();
    let rows = read_rows(path, WAVE_HEADER, 3)?;
    let tones = rows
        .into_iter()
        .map(|row| Tone::new(row[0], row[1], row[2]))
        .collect();
    debug!("Loaded wave {} from {}", id, path.display());
    Wave::from_tones(id, tones)
}

/// Load a `Time, Signal` truth signal file
pub fn read_signal_csv<P: AsRef<Path>>(path: P) -> FixtureResult<SampledSignal> {
    let path = path.as_ref();
    let rows = read_rows(path, SIGNAL_HEADER, 2)?;
    let (timestamps, amplitudes) = rows.into_iter().map(|row| (row[0], row[1])).unzip();
    SampledSignal::new(timestamps, amplitudes)
}

/// Load wave `id` from a random waves directory
pub fn read_wave_from_dir<P: AsRef<Path>>(dir: P, id: WaveId) -> FixtureResult<Wave> {
    read_wave_csv(dir.as_ref().join(wave_file_name(id)), id)
}

/// Load the truth signal of `operation` from a truth signals directory
pub fn read_truth_signal<P: AsRef<Path>>(dir: P, operation: Operation) -> FixtureResult<SampledSignal> {
    read_signal_csv(dir.as_ref().join(operation.file_name()))
}

fn read_rows(path: &Path, header: &str, arity: usize) -> FixtureResult<Vec<Vec<f64>>> {
    let contents = fs::read_to_string(path).map_err(|e| FixtureError::io(path, e))?;
    let parse_error = |line: usize, reason: String| FixtureError::Parse {
        path: PathBuf::from(path),
        line,
        reason,
    };

    let mut lines = contents.lines().enumerate();
    match lines.next() {
        Some((_, first)) if normalize(first) == normalize(header) => {}
        Some((_, first)) => {
            return Err(parse_error(
                1,
                format!("expected header '{}', found '{}'", header, first),
            ))
        }
        None => return Err(parse_error(1, "empty file".to_string())),
    }

    let mut rows = Vec::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let values = line
            .split(',')
            .map(|field| {
                field
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| parse_error(index + 1, format!("'{}': {}", field.trim(), e)))
            })
            .collect::<FixtureResult<Vec<f64>>>()?;
        if values.len() != arity {
            return Err(parse_error(
                index + 1,
                format!("expected {} columns, found {}", arity, values.len()),
            ));
        }
        rows.push(values);
    }
    Ok(rows)
}

// Header comparison ignores spacing around the delimiters
fn normalize(header: &str) -> String {
    header
        .split(',')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(",")
}
