// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Delimited text serialization of waves and truth signals

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::{format_value, FIXTURE_EXTENSION, SIGNAL_HEADER, WAVE_HEADER};
use crate::config::OutputConfig;
use crate::error::{FixtureError, FixtureResult};
use crate::signal::{DerivedSignalSet, Wave, WaveId, WaveSet};

/// Writes fixtures into the two output directories.
///
/// Construction checks that both directories exist; the writer never creates
/// them. Files are created or truncated; a failure halfway leaves a truncated
/// file behind.
#[derive(Debug, Clone)]
pub struct FixtureWriter {
    random_waves_dir: PathBuf,
    truth_signals_dir: PathBuf,
}

impl FixtureWriter {
    pub fn new(output: &OutputConfig) -> FixtureResult<Self> {
        ensure_directory(&output.random_waves_dir)?;
        ensure_directory(&output.truth_signals_dir)?;
        Ok(Self {
            random_waves_dir: output.random_waves_dir.clone(),
            truth_signals_dir: output.truth_signals_dir.clone(),
        })
    }

    /// Write one `<id>.csv` per wave, in set order
    pub fn write_waves(&self, waves: &WaveSet) -> FixtureResult<Vec<PathBuf>> {
        waves
            .iter()
            .map(|(id, wave)| -> FixtureResult<PathBuf> {
                let path = self.random_waves_dir.join(wave_file_name(id));
                write_wave_csv(&path, wave)?;
                info!("Wrote wave {} ({} tones) to {}", id, wave.len(), path.display());
                Ok(path)
            })
            .collect()
    }

    /// Write one `<Label>.csv` per derived signal
    pub fn write_derived(&self, derived: &DerivedSignalSet) -> FixtureResult<Vec<PathBuf>> {
        derived
            .iter()
            .map(|(operation, amplitudes)| -> FixtureResult<PathBuf> {
                let path = self.truth_signals_dir.join(operation.file_name());
                write_signal_csv(&path, derived.timestamps(), amplitudes)?;
                info!("Wrote {} ({} samples) to {}", operation, amplitudes.len(), path.display());
                Ok(path)
            })
            .collect()
    }
}

/// File name of a wave parameter file, e.g. `0.csv`
pub fn wave_file_name(id: WaveId) -> String {
    format!("{}.{}", id, FIXTURE_EXTENSION)
}

/// Write `wave` as `freq, amp, phase` rows
pub fn write_wave_csv<P: AsRef<Path>>(path: P, wave: &Wave) -> FixtureResult<()> {
    let path = path.as_ref();
    ensure_extension(path)?;

    let file = File::create(path).map_err(|e| FixtureError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let write = |writer: &mut BufWriter<File>| -> std::io::Result<()> {
        writeln!(writer, "{}", WAVE_HEADER)?;
        for tone in wave.tones() {
            writeln!(
                writer,
                "{},{},{}",
                format_value(tone.frequency),
                format_value(tone.amplitude),
                format_value(tone.phase)
            )?;
        }
        writer.flush()
    };
    write(&mut writer).map_err(|e| FixtureError::io(path, e))?;
    debug!("Wave file {} written", path.display());
    Ok(())
}

/// Write `(timestamp, amplitude)` rows under a `Time, Signal` header.
///
/// # Errors
///
/// * [`FixtureError::InvalidExtension`] unless `path` ends in `.csv`
/// * [`FixtureError::LengthMismatch`] if the two sequences differ in length;
///   nothing is written in that case
pub fn write_signal_csv<P: AsRef<Path>>(
    path: P,
    timestamps: &[f64],
    amplitudes: &[f64],
) -> FixtureResult<()> {
    let path = path.as_ref();
    ensure_extension(path)?;

    if timestamps.len() != amplitudes.len() {
        return Err(FixtureError::LengthMismatch {
            left_name: "times",
            left: timestamps.len(),
            right_name: "signal",
            right: amplitudes.len(),
        });
    }

    let file = File::create(path).map_err(|e| FixtureError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    let write = |writer: &mut BufWriter<File>| -> std::io::Result<()> {
        writeln!(writer, "{}", SIGNAL_HEADER)?;
        for (&t, &s) in timestamps.iter().zip(amplitudes) {
            writeln!(writer, "{}, {}", format_value(t), format_value(s))?;
        }
        writer.flush()
    };
    write(&mut writer).map_err(|e| FixtureError::io(path, e))?;
    debug!("Signal file {} written", path.display());
    Ok(())
}

fn ensure_extension(path: &Path) -> FixtureResult<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext == FIXTURE_EXTENSION => Ok(()),
        _ => Err(FixtureError::InvalidExtension {
            path: path.to_path_buf(),
            expected: FIXTURE_EXTENSION,
        }),
    }
}

/// Fail with [`FixtureError::MissingDirectory`] unless `path` is an existing directory
pub fn ensure_directory<P: AsRef<Path>>(path: P) -> FixtureResult<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        return Err(FixtureError::MissingDirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
