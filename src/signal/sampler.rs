// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Waveform sampler
//!
//! Evaluates waves over a shared time base. The time base of a wave pair is
//! derived from the frequency content of both waves:
//!
//! ```text
//! duration    = 2 / min(|freq|)      (two cycles of the slowest tone)
//! sample_rate = 2 × max(|freq|)      (Nyquist-style rate, not oversampled)
//! n           = round(duration × sample_rate)
//! ```
//!
//! Timestamps are `n` evenly spaced values over `[0, duration]`, both ends
//! included. The rate gives no anti-aliasing guarantee; the downstream
//! consumers are validated against these exact values, so the heuristic is
//! kept as is.

use log::debug;
use serde::Serialize;

use super::Wave;
use crate::error::{FixtureError, FixtureResult};

/// Timestamps and amplitudes of one wave evaluated over a time base
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledSignal {
    pub timestamps: Vec<f64>,
    pub amplitudes: Vec<f64>,
}

impl SampledSignal {
    /// Pair up timestamps and amplitudes.
    ///
    /// # Errors
    ///
    /// [`FixtureError::LengthMismatch`] if the two sequences differ in length.
    pub fn new(timestamps: Vec<f64>, amplitudes: Vec<f64>) -> FixtureResult<Self> {
        if timestamps.len() != amplitudes.len() {
            return Err(FixtureError::LengthMismatch {
                left_name: "timestamps",
                left: timestamps.len(),
                right_name: "amplitudes",
                right: amplitudes.len(),
            });
        }
        Ok(Self {
            timestamps,
            amplitudes,
        })
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Shared duration, rate and timestamps for a pair of waves
#[derive(Debug, Clone, PartialEq)]
pub struct TimeBase {
    duration: f64,
    sample_rate: f64,
    timestamps: Vec<f64>,
}

impl TimeBase {
    /// Build a time base from an explicit duration and rate
    pub fn new(duration: f64, sample_rate: f64) -> FixtureResult<Self> {
        let num_samples = num_samples(duration, sample_rate)?;
        Ok(Self {
            duration,
            sample_rate,
            timestamps: linspace(duration, num_samples),
        })
    }

    /// Time base covering two cycles of the slowest tone of `a` and `b`,
    /// sampled at twice their fastest tone
    pub fn for_pair(a: &Wave, b: &Wave) -> FixtureResult<Self> {
        let time_base = Self::new(duration(a, b)?, sample_rate(a, b)?)?;
        debug!(
            "Time base: duration={} s, sample_rate={} Hz, {} samples",
            time_base.duration,
            time_base.sample_rate,
            time_base.len()
        );
        Ok(time_base)
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Evaluate `wave` at every timestamp of this time base
    pub fn sample(&self, wave: &Wave) -> SampledSignal {
        let amplitudes = self.timestamps.iter().map(|&t| wave.evaluate(t)).collect();
        SampledSignal {
            timestamps: self.timestamps.clone(),
            amplitudes,
        }
    }
}

/// `2 / min(|freq|)` over the tones of both waves
pub fn duration(a: &Wave, b: &Wave) -> FixtureResult<f64> {
    let (min_frequency, max_frequency) = frequency_extremes(a, b);
    let duration = 2.0 / min_frequency;
    if min_frequency == 0.0 || !duration.is_finite() {
        return Err(FixtureError::DegenerateFrequency {
            min_frequency,
            max_frequency,
        });
    }
    Ok(duration)
}

/// `2 × max(|freq|)` over the tones of both waves
pub fn sample_rate(a: &Wave, b: &Wave) -> FixtureResult<f64> {
    let (min_frequency, max_frequency) = frequency_extremes(a, b);
    let rate = 2.0 * max_frequency;
    if rate == 0.0 || !rate.is_finite() {
        return Err(FixtureError::DegenerateFrequency {
            min_frequency,
            max_frequency,
        });
    }
    Ok(rate)
}

/// Sample `wave` over `[0, duration]` with `round(duration × rate)` points
pub fn sample(wave: &Wave, duration: f64, rate: f64) -> FixtureResult<SampledSignal> {
    Ok(TimeBase::new(duration, rate)?.sample(wave))
}

fn frequency_extremes(a: &Wave, b: &Wave) -> (f64, f64) {
    (
        a.min_abs_frequency().min(b.min_abs_frequency()),
        a.max_abs_frequency().max(b.max_abs_frequency()),
    )
}

// Round half to even, matching the reference fixtures
fn num_samples(duration: f64, sample_rate: f64) -> FixtureResult<usize> {
    let count = (duration * sample_rate).round_ties_even();
    if !count.is_finite() || count < 0.0 {
        return Err(FixtureError::DegenerateFrequency {
            min_frequency: 2.0 / duration,
            max_frequency: sample_rate / 2.0,
        });
    }
    Ok(count as usize)
}

fn linspace(stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = stop / (num - 1) as f64;
            let mut values: Vec<f64> = (0..num).map(|i| i as f64 * step).collect();
            values[num - 1] = stop;
            values
        }
    }
}
