// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Multi-tone signal model
//!
//! This module holds the data types flowing through the fixture pipeline
//! and the two pure stages that operate on them:
//!
//! - [`sampler`] turns a [`Wave`] into time-domain samples over a time base
//!   derived from the frequency content of a wave pair
//! - [`combiner`] derives the eight truth signals (negation, addition,
//!   subtraction, multiplication in both operand orders) from two sampled waves
//!
//! A [`Wave`] is a non-empty, immutable list of [`Tone`]s. Its value at time
//! `t` is the literal sum of its sinusoids:
//!
//! ```text
//! x(t) = Σ amp · sin(2π · freq · t − phase)
//! ```

pub mod combiner;
pub mod sampler;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FixtureError, FixtureResult};

pub use combiner::{
    create_signal_combiner, DerivedSignalSet, ElementwiseCombiner, Operation, SignalCombiner,
};
pub use sampler::{duration, sample, sample_rate, SampledSignal, TimeBase};

/// Identifier of a wave, as declared in the configuration
pub type WaveId = u32;

/// One sinusoid contributing to a wave
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    /// Frequency in Hz
    pub frequency: f64,
    /// Peak amplitude
    pub amplitude: f64,
    /// Phase offset in radians, subtracted from the argument of `sin`
    pub phase: f64,
}

impl Tone {
    pub fn new(frequency: f64, amplitude: f64, phase: f64) -> Self {
        Self {
            frequency,
            amplitude,
            phase,
        }
    }

    /// Value of this tone at time `t` (seconds)
    #[inline]
    pub fn evaluate(&self, t: f64) -> f64 {
        self.amplitude * (2.0 * std::f64::consts::PI * self.frequency * t - self.phase).sin()
    }
}

/// An ordered, non-empty sequence of tones
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    tones: Vec<Tone>,
}

impl Wave {
    /// Build a wave from its tones.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::EmptyWave`] when `tones` is empty, since a wave
    /// without tones has no defined duration or sample rate.
    pub fn from_tones(id: WaveId, tones: Vec<Tone>) -> FixtureResult<Self> {
        if tones.is_empty() {
            return Err(FixtureError::EmptyWave { wave: id });
        }
        Ok(Self { tones })
    }

    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    // Always false for a constructed wave
    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    /// Smallest absolute tone frequency
    pub fn min_abs_frequency(&self) -> f64 {
        self.tones
            .iter()
            .map(|tone| tone.frequency.abs())
            .fold(f64::INFINITY, f64::min)
    }

    /// Largest absolute tone frequency
    pub fn max_abs_frequency(&self) -> f64 {
        self.tones
            .iter()
            .map(|tone| tone.frequency.abs())
            .fold(0.0, f64::max)
    }

    /// Sum of all tones at time `t`
    pub fn evaluate(&self, t: f64) -> f64 {
        self.tones.iter().map(|tone| tone.evaluate(t)).sum()
    }
}

/// Ordered pair of wave identifiers selected for sampling and combination.
///
/// The first identifier plays the role of operand `0` in the derived signal
/// labels, the second the role of operand `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavePair {
    pub first: WaveId,
    pub second: WaveId,
}

impl WavePair {
    pub fn new(first: WaveId, second: WaveId) -> Self {
        Self { first, second }
    }
}

impl Default for WavePair {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl fmt::Display for WavePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Generated waves keyed by identifier, in configuration-declared order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveSet {
    waves: Vec<(WaveId, Wave)>,
}

impl WaveSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a wave. A wave with an identifier already present replaces it
    /// in place, keeping the original position.
    pub fn insert(&mut self, id: WaveId, wave: Wave) {
        match self.waves.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = wave,
            None => self.waves.push((id, wave)),
        }
    }

    pub fn get(&self, id: WaveId) -> FixtureResult<&Wave> {
        self.waves
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, wave)| wave)
            .ok_or_else(|| FixtureError::WaveNotFound {
                wave: id,
                available: self
                    .ids()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Both waves of `pair`, in pair order
    pub fn pair(&self, pair: WavePair) -> FixtureResult<(&Wave, &Wave)> {
        Ok((self.get(pair.first)?, self.get(pair.second)?))
    }

    pub fn ids(&self) -> impl Iterator<Item = WaveId> + '_ {
        self.waves.iter().map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WaveId, &Wave)> {
        self.waves.iter().map(|(id, wave)| (*id, wave))
    }

    pub fn len(&self) -> usize {
        self.waves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn wave(id: WaveId, freqs: &[f64]) -> Wave {
        Wave::from_tones(id, freqs.iter().map(|&f| Tone::new(f, 1.0, 0.0)).collect()).unwrap()
    }

    #[test]
    fn test_empty_wave_is_rejected() {
        let result = Wave::from_tones(3, Vec::new());
        assert!(matches!(result, Err(FixtureError::EmptyWave { wave: 3 })));
    }

    #[test]
    fn test_frequency_extremes_use_absolute_values() {
        let w = wave(0, &[-7.0, 2.0, 3.5]);
        assert_eq!(w.min_abs_frequency(), 2.0);
        assert_eq!(w.max_abs_frequency(), 7.0);
    }

    #[test]
    fn test_tone_phase_is_subtracted() {
        let tone = Tone::new(1.0, 2.0, std::f64::consts::FRAC_PI_2);
        // sin(-π/2) = -1
        assert_abs_diff_eq!(tone.evaluate(0.0), -2.0, epsilon = 1e-12);
        // sin(2π·0.25 − π/2) = 0
        assert_abs_diff_eq!(tone.evaluate(0.25), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_wave_set_keeps_declared_order() {
        let mut set = WaveSet::new();
        set.insert(1, wave(1, &[1.0]));
        set.insert(0, wave(0, &[2.0]));
        set.insert(1, wave(1, &[3.0]));

        assert_eq!(set.ids().collect::<Vec<_>>(), vec![1, 0]);
        assert_eq!(set.get(1).unwrap().tones()[0].frequency, 3.0);
    }

    #[test]
    fn test_missing_wave_lists_available_ids() {
        let mut set = WaveSet::new();
        set.insert(0, wave(0, &[1.0]));
        set.insert(2, wave(2, &[1.0]));

        match set.pair(WavePair::default()) {
            Err(FixtureError::WaveNotFound { wave, available }) => {
                assert_eq!(wave, 1);
                assert_eq!(available, "0, 2");
            }
            other => panic!("expected WaveNotFound, got {:?}", other),
        }
    }
}
