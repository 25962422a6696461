// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Wave Parameter Generator
//!
//! This module draws the tone parameters of every configured wave from a single
//! seeded random stream. The generated [`WaveSet`] is the root of every
//! fixture: reproducing it bit for bit from the seed is what makes the truth
//! signals comparable between runs.
//!
//! ## Draw Order
//!
//! The stream is consumed in a fixed order:
//!
//! 1. waves, in configuration-declared order
//! 2. for each wave, `num` frequencies, then `num` amplitudes, then `num` phases
//!
//! Tone `i` of a wave is `(freq[i], amp[i], phase[i])`.
//!
//! ## Draw Modes
//!
//! * integer mode (`use_int: true`): whole numbers from `[low, high)`
//! * real mode (`use_int: false`): uniform reals from `[low, high]`
//!
//! ## Examples
//!
//! ```rust
//! use rust_wave_fixtures::config::Config;
//! use rust_wave_fixtures::utility::wave_generator::WaveParameterGenerator;
//!
//! let config = Config::default();
//!
//! let mut generator = WaveParameterGenerator::new(config.seed);
//! let waves = generator.generate(&config.wave).unwrap();
//! assert_eq!(waves.len(), 2);
//!
//! // Same seed, same waves
//! let again = WaveParameterGenerator::new(config.seed).generate(&config.wave).unwrap();
//! assert_eq!(waves, again);
//! ```

use log::debug;
use rand::distr::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::utils::check_parameter;
use crate::config::{ParameterSpec, WaveSection, WaveSpec};
use crate::error::{FixtureError, FixtureResult};
use crate::signal::{Tone, Wave, WaveId, WaveSet};

/// Seeded generator of wave parameter sets.
///
/// The generator owns the only random stream of a run. It is passed explicitly
/// to whoever needs draws, so the sequence of values follows from the call
/// graph alone.
///
/// # Examples
///
/// ```
/// use rust_wave_fixtures::config::ParameterSpec;
/// use rust_wave_fixtures::utility::wave_generator::WaveParameterGenerator;
///
/// let mut generator = WaveParameterGenerator::new(12345);
/// let values = generator.draw(0, "freq", &ParameterSpec::int(1, 5), 8).unwrap();
/// assert!(values.iter().all(|v| (1.0..5.0).contains(v) && v.fract() == 0.0));
/// ```
pub struct WaveParameterGenerator {
    /// Random stream, advanced by every draw
    rng: StdRng,
}

impl WaveParameterGenerator {
    /// Creates a new generator with a given seed.
    ///
    /// Using the same seed will produce the same sequence of draws.
    ///
    /// # Arguments
    ///
    /// * `seed` - A 64-bit unsigned integer used to initialize the stream
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates every wave of `section`, in declared order.
    ///
    /// # Errors
    ///
    /// * [`FixtureError::EmptyWave`] if a wave declares `num == 0`
    /// * [`FixtureError::InvalidRange`] if a parameter range is empty or not finite
    ///
    /// All specifications are checked before the first draw, so a failing
    /// section leaves the stream untouched.
    pub fn generate(&mut self, section: &WaveSection) -> FixtureResult<WaveSet> {
        for (id, spec) in section.iter() {
            validate_spec(id, spec)?;
        }

        let mut waves = WaveSet::new();
        for (id, spec) in section.iter() {
            let wave = self.generate_wave(id, spec)?;
            debug!("Generated wave {} with {} tones", id, wave.len());
            waves.insert(id, wave);
        }
        Ok(waves)
    }

    /// Generates one wave: `num` frequencies, then amplitudes, then phases.
    pub fn generate_wave(&mut self, id: WaveId, spec: &WaveSpec) -> FixtureResult<Wave> {
        validate_spec(id, spec)?;
        let count = spec.num as usize;

        let frequencies = self.draw(id, "freq", &spec.freq, count)?;
        let amplitudes = self.draw(id, "amp", &spec.amp, count)?;
        let phases = self.draw(id, "phase", &spec.phase, count)?;

        let tones = frequencies
            .into_iter()
            .zip(amplitudes)
            .zip(phases)
            .map(|((frequency, amplitude), phase)| Tone::new(frequency, amplitude, phase))
            .collect();

        Wave::from_tones(id, tones)
    }

    /// Draws `count` values of one parameter.
    ///
    /// Integer mode returns whole-valued `f64`s drawn from `[low, high)`;
    /// real mode returns uniform values from `[low, high]`.
    ///
    /// `wave` and `parameter` only label the error.
    pub fn draw(
        &mut self,
        wave: WaveId,
        parameter: &'static str,
        spec: &ParameterSpec,
        count: usize,
    ) -> FixtureResult<Vec<f64>> {
        check_parameter(spec).map_err(|reason| FixtureError::InvalidRange {
            wave,
            parameter,
            reason,
        })?;

        let invalid = |err: rand::distr::uniform::Error| FixtureError::InvalidRange {
            wave,
            parameter,
            reason: err.to_string(),
        };
        let values = if spec.use_int {
            let range = Uniform::new(spec.low as i64, spec.high as i64).map_err(invalid)?;
            (0..count)
                .map(|_| self.rng.sample(&range) as f64)
                .collect()
        } else {
            let range = Uniform::new_inclusive(spec.low, spec.high).map_err(invalid)?;
            (0..count).map(|_| self.rng.sample(&range)).collect()
        };
        Ok(values)
    }
}

fn validate_spec(id: WaveId, spec: &WaveSpec) -> FixtureResult<()> {
    if spec.num == 0 {
        return Err(FixtureError::EmptyWave { wave: id });
    }
    for (parameter, range) in [("freq", &spec.freq), ("amp", &spec.amp), ("phase", &spec.phase)] {
        check_parameter(range).map_err(|reason| FixtureError::InvalidRange {
            wave: id,
            parameter,
            reason,
        })?;
    }
    Ok(())
}
