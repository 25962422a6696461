// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Derived truth signals
//!
//! Both operand orders are produced for addition, subtraction and
//! multiplication so that a system under test which breaks commutativity
//! (or anti-symmetry for subtraction) shows up in a direct file comparison.

use std::fmt;

use super::SampledSignal;
use crate::error::{FixtureError, FixtureResult};

/// One of the eight fixed derived-signal operations.
///
/// `0` and `1` name the first and second signal of the combined pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    Neg0,
    Neg1,
    Add01,
    Add10,
    Sub01,
    Sub10,
    Mul01,
    Mul10,
}

impl Operation {
    /// All operations in output order
    pub const ALL: [Operation; 8] = [
        Operation::Neg0,
        Operation::Neg1,
        Operation::Add01,
        Operation::Add10,
        Operation::Sub01,
        Operation::Sub10,
        Operation::Mul01,
        Operation::Mul10,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Operation::Neg0 => "Neg_0",
            Operation::Neg1 => "Neg_1",
            Operation::Add01 => "Add_0_1",
            Operation::Add10 => "Add_1_0",
            Operation::Sub01 => "Sub_0_1",
            Operation::Sub10 => "Sub_1_0",
            Operation::Mul01 => "Mul_0_1",
            Operation::Mul10 => "Mul_1_0",
        }
    }

    /// Truth signal file name, e.g. `Add_0_1.csv`
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.label())
    }

    /// Apply to one sample of each operand
    #[inline]
    pub fn apply(&self, s0: f64, s1: f64) -> f64 {
        match self {
            Operation::Neg0 => -s0,
            Operation::Neg1 => -s1,
            Operation::Add01 => s0 + s1,
            Operation::Add10 => s1 + s0,
            Operation::Sub01 => s0 - s1,
            Operation::Sub10 => s1 - s0,
            Operation::Mul01 => s0 * s1,
            Operation::Mul10 => s1 * s0,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The eight derived signals of a wave pair over one shared timestamp sequence
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSignalSet {
    timestamps: Vec<f64>,
    signals: Vec<(Operation, Vec<f64>)>,
}

impl DerivedSignalSet {
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Amplitudes of `operation`
    pub fn get(&self, operation: Operation) -> &[f64] {
        self.signals
            .iter()
            .find(|(op, _)| *op == operation)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// Operations and their amplitudes, in [`Operation::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Operation, &[f64])> {
        self.signals
            .iter()
            .map(|(op, values)| (*op, values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Trait for deriving truth signals from a pair of sampled signals
pub trait SignalCombiner: Send + Sync {
    /// Compute all eight derived signals of `s0` and `s1`
    fn combine(&self, s0: &SampledSignal, s1: &SampledSignal) -> FixtureResult<DerivedSignalSet>;
}

/// Sample-by-sample combiner
pub struct ElementwiseCombiner {}

impl ElementwiseCombiner {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ElementwiseCombiner {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalCombiner for ElementwiseCombiner {
    fn combine(&self, s0: &SampledSignal, s1: &SampledSignal) -> FixtureResult<DerivedSignalSet> {
        if s0.amplitudes.len() != s1.amplitudes.len() {
            return Err(FixtureError::LengthMismatch {
                left_name: "signal 0",
                left: s0.amplitudes.len(),
                right_name: "signal 1",
                right: s1.amplitudes.len(),
            });
        }
        if s0.timestamps != s1.timestamps {
            return Err(FixtureError::TimeBaseMismatch);
        }

        let signals = Operation::ALL
            .into_iter()
            .map(|op| {
                let values = s0
                    .amplitudes
                    .iter()
                    .zip(&s1.amplitudes)
                    .map(|(&a, &b)| op.apply(a, b))
                    .collect();
                (op, values)
            })
            .collect();

        Ok(DerivedSignalSet {
            timestamps: s0.timestamps.clone(),
            signals,
        })
    }
}

/// Create the default signal combiner
pub fn create_signal_combiner() -> Box<dyn SignalCombiner> {
    Box::new(ElementwiseCombiner::new())
}
