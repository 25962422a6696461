//! Rust wave fixtures library
//!
//! This library generates deterministic multi-tone waves and the truth signals
//! (negation, sum, difference and product in both operand orders) used to
//! validate a signal-processing component against reproducible references.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod pipeline;
pub mod signal;
pub mod utility;

pub use error::{FixtureError, FixtureResult};
pub use pipeline::{FixturePipeline, FixtureReport};
