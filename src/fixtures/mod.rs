// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Fixture files
//!
//! Two kinds of comma-separated files are produced:
//!
//! * wave parameter files `<id>.csv`, header `freq, amp, phase`, one row per tone
//! * truth signal files `<Label>.csv`, header `Time, Signal`, one row per sample
//!
//! Values are written in their shortest round-trip form, so reading a file
//! back yields the exact `f64`s that were written.

pub mod reader;
pub mod verify;
pub mod writer;

pub use reader::{read_signal_csv, read_truth_signal, read_wave_csv, read_wave_from_dir};
pub use verify::{verify_fixtures, Violation};
pub use writer::{ensure_directory, wave_file_name, write_signal_csv, write_wave_csv, FixtureWriter};

/// Extension carried by every fixture file
pub const FIXTURE_EXTENSION: &str = "csv";

pub const WAVE_HEADER: &str = "freq, amp, phase";

pub const SIGNAL_HEADER: &str = "Time, Signal";

#[inline]
pub(crate) fn format_value(value: f64) -> String {
    // Debug keeps the trailing ".0" on whole numbers
    format!("{:?}", value)
}
