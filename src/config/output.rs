// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Output locations of the generated fixtures

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directories receiving the wave parameter files and the truth signal files.
///
/// Both directories must exist before generation; they are never created.
/// Relative paths are resolved against the directory holding the
/// configuration file (see [`OutputConfig::resolve`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for `<id>.csv` wave parameter files
    #[serde(default = "default_random_waves_dir")]
    pub random_waves_dir: PathBuf,

    /// Directory for `Neg_0.csv` … `Mul_1_0.csv`
    #[serde(default = "default_truth_signals_dir")]
    pub truth_signals_dir: PathBuf,
}

fn default_random_waves_dir() -> PathBuf {
    PathBuf::from("test_data/random_waves")
}

fn default_truth_signals_dir() -> PathBuf {
    PathBuf::from("test_data/truth_signals")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            random_waves_dir: default_random_waves_dir(),
            truth_signals_dir: default_truth_signals_dir(),
        }
    }
}

impl OutputConfig {
    /// Copy of this configuration with relative directories joined onto `base`
    pub fn resolve<P: AsRef<Path>>(&self, base: P) -> Self {
        let base = base.as_ref();
        let join = |dir: &PathBuf| {
            if dir.is_absolute() {
                dir.clone()
            } else {
                base.join(dir)
            }
        };
        Self {
            random_waves_dir: join(&self.random_waves_dir),
            truth_signals_dir: join(&self.truth_signals_dir),
        }
    }
}
