// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use anyhow::Result;
use approx::assert_relative_eq;
use rust_wave_fixtures::config::{Config, OutputConfig, ParameterSpec, WaveSection, WaveSpec};
use rust_wave_fixtures::fixtures::{
    read_truth_signal, read_wave_from_dir, verify_fixtures, write_signal_csv,
};
use rust_wave_fixtures::signal::{
    create_signal_combiner, DerivedSignalSet, Operation, SampledSignal, SignalCombiner, TimeBase,
    WavePair,
};
use rust_wave_fixtures::{FixtureError, FixturePipeline};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::tempdir;

fn output_in(root: &Path) -> Result<OutputConfig> {
    let output = OutputConfig {
        random_waves_dir: root.join("random_waves"),
        truth_signals_dir: root.join("truth_signals"),
    };
    fs::create_dir_all(&output.random_waves_dir)?;
    fs::create_dir_all(&output.truth_signals_dir)?;
    Ok(output)
}

fn config_in(root: &Path) -> Result<Config> {
    Ok(Config {
        output: output_in(root)?,
        ..Config::default()
    })
}

fn line_count(path: &Path) -> Result<usize> {
    Ok(fs::read_to_string(path)?.lines().count())
}

#[test]
fn test_reference_scenario_layout() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = config_in(temp_dir.path())?;
    let output = config.output.clone();

    let report = FixturePipeline::new(config).run()?;

    // Two wave files with three tones each
    assert_eq!(report.wave_files.len(), 2);
    for id in ["0.csv", "1.csv"] {
        let path = output.random_waves_dir.join(id);
        let contents = fs::read_to_string(&path)?;
        assert_eq!(contents.lines().next(), Some("freq, amp, phase"));
        assert_eq!(contents.lines().count(), 4);
    }

    // Eight truth signals over the shared time base
    let wave0 = read_wave_from_dir(&output.random_waves_dir, 0)?;
    let wave1 = read_wave_from_dir(&output.random_waves_dir, 1)?;
    let time_base = TimeBase::for_pair(&wave0, &wave1)?;
    let expected_samples =
        (time_base.duration() * time_base.sample_rate()).round_ties_even() as usize;
    assert_eq!(report.num_samples, expected_samples);

    assert_eq!(report.signal_files.len(), 8);
    for operation in Operation::ALL {
        let path = output.truth_signals_dir.join(operation.file_name());
        assert!(path.exists(), "{} missing", path.display());
        assert_eq!(line_count(&path)?, expected_samples + 1);
        assert_eq!(
            fs::read_to_string(&path)?.lines().next(),
            Some("Time, Signal")
        );
    }

    Ok(())
}

#[test]
fn test_same_seed_gives_identical_files() -> Result<()> {
    let first_dir = tempdir()?;
    let second_dir = tempdir()?;

    let first = FixturePipeline::new(config_in(first_dir.path())?).run()?;
    let second = FixturePipeline::new(config_in(second_dir.path())?).run()?;

    let first_files = first.wave_files.iter().chain(&first.signal_files);
    let second_files = second.wave_files.iter().chain(&second.signal_files);
    for (a, b) in first_files.zip(second_files) {
        assert_eq!(a.file_name(), b.file_name());
        assert_eq!(fs::read(a)?, fs::read(b)?, "{} differs", a.display());
    }

    Ok(())
}

#[test]
fn test_different_seed_gives_different_waves() -> Result<()> {
    let first_dir = tempdir()?;
    let second_dir = tempdir()?;

    FixturePipeline::new(config_in(first_dir.path())?).run()?;
    let mut config = config_in(second_dir.path())?;
    config.seed = 43;
    FixturePipeline::new(config).run()?;

    let a = fs::read(first_dir.path().join("random_waves/0.csv"))?;
    let b = fs::read(second_dir.path().join("random_waves/0.csv"))?;
    assert_ne!(a, b);

    Ok(())
}

#[test]
fn test_truth_signal_relations() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = config_in(temp_dir.path())?;
    let output = config.output.clone();
    FixturePipeline::new(config).run()?;

    let wave0 = read_wave_from_dir(&output.random_waves_dir, 0)?;
    let signal = |operation| read_truth_signal(&output.truth_signals_dir, operation);

    let neg0 = signal(Operation::Neg0)?;
    let add01 = signal(Operation::Add01)?;
    let add10 = signal(Operation::Add10)?;
    let sub01 = signal(Operation::Sub01)?;
    let sub10 = signal(Operation::Sub10)?;
    let mul01 = signal(Operation::Mul01)?;
    let mul10 = signal(Operation::Mul10)?;

    for (i, &t) in neg0.timestamps.iter().enumerate() {
        // Negation of a re-synthesis of the wave file
        assert_relative_eq!(neg0.amplitudes[i], -wave0.evaluate(t), epsilon = 1e-12);
        assert_relative_eq!(add01.amplitudes[i], add10.amplitudes[i], epsilon = 1e-12);
        assert_relative_eq!(sub01.amplitudes[i], -sub10.amplitudes[i], epsilon = 1e-12);
        assert_relative_eq!(mul01.amplitudes[i], mul10.amplitudes[i], epsilon = 1e-12);
    }

    // Every file carries the same timestamps, starting at zero
    assert_eq!(neg0.timestamps[0], 0.0);
    for operation in Operation::ALL {
        assert_eq!(signal(operation)?.timestamps, neg0.timestamps);
    }

    // The verification entry point agrees
    let violations = verify_fixtures(
        &output.random_waves_dir,
        &output.truth_signals_dir,
        WavePair::default(),
        1e-9,
    )?;
    assert!(violations.is_empty(), "{:?}", violations);

    Ok(())
}

#[test]
fn test_drawn_parameters_respect_ranges() -> Result<()> {
    let temp_dir = tempdir()?;
    let mut config = config_in(temp_dir.path())?;
    config.seed = 2024;
    config.wave = WaveSection::new()
        .with_wave(0, WaveSpec {
            num: 50,
            freq: ParameterSpec::int(1, 5),
            amp: ParameterSpec::real(0.1, 1.0),
            phase: ParameterSpec::real(0.0, 6.28),
        })
        .with_wave(1, WaveSpec {
            num: 50,
            freq: ParameterSpec::int(-20, -2),
            amp: ParameterSpec::real(2.0, 2.0),
            phase: ParameterSpec::real(-1.0, 1.0),
        });
    let output = config.output.clone();
    FixturePipeline::new(config).run()?;

    let wave0 = read_wave_from_dir(&output.random_waves_dir, 0)?;
    assert_eq!(wave0.len(), 50);
    for tone in wave0.tones() {
        assert_eq!(tone.frequency.fract(), 0.0);
        assert!((1.0..5.0).contains(&tone.frequency));
        assert!((0.1..=1.0).contains(&tone.amplitude));
        assert!((0.0..=6.28).contains(&tone.phase));
    }

    let wave1 = read_wave_from_dir(&output.random_waves_dir, 1)?;
    for tone in wave1.tones() {
        assert_eq!(tone.frequency.fract(), 0.0);
        assert!((-20.0..-2.0).contains(&tone.frequency));
        assert_eq!(tone.amplitude, 2.0);
        assert!((-1.0..=1.0).contains(&tone.phase));
    }

    Ok(())
}

#[test]
fn test_missing_directory_writes_nothing() -> Result<()> {
    let temp_dir = tempdir()?;
    let mut config = config_in(temp_dir.path())?;
    let missing = temp_dir.path().join("does_not_exist");
    config.output.truth_signals_dir = missing.clone();
    let waves_dir = config.output.random_waves_dir.clone();

    match FixturePipeline::new(config).run() {
        Err(FixtureError::MissingDirectory { path }) => assert_eq!(path, missing),
        other => panic!("expected MissingDirectory, got {:?}", other.map(|r| r.seed)),
    }

    // Nothing was drawn or written
    assert_eq!(fs::read_dir(&waves_dir)?.count(), 0);
    assert!(!missing.exists());

    Ok(())
}

#[test]
fn test_length_mismatch_is_rejected() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("Neg_0.csv");

    let result = write_signal_csv(&path, &[0.0, 0.5, 1.0], &[1.0, 2.0]);
    assert!(matches!(
        result,
        Err(FixtureError::LengthMismatch {
            left: 3,
            right: 2,
            ..
        })
    ));
    assert!(!path.exists());

    Ok(())
}

#[test]
fn test_pair_selection() -> Result<()> {
    let temp_dir = tempdir()?;
    let mut config = config_in(temp_dir.path())?;
    config.pair = WavePair::new(1, 0);
    let output = config.output.clone();
    FixturePipeline::new(config).run()?;

    // Operand 0 is now wave 1
    let wave1 = read_wave_from_dir(&output.random_waves_dir, 1)?;
    let neg0 = read_truth_signal(&output.truth_signals_dir, Operation::Neg0)?;
    for (&t, &value) in neg0.timestamps.iter().zip(&neg0.amplitudes) {
        assert_relative_eq!(value, -wave1.evaluate(t), epsilon = 1e-12);
    }

    Ok(())
}

/// Delegates to the default combiner and counts its calls
struct CountingCombiner {
    calls: Arc<AtomicUsize>,
    inner: Box<dyn SignalCombiner>,
}

impl SignalCombiner for CountingCombiner {
    fn combine(
        &self,
        s0: &SampledSignal,
        s1: &SampledSignal,
    ) -> rust_wave_fixtures::FixtureResult<DerivedSignalSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.combine(s0, s1)
    }
}

#[test]
fn test_custom_combiner_is_used() -> Result<()> {
    let temp_dir = tempdir()?;
    let config = config_in(temp_dir.path())?;
    let calls = Arc::new(AtomicUsize::new(0));

    let pipeline = FixturePipeline::new(config).with_combiner(Box::new(CountingCombiner {
        calls: Arc::clone(&calls),
        inner: create_signal_combiner(),
    }));
    let report = pipeline.run()?;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.signal_files.len(), 8);

    Ok(())
}
