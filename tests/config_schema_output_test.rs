// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use anyhow::Result;
use rust_wave_fixtures::config;

#[test]
fn test_config_schema_output() -> Result<()> {
    // The schema goes to stdout; we only check that printing it succeeds
    config::output_config_schema()?;

    Ok(())
}

#[test]
fn test_config_schema_is_draft_2020_12() -> Result<()> {
    let schema: serde_json::Value = serde_json::from_str(config::CONFIG_SCHEMA)?;

    assert_eq!(
        schema["$schema"],
        "https://json-schema.org/draft/2020-12/schema"
    );
    assert!(jsonschema::draft202012::new(&schema).is_ok());

    Ok(())
}
