// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-photoacoustic project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Wave generation settings
//!
//! The `wave` section maps each wave identifier to its tone count and the
//! draw ranges of its three parameters:
//!
//! ```yaml
//! wave:
//!   0:
//!     num: 3
//!     freq: { low: 1, high: 5, use_int: true }
//!     amp: { low: 0.1, high: 1.0, use_int: false }
//!     phase: { low: 0.0, high: 6.28, use_int: false }
//! ```
//!
//! Document order of the identifiers is preserved: it fixes the order in which
//! the seeded random stream is consumed.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::signal::WaveId;

/// Draw range of one tone parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Lower bound (inclusive)
    pub low: f64,
    /// Upper bound: exclusive for integer draws, inclusive for real draws
    pub high: f64,
    /// Draw whole numbers from `[low, high)` instead of reals from `[low, high]`
    pub use_int: bool,
}

impl ParameterSpec {
    pub fn int(low: i64, high: i64) -> Self {
        Self {
            low: low as f64,
            high: high as f64,
            use_int: true,
        }
    }

    pub fn real(low: f64, high: f64) -> Self {
        Self {
            low,
            high,
            use_int: false,
        }
    }
}

/// Tone count and parameter ranges of one wave
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveSpec {
    /// Number of tones, at least 1
    pub num: u32,
    pub freq: ParameterSpec,
    pub amp: ParameterSpec,
    pub phase: ParameterSpec,
}

/// Wave specifications in configuration-declared order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveSection {
    entries: Vec<(WaveId, WaveSpec)>,
}

impl WaveSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append, used for defaults and tests
    pub fn with_wave(mut self, id: WaveId, spec: WaveSpec) -> Self {
        self.insert(id, spec);
        self
    }

    /// Append `spec`, or replace the spec already declared for `id`
    pub fn insert(&mut self, id: WaveId, spec: WaveSpec) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = spec,
            None => self.entries.push((id, spec)),
        }
    }

    pub fn get(&self, id: WaveId) -> Option<&WaveSpec> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, spec)| spec)
    }

    pub fn contains(&self, id: WaveId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WaveId, &WaveSpec)> {
        self.entries.iter().map(|(id, spec)| (*id, spec))
    }

    pub fn ids(&self) -> impl Iterator<Item = WaveId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for WaveSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(id, spec)| (id, spec)))
    }
}

impl<'de> Deserialize<'de> for WaveSection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(WaveSectionVisitor)
    }
}

struct WaveSectionVisitor;

impl<'de> Visitor<'de> for WaveSectionVisitor {
    type Value = WaveSection;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of wave identifiers to wave specifications")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries: Vec<(WaveId, WaveSpec)> = Vec::with_capacity(map.size_hint().unwrap_or(2));
        while let Some((WaveKey(id), spec)) = map.next_entry::<WaveKey, WaveSpec>()? {
            if entries.iter().any(|(existing, _)| *existing == id) {
                return Err(de::Error::custom(format!(
                    "duplicate wave identifier {}",
                    id
                )));
            }
            entries.push((id, spec));
        }
        Ok(WaveSection { entries })
    }
}

/// Wave identifier written either as an integer (`0:`) or a string (`"0":`)
struct WaveKey(WaveId);

impl<'de> Deserialize<'de> for WaveKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WaveKeyVisitor;

        impl<'de> Visitor<'de> for WaveKeyVisitor {
            type Value = WaveKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a non-negative wave identifier")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<WaveKey, E> {
                WaveId::try_from(value)
                    .map(WaveKey)
                    .map_err(|_| E::custom(format!("wave identifier {} is too large", value)))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<WaveKey, E> {
                WaveId::try_from(value)
                    .map(WaveKey)
                    .map_err(|_| E::custom(format!("invalid wave identifier {}", value)))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<WaveKey, E> {
                value
                    .trim()
                    .parse::<WaveId>()
                    .map(WaveKey)
                    .map_err(|_| E::custom(format!("invalid wave identifier '{}'", value)))
            }
        }

        deserializer.deserialize_any(WaveKeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(num: u32) -> WaveSpec {
        WaveSpec {
            num,
            freq: ParameterSpec::int(1, 5),
            amp: ParameterSpec::real(0.1, 1.0),
            phase: ParameterSpec::real(0.0, 6.28),
        }
    }

    #[test]
    fn test_document_order_is_preserved() {
        let yaml = r#"
2:
  num: 1
  freq: { low: 1, high: 5, use_int: true }
  amp: { low: 0.1, high: 1.0, use_int: false }
  phase: { low: 0.0, high: 6.28, use_int: false }
0:
  num: 4
  freq: { low: 1, high: 5, use_int: true }
  amp: { low: 0.1, high: 1.0, use_int: false }
  phase: { low: 0.0, high: 6.28, use_int: false }
"#;
        let section: WaveSection = serde_yml::from_str(yaml).unwrap();
        assert_eq!(section.ids().collect::<Vec<_>>(), vec![2, 0]);
        assert_eq!(section.get(0).unwrap().num, 4);
    }

    #[test]
    fn test_string_keys_are_accepted() {
        let yaml = r#"
"1":
  num: 2
  freq: { low: 1, high: 5, use_int: true }
  amp: { low: 0.1, high: 1.0, use_int: false }
  phase: { low: 0.0, high: 6.28, use_int: false }
"#;
        let section: WaveSection = serde_yml::from_str(yaml).unwrap();
        assert!(section.contains(1));
    }

    #[test]
    fn test_missing_parameter_field_is_rejected() {
        let yaml = r#"
0:
  num: 2
  freq: { low: 1, use_int: true }
  amp: { low: 0.1, high: 1.0, use_int: false }
  phase: { low: 0.0, high: 6.28, use_int: false }
"#;
        let result: Result<WaveSection, _> = serde_yml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialization_keeps_order() {
        let section = WaveSection::new().with_wave(1, spec(2)).with_wave(0, spec(3));
        let yaml = serde_yml::to_string(&section).unwrap();
        let reloaded: WaveSection = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(reloaded, section);
        assert_eq!(reloaded.ids().collect::<Vec<_>>(), vec![1, 0]);
    }
}
