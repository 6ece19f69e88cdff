// Build configuration. Every field has a default, so a config file only needs
// to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One position in the ingestion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSlot {
    /// Synthesizer over every headword.
    Generated,
    /// Caller-supplied feeds, in the order given.
    External,
    /// Resolver over corpus forms nothing else has mapped.
    Algorithmic,
    /// Built-in common forms and proper names.
    Curated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Language tag given to plain-text headwords.
    pub language: String,
    /// Earlier slots win key collisions.
    pub order: Vec<SourceSlot>,
    /// Drop records whose form is not in the corpus.
    pub prune_to_corpus: bool,
    /// Add movable-nu twins after all slots are merged.
    pub movable_nu: bool,
    pub generated_confidence: f64,
    pub self_mapping_confidence: f64,
    /// Number of shards in the working set; rounded up to at least 1.
    pub shards: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            language: "greek".to_string(),
            order: vec![
                SourceSlot::Generated,
                SourceSlot::External,
                SourceSlot::Algorithmic,
                SourceSlot::Curated,
            ],
            prune_to_corpus: true,
            movable_nu: true,
            generated_confidence: 0.8,
            self_mapping_confidence: 0.9,
            shards: 16,
        }
    }
}

impl BuildConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: BuildConfig = serde_json::from_str(&text).map_err(|e| Error::json(path, e.line(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("generated_confidence", self.generated_confidence),
            ("self_mapping_confidence", self.self_mapping_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!("{name} must lie in [0, 1], got {value}")));
            }
        }
        let mut seen = Vec::with_capacity(self.order.len());
        for slot in &self.order {
            if seen.contains(slot) {
                return Err(Error::InvalidConfig(format!("source slot {slot:?} listed twice")));
            }
            seen.push(*slot);
        }
        Ok(())
    }

    pub fn shard_count(&self) -> usize {
        self.shards.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_order() {
        let c = BuildConfig::default();
        assert_eq!(c.order[0], SourceSlot::Generated);
        assert_eq!(c.order[3], SourceSlot::Curated);
        assert!(c.prune_to_corpus);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"prune_to_corpus": false, "order": ["curated", "external"]}}"#).unwrap();
        let c = BuildConfig::from_json_file(f.path()).unwrap();
        assert!(!c.prune_to_corpus);
        assert_eq!(c.order, vec![SourceSlot::Curated, SourceSlot::External]);
        assert_eq!(c.generated_confidence, 0.8);
        assert_eq!(c.language, "greek");
    }

    #[test]
    fn test_rejects_out_of_range_confidence() {
        let c = BuildConfig {
            generated_confidence: 1.5,
            ..BuildConfig::default()
        };
        assert!(matches!(c.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_duplicate_slot() {
        let c = BuildConfig {
            order: vec![SourceSlot::External, SourceSlot::External],
            ..BuildConfig::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_zero_shards_rounds_up() {
        let c = BuildConfig {
            shards: 0,
            ..BuildConfig::default()
        };
        assert_eq!(c.shard_count(), 1);
    }
}
