//! Configuration for lexicon loading and lexicon building

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which lexicon files to load and in what order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Seed the lexicon with the built-in fallback table
    #[serde(default = "default_true")]
    pub include_fallback: bool,

    /// External sources in precedence order; later sources overwrite earlier ones
    #[serde(default = "default_sources")]
    pub sources: Vec<LexiconSource>,
}

impl LexiconConfig {
    /// Configuration with no external sources, only the fallback table
    pub fn fallback_only() -> Self {
        Self {
            include_fallback: true,
            sources: Vec::new(),
        }
    }

    /// Append a source after the existing ones
    pub fn with_source(mut self, path: impl Into<PathBuf>, skip_header: bool) -> Self {
        self.sources.push(LexiconSource {
            path: path.into(),
            skip_header,
        });
        self
    }
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            include_fallback: true,
            sources: default_sources(),
        }
    }
}

/// One tab-separated lexicon file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconSource {
    pub path: PathBuf,

    /// Skip the first line of the file
    #[serde(default)]
    pub skip_header: bool,
}

/// Word acceptance thresholds for the lexicon builder
///
/// A word is accepted when `best_count >= min_count` and
/// `best_count / total_count > min_ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptancePolicy {
    #[serde(default)]
    pub min_count: u32,

    #[serde(default)]
    pub min_ratio: f64,
}

impl AcceptancePolicy {
    /// Accept every word with at least one counted category
    pub const PERMISSIVE: AcceptancePolicy = AcceptancePolicy {
        min_count: 0,
        min_ratio: 0.0,
    };

    /// At least 2 occurrences and more than a quarter of them in one category
    pub const BALANCED: AcceptancePolicy = AcceptancePolicy {
        min_count: 2,
        min_ratio: 0.25,
    };

    /// At least 3 occurrences and a majority in one category
    pub const STRICT: AcceptancePolicy = AcceptancePolicy {
        min_count: 3,
        min_ratio: 0.5,
    };

    /// Look up a named preset
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "permissive" => Some(Self::PERMISSIVE),
            "balanced" => Some(Self::BALANCED),
            "strict" => Some(Self::STRICT),
            _ => None,
        }
    }

    /// Check a word's best-category count against its total
    pub fn accepts(&self, best_count: u32, total_count: u32) -> bool {
        if best_count == 0 || total_count == 0 {
            return false;
        }
        let ratio = best_count as f64 / total_count as f64;
        best_count >= self.min_count && ratio > self.min_ratio
    }
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self::PERMISSIVE
    }
}

/// Offline lexicon build settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Corpus TSV files, read in order
    #[serde(default = "default_inputs")]
    pub inputs: Vec<PathBuf>,

    /// Lexicon file to write
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default)]
    pub policy: AcceptancePolicy,

    /// Emit words by descending confidence ratio instead of alphabetically
    #[serde(default)]
    pub sort_by_confidence: bool,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            inputs: default_inputs(),
            output: default_output(),
            policy: AcceptancePolicy::default(),
            sort_by_confidence: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sources() -> Vec<LexiconSource> {
    vec![
        LexiconSource {
            path: PathBuf::from("data/NRC-VAD-Lexicon-v2.1.txt"),
            skip_header: true,
        },
        LexiconSource {
            path: default_output(),
            skip_header: false,
        },
    ]
}

fn default_inputs() -> Vec<PathBuf> {
    ["train", "dev", "test"]
        .iter()
        .map(|split| PathBuf::from(format!("data/goemotions-{}.tsv", split)))
        .collect()
}

fn default_output() -> PathBuf {
    PathBuf::from("data/goemotions-words-full.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissive_accepts_any_positive_count() {
        assert!(AcceptancePolicy::PERMISSIVE.accepts(1, 10));
        assert!(!AcceptancePolicy::PERMISSIVE.accepts(0, 0));
    }

    #[test]
    fn test_strict_requires_majority() {
        let policy = AcceptancePolicy::STRICT;
        assert!(policy.accepts(3, 5));
        assert!(!policy.accepts(3, 6)); // exactly half is not a majority
        assert!(!policy.accepts(2, 2));
    }

    #[test]
    fn test_balanced_ratio_is_strict() {
        let policy = AcceptancePolicy::BALANCED;
        assert!(policy.accepts(2, 7));
        assert!(!policy.accepts(2, 8));
    }

    #[test]
    fn test_presets_by_name() {
        assert_eq!(AcceptancePolicy::preset("Strict"), Some(AcceptancePolicy::STRICT));
        assert_eq!(AcceptancePolicy::preset("loose"), None);
    }

    #[test]
    fn test_yaml_defaults() {
        let config: LexiconConfig = serde_yaml::from_str("include_fallback: false").unwrap();
        assert!(!config.include_fallback);
        assert_eq!(config.sources.len(), 2);
        assert!(config.sources[0].skip_header);

        let builder: BuilderConfig =
            serde_yaml::from_str("policy: { min_count: 3, min_ratio: 0.5 }").unwrap();
        assert_eq!(builder.policy, AcceptancePolicy::STRICT);
        assert_eq!(builder.inputs.len(), 3);
    }
}
