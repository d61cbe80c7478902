//! moodtrip Lexicon
//!
//! Transparent, deterministic bag-of-words mood inference over a word-level
//! Valence-Arousal-Dominance lexicon.
//!
//! Two halves share one tokenizer:
//! - Offline: [`builder`] mines a labeled emotion corpus into a lexicon file
//! - Online: [`lexicon::LexiconStore`] merges lexicon sources once per
//!   process, [`scorer`] averages matched entries with emotion weighting,
//!   and [`classifier`] picks the nearest mood centroid

pub mod analyzer;
pub mod builder;
pub mod classifier;
pub mod config;
pub mod lexicon;
pub mod scorer;
pub mod tokenizer;

pub use analyzer::{Analysis, MoodAnalyzer, MoodDistance};
pub use builder::{build_from_config, BuildReport, BuiltLexicon, LexiconBuilder, MoodCategory};
pub use classifier::{classify, MOOD_CENTROIDS};
pub use config::{AcceptancePolicy, BuilderConfig, LexiconConfig, LexiconSource};
pub use lexicon::{normalize, Lexicon, LexiconStore, LoadStats};
pub use scorer::{score, score_detailed, Score};
pub use tokenizer::tokenize;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analyzer::{Analysis, MoodAnalyzer};
    pub use crate::config::{AcceptancePolicy, LexiconConfig};
    pub use crate::lexicon::{Lexicon, LexiconStore};
    pub use moodtrip_core::{Mood, MoodResult, Vad};
}
