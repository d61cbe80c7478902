//! Mood inference facade
//!
//! Composes tokenizer → lexicon store → scorer → classifier. The analyzer
//! is cheap to clone and safe to share across request handlers; only the
//! first call (or [`MoodAnalyzer::warm_up`]) touches the filesystem.

use crate::classifier::{distances, nearest};
use crate::config::LexiconConfig;
use crate::lexicon::{Lexicon, LexiconStore};
use crate::scorer::score_detailed;
use crate::tokenizer::tokenize;
use moodtrip_core::{Error, Mood, MoodResult, Result, Vad};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Distance from the analysed text to one mood centroid
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodDistance {
    pub mood: Mood,
    pub distance: f32,
}

/// Full inference detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub mood: Mood,
    pub vad: Vad,

    /// Tokens extracted from the input
    pub tokens: Vec<String>,

    /// Tokens that matched the lexicon
    pub matched: Vec<String>,

    pub total_weight: f32,

    /// Distance to the chosen centroid
    pub distance: f32,

    /// Distances to every centroid, in table order
    pub distances: Vec<MoodDistance>,

    /// Latency in microseconds
    pub latency_us: u64,
}

impl Analysis {
    /// The `{mood, vad}` pair returned to callers
    pub fn result(&self) -> MoodResult {
        MoodResult {
            mood: self.mood,
            vad: self.vad,
        }
    }
}

/// Entry point for online mood inference
#[derive(Debug, Clone)]
pub struct MoodAnalyzer {
    store: Arc<LexiconStore>,
}

impl MoodAnalyzer {
    /// Create an analyzer over a shared store
    pub fn new(store: Arc<LexiconStore>) -> Self {
        Self { store }
    }

    /// Create an analyzer with its own store
    pub fn from_config(config: LexiconConfig) -> Self {
        Self::new(Arc::new(LexiconStore::new(config)))
    }

    /// Create an analyzer over a fixed lexicon
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self::new(Arc::new(LexiconStore::preloaded(lexicon)))
    }

    /// Load the lexicon now rather than on the first request; returns its size
    pub fn warm_up(&self) -> usize {
        self.store.load().len()
    }

    /// The shared lexicon store
    pub fn store(&self) -> &Arc<LexiconStore> {
        &self.store
    }

    /// Infer `{mood, vad}` for free text. Never fails.
    pub fn infer(&self, text: &str) -> MoodResult {
        self.analyze(text).result()
    }

    /// Infer for a request whose text may be absent.
    ///
    /// Absent or empty text violates the input contract; anything else,
    /// whitespace included, yields a result.
    pub fn handle(&self, text: Option<&str>) -> Result<MoodResult> {
        self.handle_detailed(text).map(|analysis| analysis.result())
    }

    /// Like [`MoodAnalyzer::handle`], returning the full analysis
    pub fn handle_detailed(&self, text: Option<&str>) -> Result<Analysis> {
        match text {
            Some(t) if !t.is_empty() => Ok(self.analyze(t)),
            _ => Err(Error::invalid_input("no text provided")),
        }
    }

    /// Infer with full matching and distance detail
    pub fn analyze(&self, text: &str) -> Analysis {
        self.analyze_tokens(tokenize(text))
    }

    /// Infer from already-tokenized input
    pub fn analyze_tokens(&self, tokens: Vec<String>) -> Analysis {
        let start = Instant::now();
        let lexicon = self.store.load();

        let score = score_detailed(&tokens, lexicon);
        if score.is_unmatched() {
            debug!(
                "No tokens matched in lexicon (lexicon size {}): {:?}",
                lexicon.len(),
                tokens
            );
            metrics::counter!("moodtrip_unmatched_inferences_total").increment(1);
        }

        let (mood, distance) = nearest(&score.vad);
        let distances: Vec<MoodDistance> = distances(&score.vad)
            .into_iter()
            .map(|(mood, distance)| MoodDistance { mood, distance })
            .collect();

        let latency_us = start.elapsed().as_micros() as u64;
        metrics::counter!("moodtrip_inferences_total", "mood" => mood.as_str()).increment(1);
        metrics::histogram!("moodtrip_inference_latency_us").record(latency_us as f64);

        debug!(
            tokens = ?tokens,
            matched = ?score.matched,
            weight = score.total_weight,
            valence = score.vad.valence,
            arousal = score.vad.arousal,
            dominance = score.vad.dominance,
            %mood,
            distance,
            "Mood analysis"
        );

        Analysis {
            mood,
            vad: score.vad,
            tokens,
            matched: score.matched,
            total_weight: score.total_weight,
            distance,
            distances,
            latency_us,
        }
    }
}
