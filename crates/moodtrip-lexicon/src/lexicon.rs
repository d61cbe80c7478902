//! Word → VAD lexicon and its process-wide store
//!
//! The store starts from a small built-in table of common affect words and
//! applies external tab-separated lexicon files in precedence order; a later
//! source overwrites any word an earlier one defined. Missing files and
//! malformed lines are logged and skipped, never fatal.

use crate::config::LexiconConfig;
use moodtrip_core::Vad;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// Curated entries that are always present, regardless of file availability
const FALLBACK_ENTRIES: &[(&str, Vad)] = &[
    ("happy", Vad::new(0.85, 0.55, 0.62)),
    ("joy", Vad::new(0.88, 0.60, 0.60)),
    ("excited", Vad::new(0.80, 0.85, 0.65)),
    ("calm", Vad::new(0.70, 0.25, 0.55)),
    ("relaxed", Vad::new(0.78, 0.30, 0.60)),
    ("angry", Vad::new(0.10, 0.85, 0.55)),
    ("stressed", Vad::new(0.20, 0.80, 0.40)),
    ("sad", Vad::new(0.15, 0.30, 0.35)),
    ("depressed", Vad::new(0.10, 0.20, 0.30)),
    ("bored", Vad::new(0.30, 0.15, 0.45)),
    ("adventure", Vad::new(0.75, 0.75, 0.60)),
    ("fear", Vad::new(0.10, 0.80, 0.30)),
    ("anxious", Vad::new(0.20, 0.75, 0.35)),
    ("love", Vad::new(0.90, 0.60, 0.65)),
];

/// Map a raw lexicon value onto `[0, 1]`.
///
/// Values already inside `[0, 1]` are kept; anything else is assumed to be
/// on a `[-1, 1]` scale and mapped through `(v + 1) / 2`. Values outside
/// both scales are clamped.
pub fn normalize(raw: f32) -> f32 {
    if (0.0..=1.0).contains(&raw) {
        raw
    } else {
        ((raw + 1.0) / 2.0).clamp(0.0, 1.0)
    }
}

/// Parse one lexicon line: `word<TAB>valence<TAB>arousal[<TAB>dominance]`.
///
/// Returns `None` for blank lines, lines with fewer than three fields, and
/// lines whose valence or arousal is not a finite number. A missing or
/// non-numeric dominance falls back to the neutral midpoint.
pub fn parse_line(line: &str) -> Option<(String, Vad)> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let fields: Vec<&str> = trimmed.split('\t').collect();
    if fields.len() < 3 {
        return None;
    }

    let word = fields[0].trim().to_lowercase();
    if word.is_empty() {
        return None;
    }

    let valence = parse_number(fields[1])?;
    let arousal = parse_number(fields[2])?;
    let dominance = fields
        .get(3)
        .and_then(|raw| parse_number(raw))
        .unwrap_or(Vad::NEUTRAL.dominance);

    Some((
        word,
        Vad::new(normalize(valence), normalize(arousal), normalize(dominance)),
    ))
}

fn parse_number(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Outcome of merging one lexicon source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Entries parsed and inserted
    pub loaded: usize,

    /// Non-blank lines that could not be parsed
    pub skipped: usize,
}

/// In-memory word → VAD mapping; at most one vector per word
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexicon {
    entries: HashMap<String, Vad>,
}

impl Lexicon {
    /// Create an empty lexicon
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in fallback table
    pub fn fallback() -> Self {
        FALLBACK_ENTRIES
            .iter()
            .map(|(word, vad)| (word.to_string(), *vad))
            .collect()
    }

    /// Look up a token
    pub fn get(&self, token: &str) -> Option<&Vad> {
        self.entries.get(token)
    }

    /// Check whether a token is present
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the lexicon is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Vad)> {
        self.entries.iter().map(|(w, v)| (w.as_str(), v))
    }

    /// Insert or overwrite an entry, returning the previous vector
    pub fn insert(&mut self, word: impl Into<String>, vad: Vad) -> Option<Vad> {
        self.entries.insert(word.into(), vad)
    }

    /// Merge lexicon text over the current entries
    pub fn merge_str(&mut self, content: &str, skip_header: bool) -> LoadStats {
        let mut stats = LoadStats::default();
        let start = usize::from(skip_header);

        for (index, line) in content.lines().enumerate().skip(start) {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line) {
                Some((word, vad)) => {
                    self.entries.insert(word, vad);
                    stats.loaded += 1;
                }
                None => {
                    debug!("Skipping malformed lexicon line {}: {:?}", index + 1, line);
                    stats.skipped += 1;
                }
            }
        }

        stats
    }

    /// Read a lexicon file and merge it over the current entries.
    ///
    /// Invalid UTF-8 is replaced rather than failing the whole file.
    pub fn merge_file(&mut self, path: impl AsRef<Path>, skip_header: bool) -> std::io::Result<LoadStats> {
        let bytes = std::fs::read(path.as_ref())?;
        Ok(self.merge_str(&String::from_utf8_lossy(&bytes), skip_header))
    }
}

impl FromIterator<(String, Vad)> for Lexicon {
    fn from_iter<I: IntoIterator<Item = (String, Vad)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, Vad)> for Lexicon {
    fn extend<I: IntoIterator<Item = (String, Vad)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

/// Lazily-built, read-only lexicon snapshot.
///
/// The first call to [`LexiconStore::load`] reads every configured source;
/// concurrent first callers block until that single build finishes, and
/// every later call returns the cached snapshot without touching disk.
#[derive(Debug)]
pub struct LexiconStore {
    config: LexiconConfig,
    lexicon: OnceLock<Lexicon>,
    source_reads: AtomicUsize,
}

impl LexiconStore {
    /// Create a store; nothing is read until the first `load`
    pub fn new(config: LexiconConfig) -> Self {
        Self {
            config,
            lexicon: OnceLock::new(),
            source_reads: AtomicUsize::new(0),
        }
    }

    /// Create a store around an already-built lexicon
    pub fn preloaded(lexicon: Lexicon) -> Self {
        let store = Self::new(LexiconConfig {
            include_fallback: false,
            sources: Vec::new(),
        });
        // A fresh OnceLock is always empty.
        let _ = store.lexicon.set(lexicon);
        store
    }

    /// Get the lexicon, building it on first use
    pub fn load(&self) -> &Lexicon {
        self.lexicon.get_or_init(|| self.build())
    }

    /// Check whether the snapshot has been built
    pub fn is_loaded(&self) -> bool {
        self.lexicon.get().is_some()
    }

    /// Number of source file reads attempted so far
    pub fn source_reads(&self) -> usize {
        self.source_reads.load(Ordering::Relaxed)
    }

    /// Store configuration
    pub fn config(&self) -> &LexiconConfig {
        &self.config
    }

    fn build(&self) -> Lexicon {
        let mut lexicon = if self.config.include_fallback {
            Lexicon::fallback()
        } else {
            Lexicon::new()
        };

        for source in &self.config.sources {
            self.source_reads.fetch_add(1, Ordering::Relaxed);
            match lexicon.merge_file(&source.path, source.skip_header) {
                Ok(stats) => {
                    info!(
                        "Loaded lexicon {} ({} entries, {} skipped lines)",
                        source.path.display(),
                        stats.loaded,
                        stats.skipped
                    );
                }
                Err(e) => {
                    warn!("Failed to load lexicon file {}: {}", source.path.display(), e);
                }
            }
        }

        info!("Total lexicon entries: {}", lexicon.len());
        metrics::gauge!("moodtrip_lexicon_entries").set(lexicon.len() as f64);

        lexicon
    }
}
