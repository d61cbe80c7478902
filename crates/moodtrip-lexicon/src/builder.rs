//! Offline lexicon builder
//!
//! Mines a GoEmotions-style corpus (`text<TAB>comma-separated emotion ids`)
//! into a word → VAD lexicon. Each record's fine-grained emotions are
//! folded into a set of coarse mood categories; every token of the record
//! is counted once per category in that set. A word's lexicon vector is the
//! reference VAD of its most frequent category.

use crate::config::{AcceptancePolicy, BuilderConfig};
use crate::lexicon::Lexicon;
use crate::tokenizer::tokenize;
use moodtrip_core::{Error, Result, Vad};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// Fine-grained emotion labels, indexed by corpus emotion id
pub const EMOTION_LABELS: [&str; 28] = [
    "admiration",
    "amusement",
    "anger",
    "annoyance",
    "approval",
    "caring",
    "confusion",
    "curiosity",
    "desire",
    "disappointment",
    "disapproval",
    "disgust",
    "embarrassment",
    "excitement",
    "fear",
    "gratitude",
    "grief",
    "joy",
    "love",
    "nervousness",
    "optimism",
    "pride",
    "realization",
    "relief",
    "remorse",
    "sadness",
    "surprise",
    "neutral",
];

/// Coarse mood bucket used only while building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoodCategory {
    Adventure,
    Relax,
    AngryStressed,
    Sad,
    Neutral,
}

impl MoodCategory {
    /// Every category; also the tie-break order for dominant-category selection
    pub const ALL: [MoodCategory; 5] = [
        MoodCategory::Adventure,
        MoodCategory::Relax,
        MoodCategory::AngryStressed,
        MoodCategory::Sad,
        MoodCategory::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adventure => "adventure",
            Self::Relax => "relax",
            Self::AngryStressed => "angry/stressed",
            Self::Sad => "sad",
            Self::Neutral => "neutral",
        }
    }

    /// Reference VAD written for every word whose dominant category this is
    pub fn reference_vad(&self) -> Vad {
        match self {
            Self::Adventure => Vad::new(0.78, 0.80, 0.62),
            Self::Relax => Vad::new(0.75, 0.30, 0.55),
            Self::AngryStressed => Vad::new(0.20, 0.75, 0.40),
            Self::Sad => Vad::new(0.20, 0.35, 0.35),
            Self::Neutral => Vad::NEUTRAL,
        }
    }

    /// Coarse category of a fine-grained emotion label
    pub fn for_emotion(label: &str) -> Option<Self> {
        let category = match label {
            "excitement" | "joy" | "love" | "pride" | "amusement" | "approval" | "gratitude"
            | "optimism" => Self::Adventure,
            "relief" | "caring" | "admiration" | "desire" => Self::Relax,
            "anger" | "annoyance" | "disapproval" | "disgust" | "fear" | "nervousness"
            | "embarrassment" | "grief" => Self::AngryStressed,
            "sadness" | "disappointment" | "remorse" | "confusion" => Self::Sad,
            "neutral" | "surprise" | "curiosity" | "realization" => Self::Neutral,
            _ => return None,
        };
        Some(category)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Distinct categories named by a comma-separated emotion id list.
///
/// Unknown or non-numeric ids are dropped. Each category appears once even
/// when several emotions map to it.
pub fn categories_for_ids(emotion_ids: &str) -> Vec<MoodCategory> {
    let mut categories: Vec<MoodCategory> = emotion_ids
        .split(',')
        .filter_map(|id| id.trim().parse::<usize>().ok())
        .filter_map(|id| EMOTION_LABELS.get(id))
        .filter_map(|label| MoodCategory::for_emotion(label))
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

/// Per-word occurrence counts, one slot per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts([u32; 5]);

impl CategoryCounts {
    pub fn increment(&mut self, category: MoodCategory) {
        self.0[category.index()] += 1;
    }

    pub fn get(&self, category: MoodCategory) -> u32 {
        self.0[category.index()]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Category with the highest count; the earliest in [`MoodCategory::ALL`] wins ties
    pub fn best(&self) -> Option<(MoodCategory, u32)> {
        let mut best: Option<(MoodCategory, u32)> = None;
        for category in MoodCategory::ALL {
            let count = self.get(category);
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((category, count));
            }
        }
        best
    }
}

/// One accepted lexicon word
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltEntry {
    pub word: String,
    pub category: MoodCategory,
    pub count: u32,
    pub total: u32,
}

impl BuiltEntry {
    /// Share of the word's occurrences in its dominant category
    pub fn ratio(&self) -> f64 {
        self.count as f64 / self.total as f64
    }

    pub fn vad(&self) -> Vad {
        self.category.reference_vad()
    }

    /// Lexicon file line, without the trailing newline
    pub fn to_line(&self) -> String {
        let vad = self.vad();
        format!(
            "{}\t{}\t{}\t{}",
            self.word, vad.valence, vad.arousal, vad.dominance
        )
    }
}

/// Statistics for one build run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub files_read: usize,
    pub files_missing: usize,
    pub records_read: usize,
    pub records_malformed: usize,
    /// Records whose emotion ids mapped to no category
    pub records_uncategorized: usize,
    pub words_counted: usize,
    pub words_accepted: usize,
    accepted_per_category: [usize; 5],
}

impl BuildReport {
    /// Accepted words whose dominant category is `category`
    pub fn accepted_for(&self, category: MoodCategory) -> usize {
        self.accepted_per_category[category.index()]
    }
}

/// Accumulates word/category counts over one or more corpus files
#[derive(Debug, Clone)]
pub struct LexiconBuilder {
    policy: AcceptancePolicy,
    sort_by_confidence: bool,
    counts: BTreeMap<String, CategoryCounts>,
    report: BuildReport,
}

impl LexiconBuilder {
    pub fn new(policy: AcceptancePolicy) -> Self {
        Self {
            policy,
            sort_by_confidence: false,
            counts: BTreeMap::new(),
            report: BuildReport::default(),
        }
    }

    /// Order output by descending confidence ratio instead of by word
    pub fn sort_by_confidence(mut self, enabled: bool) -> Self {
        self.sort_by_confidence = enabled;
        self
    }

    /// Count one record
    pub fn add_record(&mut self, text: &str, emotion_ids: &str) {
        self.report.records_read += 1;

        let categories = categories_for_ids(emotion_ids);
        if categories.is_empty() {
            self.report.records_uncategorized += 1;
            return;
        }

        for word in tokenize(text) {
            let counts = self.counts.entry(word).or_default();
            for category in &categories {
                counts.increment(*category);
            }
        }
    }

    /// Count one corpus line; returns false if the line was malformed
    pub fn add_line(&mut self, line: &str) -> bool {
        let mut fields = line.split('\t');
        match (fields.next(), fields.next()) {
            (Some(text), Some(ids)) => {
                self.add_record(text, ids);
                true
            }
            _ => {
                self.report.records_malformed += 1;
                false
            }
        }
    }

    /// Count every non-blank line of a corpus
    pub fn add_corpus_str(&mut self, content: &str) {
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            if !self.add_line(line) {
                debug!("Skipping malformed corpus line {}", index + 1);
            }
        }
    }

    /// Count a corpus file; a missing file is logged and skipped.
    ///
    /// Invalid UTF-8 is replaced so one bad record cannot abort the build.
    pub fn add_corpus_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Corpus file {} not found, skipping", path.display());
            self.report.files_missing += 1;
            return Ok(());
        }

        let bytes = std::fs::read(path)
            .map_err(|e| Error::corpus(format!("Failed to read {}: {}", path.display(), e)))?;
        let before = self.report.records_read;
        self.add_corpus_str(&String::from_utf8_lossy(&bytes));
        self.report.files_read += 1;

        info!(
            "Processed {} records from {}",
            self.report.records_read - before,
            path.display()
        );
        Ok(())
    }

    /// Counts gathered so far for a word
    pub fn counts_for(&self, word: &str) -> Option<&CategoryCounts> {
        self.counts.get(word)
    }

    /// Select each word's dominant category and apply the acceptance policy
    pub fn finish(self) -> BuiltLexicon {
        let mut report = self.report;
        report.words_counted = self.counts.len();

        let mut entries: Vec<BuiltEntry> = self
            .counts
            .into_iter()
            .filter_map(|(word, counts)| {
                let (category, count) = counts.best()?;
                let total = counts.total();
                self.policy.accepts(count, total).then_some(BuiltEntry {
                    word,
                    category,
                    count,
                    total,
                })
            })
            .collect();

        if self.sort_by_confidence {
            entries.sort_by(|a, b| b.ratio().total_cmp(&a.ratio()));
        }

        for entry in &entries {
            report.accepted_per_category[entry.category.index()] += 1;
        }
        report.words_accepted = entries.len();

        BuiltLexicon { entries, report }
    }
}

/// Result of a build: accepted entries plus statistics
#[derive(Debug, Clone)]
pub struct BuiltLexicon {
    pub entries: Vec<BuiltEntry>,
    pub report: BuildReport,
}

impl BuiltLexicon {
    /// Write entries as tab-separated lexicon lines
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for entry in &self.entries {
            writeln!(writer, "{}", entry.to_line())?;
        }
        writer.flush()
    }

    /// Write the lexicon file, creating parent directories as needed
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))?;
        Ok(())
    }

    /// The built entries as an in-memory lexicon
    pub fn to_lexicon(&self) -> Lexicon {
        self.entries
            .iter()
            .map(|e| (e.word.clone(), e.vad()))
            .collect()
    }
}

/// Run a complete build from configuration and write the output file
pub fn build_from_config(config: &BuilderConfig) -> Result<BuildReport> {
    let mut builder =
        LexiconBuilder::new(config.policy).sort_by_confidence(config.sort_by_confidence);

    for input in &config.inputs {
        builder.add_corpus_file(input)?;
    }
    if config.inputs.is_empty() || builder.report.files_read == 0 {
        return Err(Error::corpus("no corpus files could be read"));
    }

    let built = builder.finish();
    built.write_file(&config.output)?;

    let report = built.report;
    info!(
        "Wrote {} entries to {} ({} words counted, {} records)",
        report.words_accepted,
        config.output.display(),
        report.words_counted,
        report.records_read
    );
    for category in MoodCategory::ALL {
        debug!("  {}: {} words", category.as_str(), report.accepted_for(category));
    }

    Ok(report)
}
