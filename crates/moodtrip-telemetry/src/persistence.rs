//! Inference history persistence
//!
//! Provides file-based persistence for inference results with:
//! - JSON-lines format for append-only writes
//! - A best-effort recording path that never fails the caller
//! - Query and per-mood tally over the stored history

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use moodtrip_core::{Mood, MoodResult, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One persisted inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRecord {
    /// Unique record ID
    pub id: String,

    /// Authenticated user, if the caller had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    pub input_text: String,
    pub mood: Mood,
    pub valence: f32,
    pub arousal: f32,
    pub dominance: f32,
    pub created_at: DateTime<Utc>,
}

impl InferenceRecord {
    /// Create a record for an inference result
    pub fn new(input_text: impl Into<String>, result: &MoodResult) -> Self {
        Self {
            id: generate_record_id(),
            user_id: None,
            input_text: input_text.into(),
            mood: result.mood,
            valence: result.vad.valence,
            arousal: result.vad.arousal,
            dominance: result.vad.dominance,
            created_at: Utc::now(),
        }
    }

    /// Set user ID
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

fn generate_record_id() -> String {
    format!("inf_{}", uuid::Uuid::new_v4())
}

/// Destination for inference records
#[async_trait]
pub trait InferenceSink: Send + Sync {
    async fn record(&self, record: &InferenceRecord) -> Result<()>;
}

/// Record an inference, logging instead of failing
pub async fn record_best_effort(sink: &dyn InferenceSink, record: &InferenceRecord) -> bool {
    match sink.record(record).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to save inference {}: {}", record.id, e);
            false
        }
    }
}

/// Append-only JSON-lines inference log
pub struct InferenceLog {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl InferenceLog {
    /// Open (or create) the log file, creating parent directories
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record and flush it to disk
    pub fn append(&self, record: &InferenceRecord) -> Result<()> {
        let line = serde_json::to_string(record)?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        debug!("Saved inference {} ({})", record.id, record.mood);
        Ok(())
    }
}

#[async_trait]
impl InferenceSink for InferenceLog {
    async fn record(&self, record: &InferenceRecord) -> Result<()> {
        self.append(record)
    }
}

/// Query filter for stored inferences
#[derive(Debug, Clone, Default)]
pub struct InferenceQuery {
    /// Filter by mood
    pub mood: Option<Mood>,

    /// Filter by user ID
    pub user_id: Option<String>,

    /// Maximum results to return, newest first
    pub limit: Option<usize>,
}

impl InferenceQuery {
    /// Create a new empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by mood
    pub fn mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    /// Filter by user ID
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set limit
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, record: &InferenceRecord) -> bool {
        if self.mood.is_some_and(|m| m != record.mood) {
            return false;
        }
        if let Some(ref user_id) = self.user_id {
            if record.user_id.as_ref() != Some(user_id) {
                return false;
            }
        }
        true
    }
}

/// Reader over an inference log
pub struct InferenceReader {
    path: PathBuf,
}

impl InferenceReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Every readable record, in file order. A missing log is empty.
    pub fn read_all(&self) -> Result<Vec<InferenceRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<InferenceRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable inference record at line {}: {}", index + 1, e),
            }
        }

        Ok(records)
    }

    /// Records matching the query, newest first
    pub fn query(&self, query: &InferenceQuery) -> Result<Vec<InferenceRecord>> {
        let mut records: Vec<_> = self
            .read_all()?
            .into_iter()
            .filter(|r| query.matches(r))
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = query.limit {
            records.truncate(limit);
        }
        Ok(records)
    }

    /// Count of stored inferences per mood, in mood table order
    pub fn mood_tally(&self) -> Result<Vec<(Mood, usize)>> {
        let records = self.read_all()?;
        Ok(Mood::ALL
            .iter()
            .map(|mood| (*mood, records.iter().filter(|r| r.mood == *mood).count()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodtrip_core::Vad;
    use tempfile::TempDir;

    fn result(mood: Mood) -> MoodResult {
        MoodResult {
            mood,
            vad: Vad::new(0.8, 0.85, 0.65),
        }
    }

    #[test]
    fn test_write_and_read_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("inferences.jsonl");
        let log = InferenceLog::open(&path).unwrap();

        log.append(&InferenceRecord::new("so excited", &result(Mood::Adventure)))
            .unwrap();
        log.append(&InferenceRecord::new("meh", &result(Mood::Neutral)).with_user_id("u1"))
            .unwrap();

        let records = InferenceReader::new(&path).read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].input_text, "so excited");
        assert_eq!(records[0].valence, 0.8);
        assert!(records[0].id.starts_with("inf_"));
        assert_eq!(records[1].user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_query_filters() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inferences.jsonl");
        let log = InferenceLog::open(&path).unwrap();

        for mood in [Mood::Sad, Mood::Happy, Mood::Sad] {
            log.append(&InferenceRecord::new("text", &result(mood)).with_user_id("u1"))
                .unwrap();
        }
        log.append(&InferenceRecord::new("text", &result(Mood::Sad))).unwrap();

        let reader = InferenceReader::new(&path);
        assert_eq!(reader.query(&InferenceQuery::new().mood(Mood::Sad)).unwrap().len(), 3);
        assert_eq!(
            reader
                .query(&InferenceQuery::new().mood(Mood::Sad).user_id("u1"))
                .unwrap()
                .len(),
            2
        );
        assert_eq!(reader.query(&InferenceQuery::new().limit(1)).unwrap().len(), 1);

        let tally = reader.mood_tally().unwrap();
        assert!(tally.contains(&(Mood::Sad, 3)));
        assert!(tally.contains(&(Mood::Happy, 1)));
        assert!(tally.contains(&(Mood::Love, 0)));
    }

    #[test]
    fn test_corrupt_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("inferences.jsonl");
        let log = InferenceLog::open(&path).unwrap();
        log.append(&InferenceRecord::new("ok", &result(Mood::Love))).unwrap();
        drop(log);

        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("{not json\n");
        std::fs::write(&path, content).unwrap();

        assert_eq!(InferenceReader::new(&path).read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let reader = InferenceReader::new("/nonexistent/inferences.jsonl");
        assert!(reader.read_all().unwrap().is_empty());
    }
}
