//! Text → mood → trips, with best-effort history

use moodtrip_core::{Mood, Result, Trip, TripCatalog, Vad};
use moodtrip_lexicon::MoodAnalyzer;
use moodtrip_telemetry::{record_best_effort, InferenceRecord, InferenceSink};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Response of a recommendation request
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub mood: Mood,
    pub vad: Vad,
    pub trips: Vec<Trip>,
}

/// Composes inference, catalog lookup and history recording
pub struct Recommender {
    analyzer: MoodAnalyzer,
    catalog: Arc<dyn TripCatalog>,
    sink: Option<Arc<dyn InferenceSink>>,
    limit: usize,
}

impl Recommender {
    pub fn new(analyzer: MoodAnalyzer, catalog: Arc<dyn TripCatalog>, limit: usize) -> Self {
        Self {
            analyzer,
            catalog,
            sink: None,
            limit,
        }
    }

    /// Record every inference to `sink`
    pub fn with_sink(mut self, sink: Arc<dyn InferenceSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Recommend trips for the user's text.
    ///
    /// Fails only when no text is given. A catalog failure yields no trips
    /// and a history failure is logged; neither changes mood or VAD.
    pub async fn recommend(&self, text: Option<&str>, user_id: Option<&str>) -> Result<Recommendation> {
        let result = self.analyzer.handle(text)?;
        let text = text.unwrap_or_default();

        let trips = match self.catalog.trips_for_mood(result.mood, self.limit).await {
            Ok(trips) => trips,
            Err(e) => {
                warn!("Trip lookup for mood {} failed: {}", result.mood, e);
                Vec::new()
            }
        };

        if let Some(ref sink) = self.sink {
            let mut record = InferenceRecord::new(text, &result);
            if let Some(user_id) = user_id {
                record = record.with_user_id(user_id);
            }
            record_best_effort(sink.as_ref(), &record).await;
        }

        info!("Recommended {} trips for mood {}", trips.len(), result.mood);

        Ok(Recommendation {
            mood: result.mood,
            vad: result.vad,
            trips,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use moodtrip_core::{Error, InMemoryCatalog};
    use moodtrip_lexicon::LexiconConfig;
    use moodtrip_telemetry::{InferenceLog, InferenceReader};

    struct BrokenCatalog;

    #[async_trait]
    impl TripCatalog for BrokenCatalog {
        async fn trips_for_mood(&self, _mood: Mood, _limit: usize) -> Result<Vec<Trip>> {
            Err(Error::catalog("connection refused"))
        }
    }

    struct BrokenSink;

    #[async_trait]
    impl InferenceSink for BrokenSink {
        async fn record(&self, _record: &InferenceRecord) -> Result<()> {
            Err(Error::internal("disk full"))
        }
    }

    fn trip(id: &str, mood: &str) -> Trip {
        Trip {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            location: None,
            image_url: None,
            moods: vec![mood.to_string()],
            created_at: Utc::now(),
        }
    }

    fn analyzer() -> MoodAnalyzer {
        MoodAnalyzer::from_config(LexiconConfig::fallback_only())
    }

    #[tokio::test]
    async fn test_recommends_trips_for_mood() {
        let catalog = InMemoryCatalog::new(vec![trip("trek", "adventure"), trip("spa", "relaxed")]);
        let recommender = Recommender::new(analyzer(), Arc::new(catalog), 10);

        let rec = recommender
            .recommend(Some("I feel so excited and adventurous today"), None)
            .await
            .unwrap();
        assert_eq!(rec.mood, Mood::Adventure);
        assert_eq!(rec.trips.len(), 1);
        assert_eq!(rec.trips[0].id, "trek");
    }

    #[tokio::test]
    async fn test_missing_text_is_rejected() {
        let recommender = Recommender::new(analyzer(), Arc::new(InMemoryCatalog::default()), 10);
        assert!(matches!(
            recommender.recommend(None, None).await,
            Err(Error::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_failures_do_not_change_result() {
        let recommender = Recommender::new(analyzer(), Arc::new(BrokenCatalog), 10)
            .with_sink(Arc::new(BrokenSink));

        let rec = recommender.recommend(Some("so sad"), None).await.unwrap();
        assert!(rec.trips.is_empty());
        assert_eq!(rec.mood, analyzer().infer("so sad").mood);
    }

    #[tokio::test]
    async fn test_history_is_recorded() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("inferences.jsonl");
        let log = InferenceLog::open(&path).unwrap();
        let recommender = Recommender::new(analyzer(), Arc::new(InMemoryCatalog::default()), 10)
            .with_sink(Arc::new(log));

        recommender.recommend(Some("bored"), Some("u42")).await.unwrap();

        let records = InferenceReader::new(&path).read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mood, Mood::Bored);
        assert_eq!(records[0].user_id.as_deref(), Some("u42"));
        assert_eq!(records[0].input_text, "bored");
    }
}
