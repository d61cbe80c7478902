//! Trip catalog boundary
//!
//! The catalog is owned by an external collaborator. moodtrip only asks it
//! one question: which trips are tagged with a given mood, newest first.

use crate::error::{Error, Result};
use crate::types::Mood;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A recommendable trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub name: String,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Mood tags this trip is recommended for
    #[serde(default)]
    pub moods: Vec<String>,

    pub created_at: DateTime<Utc>,
}

impl Trip {
    /// Check whether the trip carries the given mood tag
    pub fn has_mood(&self, mood: Mood) -> bool {
        self.moods.iter().any(|m| m.eq_ignore_ascii_case(mood.as_str()))
    }
}

/// Source of trips keyed by mood
#[async_trait]
pub trait TripCatalog: Send + Sync {
    /// Trips tagged with `mood`, most recent first, at most `limit`
    async fn trips_for_mood(&self, mood: Mood, limit: usize) -> Result<Vec<Trip>>;
}

/// Catalog held entirely in memory, typically seeded from a JSON file
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    trips: Vec<Trip>,
}

impl InMemoryCatalog {
    /// Create a catalog from a list of trips
    pub fn new(mut trips: Vec<Trip>) -> Self {
        trips.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Self { trips }
    }

    /// Load a JSON array of trips
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::catalog(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;
        let trips: Vec<Trip> = serde_json::from_str(&content)?;
        info!("Loaded {} trips from {}", trips.len(), path.display());
        Ok(Self::new(trips))
    }

    /// Number of trips in the catalog
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

#[async_trait]
impl TripCatalog for InMemoryCatalog {
    async fn trips_for_mood(&self, mood: Mood, limit: usize) -> Result<Vec<Trip>> {
        Ok(self
            .trips
            .iter()
            .filter(|t| t.has_mood(mood))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn trip(id: &str, moods: &[&str], day: u32) -> Trip {
        Trip {
            id: id.to_string(),
            name: format!("Trip {}", id),
            description: "desc".to_string(),
            location: None,
            image_url: None,
            moods: moods.iter().map(|m| m.to_string()).collect(),
            created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_filters_by_mood_newest_first() {
        let catalog = InMemoryCatalog::new(vec![
            trip("a", &["adventure"], 1),
            trip("b", &["relaxed"], 2),
            trip("c", &["adventure", "relaxed"], 3),
        ]);

        let trips = catalog.trips_for_mood(Mood::Adventure, 10).await.unwrap();
        let ids: Vec<_> = trips.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn test_limit_bounds_result() {
        let catalog = InMemoryCatalog::new(
            (1..=5).map(|d| trip(&d.to_string(), &["sad"], d)).collect(),
        );

        let trips = catalog.trips_for_mood(Mood::Sad, 2).await.unwrap();
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].id, "5");
    }

    #[test]
    fn test_from_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"[{"id":"1","name":"Kyoto","description":"Temples","moods":["sad","relaxed"],"created_at":"2024-03-01T00:00:00Z"}]"#,
        )
        .unwrap();

        let catalog = InMemoryCatalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_missing_file_is_catalog_error() {
        let err = InMemoryCatalog::from_file("/nonexistent/trips.json").unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }
}
