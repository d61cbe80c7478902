//! Core types for moodtrip

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point in Valence-Arousal-Dominance space.
///
/// After normalization every axis lies in `[0, 1]`; `0.5` on all three axes
/// is emotional neutrality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vad {
    /// Pleasantness (0 = unpleasant, 1 = pleasant)
    pub valence: f32,

    /// Activation (0 = calm, 1 = excited)
    pub arousal: f32,

    /// Control (0 = submissive, 1 = in control)
    pub dominance: f32,
}

impl Vad {
    /// The neutral midpoint `(0.5, 0.5, 0.5)`
    pub const NEUTRAL: Vad = Vad::new(0.5, 0.5, 0.5);

    /// Create a new VAD vector
    pub const fn new(valence: f32, arousal: f32, dominance: f32) -> Self {
        Self {
            valence,
            arousal,
            dominance,
        }
    }

    /// Euclidean distance to another vector
    pub fn distance(&self, other: &Vad) -> f32 {
        let dv = self.valence - other.valence;
        let da = self.arousal - other.arousal;
        let dd = self.dominance - other.dominance;
        (dv * dv + da * da + dd * dd).sqrt()
    }

    /// True when every axis lies in `[0, 1]`
    pub fn is_normalized(&self) -> bool {
        [self.valence, self.arousal, self.dominance]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }
}

impl Default for Vad {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Discrete mood label produced by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Fear,
    Relaxed,
    Adventure,
    Love,
    Stressed,
    Bored,
    Neutral,
}

impl Mood {
    /// Every mood, in centroid table order
    pub const ALL: [Mood; 10] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Fear,
        Mood::Relaxed,
        Mood::Adventure,
        Mood::Love,
        Mood::Stressed,
        Mood::Bored,
        Mood::Neutral,
    ];

    /// Lowercase label, as used for catalog tags
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Fear => "fear",
            Self::Relaxed => "relaxed",
            Self::Adventure => "adventure",
            Self::Love => "love",
            Self::Stressed => "stressed",
            Self::Bored => "bored",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Mood::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == needle)
            .ok_or_else(|| format!("unknown mood '{}'", s))
    }
}

/// Outcome of a single inference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodResult {
    /// Nearest mood centroid
    pub mood: Mood,

    /// Aggregate VAD of the input text
    pub vad: Vad,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        let v = Vad::new(0.8, 0.85, 0.65);
        assert_eq!(v.distance(&v), 0.0);
    }

    #[test]
    fn test_distance_is_euclidean() {
        let a = Vad::new(0.0, 0.0, 0.0);
        let b = Vad::new(1.0, 0.0, 0.0);
        assert!((a.distance(&b) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_mood_round_trips_through_str() {
        for mood in Mood::ALL {
            assert_eq!(mood.as_str().parse::<Mood>().unwrap(), mood);
        }
        assert_eq!(" Relaxed ".parse::<Mood>().unwrap(), Mood::Relaxed);
        assert!("relax".parse::<Mood>().is_err());
    }

    #[test]
    fn test_mood_result_serializes_lowercase() {
        let result = MoodResult {
            mood: Mood::Adventure,
            vad: Vad::NEUTRAL,
        };
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["mood"], "adventure");
        assert_eq!(json["vad"]["valence"], 0.5);
    }
}
