//! Nearest-centroid mood classification in VAD space

use moodtrip_core::{Mood, Vad};

/// Reference VAD for every mood, in tie-break order
pub const MOOD_CENTROIDS: [(Mood, Vad); 10] = [
    (Mood::Happy, Vad::new(0.85, 0.65, 0.70)),
    (Mood::Sad, Vad::new(0.20, 0.25, 0.30)),
    (Mood::Angry, Vad::new(0.20, 0.85, 0.75)),
    (Mood::Fear, Vad::new(0.15, 0.85, 0.25)),
    (Mood::Relaxed, Vad::new(0.75, 0.35, 0.60)),
    (Mood::Adventure, Vad::new(0.75, 0.80, 0.65)),
    (Mood::Love, Vad::new(0.90, 0.60, 0.70)),
    (Mood::Stressed, Vad::new(0.25, 0.80, 0.45)),
    (Mood::Bored, Vad::new(0.35, 0.20, 0.40)),
    (Mood::Neutral, Vad::NEUTRAL),
];

/// Centroid of a mood
pub fn centroid(mood: Mood) -> Vad {
    MOOD_CENTROIDS
        .iter()
        .find(|(m, _)| *m == mood)
        .map(|(_, v)| *v)
        .unwrap_or(Vad::NEUTRAL)
}

/// Distance from `vad` to every centroid, in table order
pub fn distances(vad: &Vad) -> Vec<(Mood, f32)> {
    MOOD_CENTROIDS
        .iter()
        .map(|(mood, reference)| (*mood, vad.distance(reference)))
        .collect()
}

/// Nearest centroid and its distance; the earlier centroid wins exact ties
pub fn nearest(vad: &Vad) -> (Mood, f32) {
    let mut best = (Mood::Neutral, f32::INFINITY);
    for (mood, reference) in &MOOD_CENTROIDS {
        let distance = vad.distance(reference);
        if distance < best.1 {
            best = (*mood, distance);
        }
    }
    best
}

/// Mood label of the nearest centroid
pub fn classify(vad: &Vad) -> Mood {
    nearest(vad).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centroid_classifies_as_itself() {
        for (mood, reference) in MOOD_CENTROIDS {
            assert_eq!(nearest(&reference), (mood, 0.0));
        }
    }

    #[test]
    fn test_neutral_vector_is_neutral() {
        assert_eq!(classify(&Vad::NEUTRAL), Mood::Neutral);
    }

    #[test]
    fn test_excited_is_adventure() {
        assert_eq!(classify(&Vad::new(0.8, 0.85, 0.65)), Mood::Adventure);
    }

    #[test]
    fn test_distances_cover_every_mood() {
        let all = distances(&Vad::new(0.1, 0.9, 0.9));
        assert_eq!(all.len(), MOOD_CENTROIDS.len());
        let (mood, min) = nearest(&Vad::new(0.1, 0.9, 0.9));
        assert_eq!(mood, Mood::Angry);
        assert!(all.iter().all(|(_, d)| *d >= min));
    }

    #[test]
    fn test_every_mood_has_a_centroid() {
        for mood in Mood::ALL {
            assert!(MOOD_CENTROIDS.iter().any(|(m, _)| *m == mood));
        }
    }
}
