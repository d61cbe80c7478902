//! Emotion-weighted VAD aggregation

use crate::lexicon::Lexicon;
use moodtrip_core::Vad;

/// Weight of an emotionally salient match
pub const SALIENT_WEIGHT: f32 = 2.0;

/// Weight of any other match
pub const PLAIN_WEIGHT: f32 = 1.0;

/// Low-energy words that read calmer and slightly more pleasant than their
/// lexicon entry suggests
const CALMING_TOKENS: [&str; 5] = ["tired", "sleepy", "exhausted", "quiet", "peace"];

/// Salient entries are clearly pleasant, clearly unpleasant, or aroused
pub fn is_salient(vad: &Vad) -> bool {
    vad.valence < 0.4 || vad.valence > 0.6 || vad.arousal > 0.6
}

/// Token-specific correction applied to a per-call copy of the entry
fn adjust(token: &str, mut vad: Vad) -> Vad {
    if CALMING_TOKENS.contains(&token) {
        vad.valence = (vad.valence + 0.1).min(1.0);
        vad.arousal = (vad.arousal - 0.2).max(0.0);
    }
    vad
}

/// Aggregate score with matching detail
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub vad: Vad,

    /// Tokens found in the lexicon, in input order
    pub matched: Vec<String>,

    /// Sum of weights; zero when nothing matched
    pub total_weight: f32,
}

impl Score {
    pub fn is_unmatched(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Weighted mean VAD of the tokens found in `lexicon`.
///
/// Returns [`Vad::NEUTRAL`] when no token matches.
pub fn score<S: AsRef<str>>(tokens: &[S], lexicon: &Lexicon) -> Vad {
    score_detailed(tokens, lexicon).vad
}

/// Like [`score`], also reporting matched tokens and total weight
pub fn score_detailed<S: AsRef<str>>(tokens: &[S], lexicon: &Lexicon) -> Score {
    let (mut sum_v, mut sum_a, mut sum_d, mut total) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
    let mut matched = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        let Some(entry) = lexicon.get(token) else {
            continue;
        };

        // Salience is judged on the stored entry, before any correction
        let weight = if is_salient(entry) {
            SALIENT_WEIGHT
        } else {
            PLAIN_WEIGHT
        };
        let vad = adjust(token, *entry);

        sum_v += vad.valence * weight;
        sum_a += vad.arousal * weight;
        sum_d += vad.dominance * weight;
        total += weight;
        matched.push(token.to_string());
    }

    let vad = if total > 0.0 {
        Vad::new(sum_v / total, sum_a / total, sum_d / total)
    } else {
        Vad::NEUTRAL
    };

    Score {
        vad,
        matched,
        total_weight: total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon(entries: &[(&str, Vad)]) -> Lexicon {
        entries.iter().map(|(w, v)| (w.to_string(), *v)).collect()
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_unknown_tokens_give_neutral() {
        let lex = lexicon(&[("happy", Vad::new(0.85, 0.55, 0.62))]);
        let result = score_detailed(&["zzz", "qwerty"], &lex);
        assert_eq!(result.vad, Vad::new(0.5, 0.5, 0.5));
        assert!(result.is_unmatched());
        assert_eq!(result.total_weight, 0.0);

        let empty: [&str; 0] = [];
        assert_eq!(score(&empty, &lex), Vad::NEUTRAL);
    }

    #[test]
    fn test_single_match_is_returned_exactly() {
        let excited = Vad::new(0.8, 0.85, 0.65);
        let lex = lexicon(&[("excited", excited)]);
        let result = score_detailed(&["feel", "excited", "today"], &lex);
        assert_eq!(result.vad, excited);
        assert_eq!(result.matched, vec!["excited"]);
        assert_eq!(result.total_weight, SALIENT_WEIGHT);
    }

    #[test]
    fn test_salient_entries_weigh_double() {
        let lex = lexicon(&[
            ("thrilled", Vad::new(0.9, 0.9, 0.9)),
            ("okay", Vad::new(0.5, 0.5, 0.3)),
        ]);
        let vad = score(&["thrilled", "okay"], &lex);
        assert!(approx(vad.valence, (0.9 * 2.0 + 0.5) / 3.0));
        assert!(approx(vad.dominance, (0.9 * 2.0 + 0.3) / 3.0));
    }

    #[test]
    fn test_salience_boundaries() {
        assert!(!is_salient(&Vad::new(0.4, 0.6, 0.5)));
        assert!(!is_salient(&Vad::new(0.6, 0.2, 0.5)));
        assert!(is_salient(&Vad::new(0.39, 0.5, 0.5)));
        assert!(is_salient(&Vad::new(0.5, 0.61, 0.5)));
    }

    #[test]
    fn test_repeated_tokens_count_each_time() {
        let lex = lexicon(&[
            ("sad", Vad::new(0.15, 0.30, 0.35)),
            ("happy", Vad::new(0.85, 0.55, 0.62)),
        ]);
        let vad = score(&["sad", "sad", "happy"], &lex);
        assert!(approx(vad.valence, (0.15 * 4.0 + 0.85 * 2.0) / 6.0));
    }

    #[test]
    fn test_calming_nudge_does_not_touch_lexicon() {
        let tired = Vad::new(0.3, 0.1, 0.4);
        let lex = lexicon(&[("tired", tired)]);

        let vad = score(&["tired"], &lex);
        assert!(approx(vad.valence, 0.4));
        assert_eq!(vad.arousal, 0.0);
        assert_eq!(vad.dominance, 0.4);

        // shared entry unchanged, so a second call sees the same input
        assert_eq!(lex.get("tired"), Some(&tired));
        assert_eq!(score(&["tired"], &lex), vad);
    }

    #[test]
    fn test_calming_nudge_caps_valence() {
        let lex = lexicon(&[("peace", Vad::new(0.95, 0.3, 0.6))]);
        let vad = score(&["peace"], &lex);
        assert_eq!(vad.valence, 1.0);
        assert!(approx(vad.arousal, 0.1));
    }
}
