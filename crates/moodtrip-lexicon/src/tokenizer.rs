//! Word tokenizer shared by the lexicon builder and inference
//!
//! Lower-cases the input, turns every Unicode punctuation or symbol
//! character into a separator, splits on whitespace and drops words of two
//! characters or fewer. No stemming.

use regex::Regex;
use std::sync::OnceLock;

/// Words with this many characters or fewer are dropped
pub const MIN_TOKEN_CHARS: usize = 2;

fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS
        .get_or_init(|| Regex::new(r"[\p{P}\p{S}]").expect("separator pattern is a valid regex"))
}

/// Split `text` into normalized word tokens.
///
/// Order is preserved and duplicates are kept, so a repeated word counts
/// once per occurrence downstream.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    separators()
        .replace_all(&lowered, " ")
        .split_whitespace()
        .filter(|w| w.chars().count() > MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn test_punctuation_and_case() {
        // "i", "m" and "so" fall under the length filter
        assert_eq!(tokenize("I'm SO happy!!"), vec!["happy"]);
    }

    #[test]
    fn test_length_boundary() {
        assert_eq!(tokenize("an the joy"), vec!["the", "joy"]);
    }

    #[test]
    fn test_symbols_are_separators() {
        assert_eq!(
            tokenize("calm+relaxed=peace $$$ tired…sleepy"),
            vec!["calm", "relaxed", "peace", "tired", "sleepy"]
        );
    }

    #[test]
    fn test_duplicates_and_order_kept() {
        assert_eq!(
            tokenize("sad, sad, happy sad"),
            vec!["sad", "sad", "happy", "sad"]
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(tokenize("été œuf"), vec!["été", "œuf"]);
        assert!(tokenize("éé").is_empty());
    }

    proptest! {
        #[test]
        fn prop_tokens_are_normalized(text in "\\PC{0,80}") {
            for token in tokenize(&text) {
                prop_assert!(token.chars().count() > MIN_TOKEN_CHARS);
                prop_assert!(!token.chars().any(char::is_whitespace));
                prop_assert!(!separators().is_match(&token));
            }
        }
    }
}
