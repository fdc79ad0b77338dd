//! Query keyword extraction.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Built-in stop words: articles, auxiliaries, prepositions, conjunctions
/// and the filler words people type into a recipe search box.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    // articles and determiners
    "the", "a", "an", "this", "that", "these", "those", "some", "any",
    // auxiliaries
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "can", "may", "might",
    // prepositions
    "in", "on", "at", "to", "for", "of", "with", "by", "from", "into", "about",
    "over", "under", "without",
    // conjunctions
    "and", "or", "but", "nor", "so", "yet",
    // search filler
    "recipe", "recipes", "food", "dish", "dishes", "make", "making", "cook",
    "how", "what", "where", "when", "which", "want", "like",
];

static DEFAULT_TOKENIZER: Lazy<Tokenizer> = Lazy::new(Tokenizer::default);

/// Minimum token length (exclusive) in graphemes.
const MIN_TOKEN_LEN: usize = 2;

/// Turns free-text queries into significant search tokens.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stop_words: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::with_stop_words(DEFAULT_STOP_WORDS.iter().copied())
    }
}

impl Tokenizer {
    /// Create a tokenizer with a custom stop-word list.
    pub fn with_stop_words<I, S>(stop_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stop_words: stop_words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Extract keywords in query order.
    ///
    /// Lower-cases, drops every character that is not alphanumeric, `_` or
    /// whitespace, splits on whitespace, then removes stop words and tokens
    /// of two graphemes or fewer. Duplicates are kept.
    pub fn extract_keywords(&self, query: &str) -> Vec<String> {
        let cleaned: String = query
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
            .collect();

        cleaned
            .split_whitespace()
            .filter(|token| token.graphemes(true).count() > MIN_TOKEN_LEN)
            .filter(|token| !self.stop_words.contains(*token))
            .map(String::from)
            .collect()
    }

    /// Extract keywords with duplicates removed, keeping first occurrence.
    pub fn unique_keywords(&self, query: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.extract_keywords(query)
            .into_iter()
            .filter(|token| seen.insert(token.clone()))
            .collect()
    }

    /// Check whether a word is on this tokenizer's stop list.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }
}

/// Extract keywords using the built-in stop-word list.
pub fn extract_keywords(query: &str) -> Vec<String> {
    DEFAULT_TOKENIZER.extract_keywords(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_extraction() {
        assert_eq!(extract_keywords("Chicken Curry"), vec!["chicken", "curry"]);
    }

    #[test]
    fn test_stop_words_removed() {
        assert_eq!(
            extract_keywords("how to make the best pad thai recipe"),
            vec!["best", "pad", "thai"]
        );
    }

    #[test]
    fn test_short_tokens_removed() {
        assert_eq!(extract_keywords("an egg on rice"), vec!["egg", "rice"]);
        assert!(extract_keywords("oh my ok").is_empty());
    }

    #[test]
    fn test_punctuation_stripped_not_split() {
        assert_eq!(extract_keywords("mac-and-cheese!"), vec!["macandcheese"]);
        assert_eq!(extract_keywords("garlic, butter."), vec!["garlic", "butter"]);
    }

    #[test]
    fn test_only_stop_words_is_empty() {
        assert!(extract_keywords("what is the recipe for").is_empty());
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   ").is_empty());
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        assert_eq!(
            extract_keywords("soup tomato soup"),
            vec!["soup", "tomato", "soup"]
        );
    }

    #[test]
    fn test_unique_keywords() {
        let tokenizer = Tokenizer::default();
        assert_eq!(
            tokenizer.unique_keywords("soup tomato SOUP"),
            vec!["soup", "tomato"]
        );
    }

    #[test]
    fn test_unicode_length_counts_graphemes() {
        assert_eq!(extract_keywords("crème brûlée"), vec!["crème", "brûlée"]);
        // "çà" is two graphemes
        assert_eq!(extract_keywords("pâté çà"), vec!["pâté"]);
    }

    #[test]
    fn test_custom_stop_words() {
        let tokenizer = Tokenizer::with_stop_words(["Spicy"]);
        assert_eq!(tokenizer.extract_keywords("spicy recipe"), vec!["recipe"]);
        assert!(tokenizer.is_stop_word("SPICY"));
    }

    #[test]
    fn test_deterministic() {
        let query = "Quick vegan lentil soup with spinach";
        assert_eq!(extract_keywords(query), extract_keywords(query));
    }
}
