//! Scoring policy.
//!
//! Every weight and threshold the scorer uses lives here so the ranking can
//! be tuned from a config file without touching the algorithm. Defaults
//! reproduce the production tuning.

use crate::error::{Result, SearchError};
use crate::tokenizer::{Tokenizer, DEFAULT_STOP_WORDS};
use serde::{Deserialize, Serialize};

/// Root scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Additive signal weights
    pub weights: ScoringWeights,

    /// Similarity, score and suggestion cut-offs
    pub thresholds: ScoringThresholds,

    /// Provenance label of community-submitted recipes
    pub community_source: String,

    /// Query term list → provenance boosts
    pub domain_affinities: Vec<DomainAffinity>,

    /// Replaces the built-in stop-word list when set
    pub stop_words: Option<Vec<String>>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            thresholds: ScoringThresholds::default(),
            community_source: default_community_source(),
            domain_affinities: vec![DomainAffinity::default()],
            stop_words: None,
        }
    }
}

impl ScoringConfig {
    /// Check that thresholds are usable.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        let w = &self.weights;

        for (name, value) in [
            ("fuzzy_title_scale", w.fuzzy_title_scale),
            ("fuzzy_ingredient_scale", w.fuzzy_ingredient_scale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SearchError::InvalidConfig(format!(
                    "weights.{} must be a finite, non-negative number, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [
            ("fuzzy_title", t.fuzzy_title),
            ("fuzzy_ingredient", t.fuzzy_ingredient),
            ("suggestion_min", t.suggestion_min),
            ("suggestion_max", t.suggestion_max),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SearchError::InvalidConfig(format!(
                    "thresholds.{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if t.suggestion_min >= t.suggestion_max {
            return Err(SearchError::InvalidConfig(format!(
                "thresholds.suggestion_min ({}) must be below suggestion_max ({})",
                t.suggestion_min, t.suggestion_max
            )));
        }

        if t.suggestion_limit == 0 {
            return Err(SearchError::InvalidConfig(
                "thresholds.suggestion_limit must be at least 1".to_string(),
            ));
        }

        if t.partial_group > t.exact_group {
            return Err(SearchError::InvalidConfig(format!(
                "thresholds.partial_group ({}) must not exceed exact_group ({})",
                t.partial_group, t.exact_group
            )));
        }

        if let Some(affinity) = self.domain_affinities.iter().find(|a| a.terms.is_empty()) {
            return Err(SearchError::InvalidConfig(format!(
                "domain affinity for source {:?} has no terms",
                affinity.source
            )));
        }

        Ok(())
    }

    /// Build the tokenizer this policy asks for.
    pub fn tokenizer(&self) -> Tokenizer {
        match &self.stop_words {
            Some(words) => Tokenizer::with_stop_words(words),
            None => Tokenizer::with_stop_words(DEFAULT_STOP_WORDS.iter().copied()),
        }
    }
}

fn default_community_source() -> String {
    "Community".to_string()
}

/// Additive weights for each scoring signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Whole query is a substring of the title
    pub exact_title: u32,
    /// Keyword is a substring of the title
    pub title_keyword: u32,
    /// Keyword is a substring of the description
    pub description_keyword: u32,
    /// Keyword appears in any ingredient
    pub ingredient_keyword: u32,
    /// Keyword appears in any tag
    pub tag_keyword: u32,
    /// Multiplier for fuzzy title-word similarity
    pub fuzzy_title_scale: f64,
    /// Multiplier for fuzzy ingredient-word similarity
    pub fuzzy_ingredient_scale: f64,
    /// Flat bonus for community recipes
    pub community_bonus: u32,
    /// Per distinct matched keyword, once more than one matched
    pub multi_keyword_per_match: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact_title: 100,
            title_keyword: 50,
            description_keyword: 20,
            ingredient_keyword: 40,
            tag_keyword: 30,
            fuzzy_title_scale: 30.0,
            fuzzy_ingredient_scale: 25.0,
            community_bonus: 5,
            multi_keyword_per_match: 10,
        }
    }
}

/// Cut-offs used by scoring, ranking, grouping and suggestions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringThresholds {
    /// Title-word similarity must exceed this
    pub fuzzy_title: f64,
    /// Ingredient-word similarity must exceed this
    pub fuzzy_ingredient: f64,
    /// Default minimum score kept by a search
    pub min_score: u32,
    /// Score at which a result counts as an exact match
    pub exact_group: u32,
    /// Score at which a result counts as a partial match
    pub partial_group: u32,
    /// Suggestions need similarity strictly above this
    pub suggestion_min: f64,
    /// Suggestions need similarity strictly below this
    pub suggestion_max: f64,
    /// Maximum number of suggestions
    pub suggestion_limit: usize,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            fuzzy_title: 0.70,
            fuzzy_ingredient: 0.75,
            min_score: 10,
            exact_group: 100,
            partial_group: 50,
            suggestion_min: 0.60,
            suggestion_max: 0.95,
            suggestion_limit: 3,
        }
    }
}

/// Boost recipes from a specialised collection when the query mentions
/// one of its terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainAffinity {
    /// Lower-case terms looked for as substrings of the query
    pub terms: Vec<String>,
    /// Provenance label that receives the boost
    pub source: String,
    /// Bonus added when both sides match
    pub bonus: u32,
}

impl Default for DomainAffinity {
    fn default() -> Self {
        Self {
            terms: [
                "biryani", "karahi", "nihari", "haleem", "pulao", "korma", "tikka",
                "kebab", "paratha", "halwa",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            source: "Regional Kitchen".to_string(),
            bonus: 15,
        }
    }
}

impl DomainAffinity {
    /// Bonus for this query/source pair, zero when either side misses.
    pub(crate) fn bonus_for(&self, query_lower: &str, source: &str) -> u32 {
        if source == self.source
            && self.terms.iter().any(|term| query_lower.contains(&term.to_lowercase()))
        {
            self.bonus
        } else {
            0
        }
    }
}
