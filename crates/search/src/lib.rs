//! Recipe relevance engine for recipe discovery.
//!
//! This crate provides:
//! - Query keyword extraction with stop-word filtering
//! - Levenshtein edit distance and normalized similarity
//! - Multi-signal recipe scoring with explainable matched keywords
//! - Ranking, match-quality grouping, suggestions and search statistics
//!
//! # Example
//!
//! ```
//! use recipe_search::{fuzzy_search_recipes, MatchType, Recipe};
//!
//! let recipes = vec![
//!     Recipe::new("1", "Tiramisu").with_ingredients(["mascarpone", "espresso"]),
//!     Recipe::new("2", "Garden Salad").with_ingredients(["lettuce"]),
//! ];
//!
//! let results = fuzzy_search_recipes(&recipes, "tiramisou", None);
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].match_type, MatchType::Fuzzy);
//! assert_eq!(results[0].matched_keywords, vec!["tiramisou~tiramisu"]);
//! ```

mod config;
mod error;
mod ranking;
mod recipe;
mod scoring;
mod similarity;
mod stats;
mod tokenizer;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{DomainAffinity, ScoringConfig, ScoringThresholds, ScoringWeights};
pub use error::{Result, SearchError, SearchErrorCode};
pub use ranking::{fuzzy_search_recipes, get_suggestions, group_by_match_quality, MatchGroups};
pub use recipe::{validate_candidates, MatchType, Recipe, ScoredRecipe};
pub use scoring::{score_recipe, RecipeMatcher, FUZZY_TRACE_SEPARATOR};
pub use similarity::{levenshtein_distance, similarity_ratio};
pub use stats::{get_search_stats, SearchStats};
pub use tokenizer::{extract_keywords, Tokenizer, DEFAULT_STOP_WORDS};
