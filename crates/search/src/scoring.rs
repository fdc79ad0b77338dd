//! Relevance scoring of a single recipe against a query.
//!
//! Scoring is additive: every signal that fires adds its weight, so the
//! order signals are evaluated in only matters for the match type. The
//! type follows a precedence (exact > partial > ingredient/tag > fuzzy)
//! and is never downgraded once set.

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::recipe::{MatchType, Recipe, ScoredRecipe};
use crate::similarity::similarity_ratio;
use crate::tokenizer::Tokenizer;
use once_cell::sync::Lazy;

static DEFAULT_MATCHER: Lazy<RecipeMatcher> = Lazy::new(RecipeMatcher::default);

/// Separator between a query keyword and the word it fuzzily matched.
pub const FUZZY_TRACE_SEPARATOR: char = '~';

/// Scores, ranks, groups and suggests recipes under one scoring policy.
#[derive(Debug, Clone)]
pub struct RecipeMatcher {
    pub(crate) config: ScoringConfig,
    pub(crate) tokenizer: Tokenizer,
}

impl Default for RecipeMatcher {
    fn default() -> Self {
        let config = ScoringConfig::default();
        let tokenizer = config.tokenizer();
        Self { config, tokenizer }
    }
}

impl RecipeMatcher {
    /// Create a matcher, rejecting configurations that cannot score.
    pub fn new(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        let tokenizer = config.tokenizer();
        Ok(Self { config, tokenizer })
    }

    /// The active scoring policy.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// The tokenizer derived from the policy.
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Score one recipe against a raw query.
    ///
    /// # Arguments
    /// * `recipe` - The candidate, never modified
    /// * `query` - Free text as typed by the user
    ///
    /// # Returns
    /// A fresh `ScoredRecipe` carrying the score, matched keywords and
    /// resolved match type
    pub fn score(&self, recipe: &Recipe, query: &str) -> ScoredRecipe {
        let weights = &self.config.weights;
        let thresholds = &self.config.thresholds;

        let query_lower = query.to_lowercase();
        let title_lower = recipe.title.to_lowercase();
        let description_lower = recipe.description.to_lowercase();
        let ingredients_lower: Vec<String> =
            recipe.ingredients.iter().map(|i| i.to_lowercase()).collect();
        let tags_lower: Vec<String> = recipe.tags.iter().map(|t| t.to_lowercase()).collect();

        let title_words: Vec<&str> = title_lower.split_whitespace().collect();
        let ingredient_words: Vec<&str> = ingredients_lower
            .iter()
            .flat_map(|i| i.split_whitespace())
            .collect();

        let mut acc = Accumulator::default();

        // The phrase trace keeps the query as typed; every other trace is lower-case.
        if !query.trim().is_empty() && title_lower.contains(&query_lower) {
            acc.add(weights.exact_title);
            acc.record(query);
            acc.promote(MatchType::Exact);
        }

        for keyword in self.tokenizer.unique_keywords(&query_lower) {
            let keyword = keyword.as_str();

            if title_lower.contains(keyword) {
                acc.add(weights.title_keyword);
                acc.record(keyword);
                acc.promote(MatchType::Partial);
            }

            if description_lower.contains(keyword) {
                acc.add(weights.description_keyword);
                acc.record(keyword);
            }

            if ingredients_lower.iter().any(|i| i.contains(keyword)) {
                acc.add(weights.ingredient_keyword);
                acc.record(keyword);
                acc.promote(MatchType::Ingredient);
            }

            if tags_lower.iter().any(|t| t.contains(keyword)) {
                acc.add(weights.tag_keyword);
                acc.record(keyword);
                acc.promote(MatchType::Tag);
            }

            acc.fuzzy_words(
                keyword,
                &title_words,
                thresholds.fuzzy_title,
                weights.fuzzy_title_scale,
            );
            acc.fuzzy_words(
                keyword,
                &ingredient_words,
                thresholds.fuzzy_ingredient,
                weights.fuzzy_ingredient_scale,
            );
        }

        if recipe.source == self.config.community_source {
            acc.add(weights.community_bonus);
        }

        for affinity in &self.config.domain_affinities {
            acc.add(affinity.bonus_for(&query_lower, &recipe.source));
        }

        let distinct = u32::try_from(acc.keywords.len()).unwrap_or(u32::MAX);
        if distinct > 1 {
            acc.add(distinct.saturating_mul(weights.multi_keyword_per_match));
        }

        let scored = acc.finish(recipe);
        tracing::trace!(
            recipe_id = %recipe.id,
            score = scored.match_score,
            match_type = %scored.match_type,
            "Scored recipe"
        );
        scored
    }
}

/// Running state while signals are folded in for one recipe.
#[derive(Debug, Default)]
struct Accumulator {
    score: u32,
    keywords: Vec<String>,
    match_type: MatchType,
}

impl Accumulator {
    fn add(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Insertion-ordered, exact-string de-duplication.
    fn record(&mut self, keyword: &str) {
        if !self.keywords.iter().any(|k| k == keyword) {
            self.keywords.push(keyword.to_string());
        }
    }

    fn promote(&mut self, candidate: MatchType) {
        if candidate.precedence() > self.match_type.precedence() {
            self.match_type = candidate;
        }
    }

    fn fuzzy_words(&mut self, keyword: &str, words: &[&str], threshold: f64, scale: f64) {
        for word in words {
            let similarity = similarity_ratio(keyword, word);
            if similarity > threshold {
                self.add((similarity * scale).floor() as u32);
                self.record(&format!("{}{}{}", keyword, FUZZY_TRACE_SEPARATOR, word));
            }
        }
    }

    fn finish(self, recipe: &Recipe) -> ScoredRecipe {
        ScoredRecipe {
            recipe: recipe.clone(),
            match_score: self.score,
            matched_keywords: self.keywords,
            match_type: self.match_type,
        }
    }
}

pub(crate) fn default_matcher() -> &'static RecipeMatcher {
    &DEFAULT_MATCHER
}

/// Score a recipe with the default policy.
pub fn score_recipe(recipe: &Recipe, query: &str) -> ScoredRecipe {
    default_matcher().score(recipe, query)
}
