//! Ranking, grouping and "did you mean" suggestions.

use crate::error::Result;
use crate::recipe::{validate_candidates, MatchType, Recipe, ScoredRecipe};
use crate::scoring::{default_matcher, RecipeMatcher};
use crate::similarity::similarity_ratio;
use serde::{Deserialize, Serialize};

/// Scored results partitioned by match quality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchGroups {
    /// Score at or above the exact threshold
    pub exact_matches: Vec<ScoredRecipe>,
    /// Score at or above the partial threshold
    pub partial_matches: Vec<ScoredRecipe>,
    /// Lower scores whose strongest signal was an ingredient
    pub ingredient_matches: Vec<ScoredRecipe>,
    /// Everything else
    pub similar_recipes: Vec<ScoredRecipe>,
    /// Whether the input had any entries at all
    pub has_results: bool,
}

impl MatchGroups {
    /// Total entries across all buckets.
    pub fn len(&self) -> usize {
        self.exact_matches.len()
            + self.partial_matches.len()
            + self.ingredient_matches.len()
            + self.similar_recipes.len()
    }

    /// True when every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecipeMatcher {
    /// Rank recipes using the configured minimum score.
    pub fn search(&self, recipes: &[Recipe], query: &str) -> Vec<ScoredRecipe> {
        self.search_with_min_score(recipes, query, self.config.thresholds.min_score)
    }

    /// Rank recipes against a query.
    ///
    /// A blank query returns every recipe unscored and in input order
    /// ("browse all"). Otherwise recipes scoring below `min_score` are
    /// dropped and the rest are sorted by score, highest first; ties keep
    /// their input order.
    pub fn search_with_min_score(
        &self,
        recipes: &[Recipe],
        query: &str,
        min_score: u32,
    ) -> Vec<ScoredRecipe> {
        if query.trim().is_empty() {
            tracing::debug!(candidates = recipes.len(), "Blank query, returning all recipes");
            return recipes.iter().map(ScoredRecipe::unscored).collect();
        }

        let mut results = self.score_all(recipes, query);
        results.retain(|r| r.match_score >= min_score);
        // sort_by is stable
        results.sort_by(|a, b| b.match_score.cmp(&a.match_score));

        tracing::debug!(
            query = %query,
            candidates = recipes.len(),
            results = results.len(),
            min_score,
            "Ranked recipes"
        );

        results
    }

    /// Like [`search`](Self::search), but rejects malformed candidates
    /// before any scoring happens.
    pub fn try_search(&self, recipes: &[Recipe], query: &str) -> Result<Vec<ScoredRecipe>> {
        validate_candidates(recipes)?;
        Ok(self.search(recipes, query))
    }

    fn score_all(&self, recipes: &[Recipe], query: &str) -> Vec<ScoredRecipe> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            recipes
                .par_iter()
                .map(|recipe| self.score(recipe, query))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            recipes
                .iter()
                .map(|recipe| self.score(recipe, query))
                .collect()
        }
    }

    /// Partition scored results into quality buckets.
    ///
    /// Each entry lands in exactly one bucket, checked in order: exact
    /// score, partial score, ingredient type, everything else. Buckets
    /// keep input order.
    pub fn group(&self, scored: &[ScoredRecipe]) -> MatchGroups {
        let thresholds = &self.config.thresholds;
        let mut groups = MatchGroups {
            has_results: !scored.is_empty(),
            ..MatchGroups::default()
        };

        for recipe in scored {
            let bucket = if recipe.match_score >= thresholds.exact_group {
                &mut groups.exact_matches
            } else if recipe.match_score >= thresholds.partial_group {
                &mut groups.partial_matches
            } else if recipe.match_type == MatchType::Ingredient {
                &mut groups.ingredient_matches
            } else {
                &mut groups.similar_recipes
            };
            bucket.push(recipe.clone());
        }

        groups
    }

    /// Titles that look like what the user meant to type.
    ///
    /// Keeps titles whose similarity to the query lies strictly inside the
    /// configured window, most similar first, up to the configured limit.
    pub fn suggestions<S: AsRef<str>>(&self, query: &str, titles: &[S]) -> Vec<String> {
        let thresholds = &self.config.thresholds;
        let query_lower = query.to_lowercase();

        let mut candidates: Vec<(f64, &str)> = titles
            .iter()
            .map(|title| {
                let title = title.as_ref();
                (similarity_ratio(&query_lower, &title.to_lowercase()), title)
            })
            .filter(|(similarity, _)| {
                *similarity > thresholds.suggestion_min && *similarity < thresholds.suggestion_max
            })
            .collect();

        candidates.sort_by(|a, b| b.0.total_cmp(&a.0));

        candidates
            .into_iter()
            .take(thresholds.suggestion_limit)
            .map(|(_, title)| title.to_string())
            .collect()
    }
}

/// Rank recipes with the default policy.
///
/// `min_score` falls back to the default threshold when `None`.
pub fn fuzzy_search_recipes(
    recipes: &[Recipe],
    query: &str,
    min_score: Option<u32>,
) -> Vec<ScoredRecipe> {
    let matcher = default_matcher();
    let min_score = min_score.unwrap_or(matcher.config.thresholds.min_score);
    matcher.search_with_min_score(recipes, query, min_score)
}

/// Group scored results with the default thresholds.
pub fn group_by_match_quality(scored: &[ScoredRecipe]) -> MatchGroups {
    default_matcher().group(scored)
}

/// "Did you mean" suggestions with the default thresholds.
pub fn get_suggestions<S: AsRef<str>>(query: &str, titles: &[S]) -> Vec<String> {
    default_matcher().suggestions(query, titles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use proptest::prelude::*;

    fn catalog() -> Vec<Recipe> {
        vec![
            Recipe::new("1", "Garden Salad").with_ingredients(["lettuce", "cucumber"]),
            Recipe::new("2", "Spicy Chicken Curry")
                .with_ingredients(["chicken breast", "curry powder"])
                .with_source("Community"),
            Recipe::new("3", "Curry with Chicken").with_ingredients(["chicken thighs"]),
            Recipe::new("4", "Weeknight Stir Fry").with_ingredients(["tofu", "broccoli"]),
            Recipe::new("5", "Chicken Soup").with_ingredients(["chicken", "carrots"]),
        ]
    }

    fn scored(id: &str, score: u32, match_type: MatchType) -> ScoredRecipe {
        ScoredRecipe {
            recipe: Recipe::new(id, format!("Recipe {}", id)),
            match_score: score,
            matched_keywords: Vec::new(),
            match_type,
        }
    }

    #[test]
    fn test_blank_query_returns_everything_unscored() {
        let recipes = catalog();
        let results = fuzzy_search_recipes(&recipes, "  ", None);

        assert_eq!(results.len(), recipes.len());
        for (result, recipe) in results.iter().zip(&recipes) {
            assert_eq!(result.recipe.id, recipe.id);
            assert_eq!(result.match_score, 0);
            assert!(result.matched_keywords.is_empty());
            assert_eq!(result.match_type, MatchType::Fuzzy);
        }
    }

    #[test]
    fn test_results_sorted_and_filtered() {
        let results = fuzzy_search_recipes(&catalog(), "chicken curry", None);
        let ids: Vec<&str> = results.iter().map(|r| r.recipe.id.as_str()).collect();

        assert_eq!(ids[0], "2");
        assert!(!ids.contains(&"1"));
        assert!(!ids.contains(&"4"));
        for window in results.windows(2) {
            assert!(window[0].match_score >= window[1].match_score);
        }
    }

    #[test]
    fn test_min_score_override() {
        let recipes = catalog();
        let all = fuzzy_search_recipes(&recipes, "chicken", Some(0));
        let strict = fuzzy_search_recipes(&recipes, "chicken", Some(150));

        assert_eq!(all.len(), recipes.len());
        assert!(strict.iter().all(|r| r.match_score >= 150));
        assert!(strict.len() < all.len());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let recipes = vec![
            Recipe::new("a", "Lentil Stew"),
            Recipe::new("b", "Bean Stew"),
            Recipe::new("c", "Beef Stew"),
        ];
        let results = fuzzy_search_recipes(&recipes, "stew", None);
        let ids: Vec<&str> = results.iter().map(|r| r.recipe.id.as_str()).collect();

        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(fuzzy_search_recipes(&[], "soup", None).is_empty());
    }

    #[test]
    fn test_try_search_rejects_missing_title() {
        let matcher = RecipeMatcher::default();
        let recipes = vec![Recipe::new("1", "Soup"), Recipe::new("2", "")];
        assert!(matcher.try_search(&recipes, "soup").is_err());
    }

    #[test]
    fn test_grouping_priority() {
        let input = vec![
            scored("a", 120, MatchType::Ingredient),
            scored("b", 60, MatchType::Fuzzy),
            scored("c", 45, MatchType::Ingredient),
            scored("d", 30, MatchType::Tag),
            scored("e", 100, MatchType::Partial),
            scored("f", 50, MatchType::Exact),
        ];
        let groups = group_by_match_quality(&input);

        let ids = |bucket: &[ScoredRecipe]| -> Vec<String> {
            bucket.iter().map(|r| r.recipe.id.clone()).collect()
        };
        assert_eq!(ids(&groups.exact_matches), vec!["a", "e"]);
        assert_eq!(ids(&groups.partial_matches), vec!["b", "f"]);
        assert_eq!(ids(&groups.ingredient_matches), vec!["c"]);
        assert_eq!(ids(&groups.similar_recipes), vec!["d"]);
        assert!(groups.has_results);
        assert_eq!(groups.len(), input.len());
    }

    #[test]
    fn test_grouping_empty() {
        let groups = group_by_match_quality(&[]);
        assert!(!groups.has_results);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_suggestions_ranked_and_limited() {
        let titles = [
            "Lasagna",
            "Lasagne",
            "Lasagnas",
            "Lasgana",
            "Pad Thai",
            "lasagna",
        ];
        let suggestions = get_suggestions("lasagnaa", &titles);

        assert_eq!(suggestions.len(), 3);
        assert!(!suggestions.contains(&"Pad Thai".to_string()));
    }

    #[test]
    fn test_suggestions_most_similar_first() {
        // 0.625, 0.875, 0.75, 0.875 against "tiramisu"
        let titles = ["Tirumasa", "Tiramisi", "Tiramasa", "Tiramisa"];

        assert_eq!(
            get_suggestions("tiramisu", &titles),
            vec!["Tiramisi", "Tiramisa", "Tiramasa"]
        );

        let mut config = ScoringConfig::default();
        config.thresholds.suggestion_limit = 5;
        let matcher = RecipeMatcher::new(config).unwrap();
        assert_eq!(
            matcher.suggestions("tiramisu", &titles),
            vec!["Tiramisi", "Tiramisa", "Tiramasa", "Tirumasa"]
        );
    }

    #[test]
    fn test_suggestions_compare_untrimmed_query() {
        // "tiramisu " is 9 characters: 1 - 1/9 against "Tiramisu"
        assert_eq!(get_suggestions("tiramisu ", &["Tiramisu"]), vec!["Tiramisu"]);
    }

    #[test]
    fn test_suggestions_exclusive_bounds() {
        // 19 of 20 characters equal: exactly 0.95, too close to suggest
        // 3 of 5 characters equal: exactly 0.60, too far to suggest
        let titles = ["abcdefghijklmnopqrsx", "abcxy", "abcdx"];
        let suggestions = get_suggestions("abcdefghijklmnopqrst", &titles);
        assert!(suggestions.is_empty());

        let suggestions = get_suggestions("abcde", &titles);
        assert_eq!(suggestions, vec!["abcdx"]);
    }

    #[test]
    fn test_suggestions_skip_identical_title() {
        let suggestions = get_suggestions("Tiramisu", &["tiramisu", "Tiramisù"]);
        assert_eq!(suggestions, vec!["Tiramisù"]);
    }

    fn arb_recipe() -> impl Strategy<Value = Recipe> {
        (
            "[a-z]{1,6}",
            proptest::collection::vec("[a-z]{3,8}", 1..4),
            proptest::collection::vec("[a-z]{3,8}", 0..3),
            prop_oneof![Just("Community"), Just("TheMealDB"), Just("")],
        )
            .prop_map(|(id, title_words, ingredients, source)| {
                Recipe::new(id, title_words.join(" "))
                    .with_ingredients(ingredients)
                    .with_source(source)
            })
    }

    proptest! {
        #[test]
        fn prop_search_is_deterministic(
            recipes in proptest::collection::vec(arb_recipe(), 0..12),
            query in "[a-z ]{0,16}",
        ) {
            let first = fuzzy_search_recipes(&recipes, &query, None);
            let second = fuzzy_search_recipes(&recipes, &query, None);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_results_meet_min_score(
            recipes in proptest::collection::vec(arb_recipe(), 0..12),
            query in "[a-z]{3,8}( [a-z]{3,8})?",
            min_score in 0u32..200,
        ) {
            let results = fuzzy_search_recipes(&recipes, &query, Some(min_score));
            prop_assert!(results.iter().all(|r| r.match_score >= min_score));

            let kept = recipes
                .iter()
                .filter(|r| crate::score_recipe(r, &query).match_score >= min_score)
                .count();
            prop_assert_eq!(results.len(), kept);
        }

        #[test]
        fn prop_exact_match_dominates(recipe in arb_recipe()) {
            let query = recipe.title.clone();
            let scored = crate::score_recipe(&recipe, &query);
            prop_assert_eq!(scored.match_type, MatchType::Exact);
            prop_assert!(scored.match_score >= 100);
        }

        #[test]
        fn prop_grouping_is_a_partition(
            recipes in proptest::collection::vec(arb_recipe(), 0..12),
            query in "[a-z]{3,8}",
        ) {
            let results = fuzzy_search_recipes(&recipes, &query, Some(0));
            let groups = group_by_match_quality(&results);
            prop_assert_eq!(groups.len(), results.len());
            prop_assert_eq!(groups.has_results, !results.is_empty());
        }
    }
}
