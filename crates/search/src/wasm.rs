//! WASM bindings for the recipe search engine.
//!
//! Everything crosses the boundary as JSON strings so the browser side can
//! pass records straight from its data layer.

use crate::{RecipeMatcher, Recipe, ScoredRecipe, ScoringConfig};
use wasm_bindgen::prelude::*;

fn parse<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("JSON serialize error: {}", e)))
}

fn matcher(config_json: Option<String>) -> Result<RecipeMatcher, JsValue> {
    match config_json {
        Some(json) => {
            let config: ScoringConfig = parse(&json)?;
            RecipeMatcher::new(config).map_err(|e| JsValue::from_str(&e.to_string()))
        }
        None => Ok(RecipeMatcher::default()),
    }
}

/// Rank recipes against a query.
///
/// # Arguments
/// * `recipes_json` - JSON array of recipes
/// * `query` - Search query
/// * `min_score` - Minimum score to keep
/// * `config_json` - Optional scoring policy overrides
///
/// # Returns
/// JSON array of scored recipes, best first
#[wasm_bindgen]
pub fn search_recipes(
    recipes_json: &str,
    query: &str,
    min_score: u32,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let recipes: Vec<Recipe> = parse(recipes_json)?;
    crate::validate_candidates(&recipes).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let results = matcher(config_json)?.search_with_min_score(&recipes, query, min_score);
    to_json(&results)
}

/// Group scored recipes into exact/partial/ingredient/similar buckets.
#[wasm_bindgen]
pub fn group_results(scored_json: &str) -> Result<String, JsValue> {
    let scored: Vec<ScoredRecipe> = parse(scored_json)?;
    to_json(&crate::group_by_match_quality(&scored))
}

/// "Did you mean" suggestions for a query.
///
/// # Arguments
/// * `query` - Search query
/// * `titles_json` - JSON array of known recipe titles
#[wasm_bindgen]
pub fn suggest_titles(query: &str, titles_json: &str) -> Result<String, JsValue> {
    let titles: Vec<String> = parse(titles_json)?;
    to_json(&crate::get_suggestions(query, &titles))
}

/// Summary statistics for scored recipes.
#[wasm_bindgen]
pub fn search_stats(scored_json: &str) -> Result<String, JsValue> {
    let scored: Vec<ScoredRecipe> = parse(scored_json)?;
    to_json(&crate::get_search_stats(&scored))
}

/// Calculate Levenshtein edit distance between two strings.
#[wasm_bindgen]
pub fn edit_distance(a: &str, b: &str) -> usize {
    crate::levenshtein_distance(a, b)
}

/// Normalized similarity between two strings (0-1).
#[wasm_bindgen]
pub fn similarity(a: &str, b: &str) -> f64 {
    crate::similarity_ratio(a, b)
}
