//! Normalizers for external recipe aggregators
//!
//! Foreign records arrive with their own field names, numbered
//! ingredient/measure columns and HTML-laden instructions. They are
//! flattened into the common [`Recipe`] shape here so the ranking engine
//! never sees a foreign format.

use crate::error::{Error, ErrorCode, Result};
use once_cell::sync::Lazy;
use recipe_search::Recipe;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

/// Provenance label given to TheMealDB records
pub const MEALDB_SOURCE: &str = "TheMealDB";

/// Number of ingredient/measure column pairs in a TheMealDB record
const MEALDB_INGREDIENT_SLOTS: usize = 20;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// One meal as returned by TheMealDB lookup/search endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct MealDbMeal {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal", default)]
    pub name: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strTags", default)]
    pub tags: Option<String>,
    /// Numbered `strIngredientN` / `strMeasureN` columns and anything else
    #[serde(flatten)]
    pub columns: HashMap<String, serde_json::Value>,
}

/// Envelope around TheMealDB results; `meals` is null when nothing matched
#[derive(Debug, Clone, Deserialize)]
pub struct MealDbResponse {
    #[serde(default)]
    pub meals: Option<Vec<MealDbMeal>>,
}

impl MealDbMeal {
    fn column(&self, name: &str) -> Option<&str> {
        self.columns
            .get(name)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// `"<measure> <ingredient>"` lines for every filled slot
    pub fn ingredient_lines(&self) -> Vec<String> {
        (1..=MEALDB_INGREDIENT_SLOTS)
            .filter_map(|n| {
                let ingredient = self.column(&format!("strIngredient{}", n))?;
                Some(match self.column(&format!("strMeasure{}", n)) {
                    Some(measure) => format!("{} {}", measure, ingredient),
                    None => ingredient.to_string(),
                })
            })
            .collect()
    }

    /// Convert into the common recipe shape
    pub fn into_recipe(self) -> Result<Recipe> {
        let ingredients = self.ingredient_lines();
        let title = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                Error::new(
                    ErrorCode::AdapterError,
                    format!("TheMealDB record {} has no strMeal", self.id),
                )
            })?
            .to_string();

        let mut tags: Vec<String> = self
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
        if let Some(category) = self.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            if !tags.iter().any(|t| t.eq_ignore_ascii_case(category)) {
                tags.push(category.to_string());
            }
        }

        let mut recipe = Recipe::new(format!("mealdb-{}", self.id.trim()), title)
            .with_description(strip_html(self.instructions.as_deref().unwrap_or_default()))
            .with_ingredients(ingredients)
            .with_tags(tags)
            .with_source(MEALDB_SOURCE);
        recipe.cuisine = self
            .area
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty() && !a.eq_ignore_ascii_case("unknown"))
            .map(String::from);

        recipe.check()?;
        Ok(recipe)
    }
}

/// Remove markup and collapse whitespace
pub fn strip_html(text: &str) -> String {
    let without_tags = HTML_TAG.replace_all(text, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

/// Parse a TheMealDB response body into recipes
pub fn parse_mealdb_response(json: &str) -> Result<Vec<Recipe>> {
    let response: MealDbResponse = serde_json::from_str(json).map_err(|e| {
        Error::new(ErrorCode::AdapterError, format!("Invalid TheMealDB payload: {}", e))
            .with_source(e)
    })?;

    let recipes = response
        .meals
        .unwrap_or_default()
        .into_iter()
        .map(MealDbMeal::into_recipe)
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(recipes = recipes.len(), source = MEALDB_SOURCE, "Normalized external recipes");
    Ok(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{"meals": [{
        "idMeal": "52772",
        "strMeal": "Teriyaki Chicken Casserole",
        "strCategory": "Chicken",
        "strArea": "Japanese",
        "strTags": "Meat,Casserole",
        "strInstructions": "<p>Preheat oven to 350&deg;F.</p>\r\n<b>Combine</b> soy sauce &amp; water.",
        "strIngredient1": "soy sauce",
        "strMeasure1": "3/4 cup",
        "strIngredient2": "water",
        "strMeasure2": " ",
        "strIngredient3": "",
        "strMeasure3": "",
        "strIngredient4": null,
        "strMeasure4": null
    }]}"#;

    #[test]
    fn test_normalize_meal() {
        let recipes = parse_mealdb_response(RESPONSE).unwrap();
        assert_eq!(recipes.len(), 1);

        let recipe = &recipes[0];
        assert_eq!(recipe.id, "mealdb-52772");
        assert_eq!(recipe.title, "Teriyaki Chicken Casserole");
        assert_eq!(recipe.ingredients, vec!["3/4 cup soy sauce", "water"]);
        assert_eq!(recipe.tags, vec!["Meat", "Casserole", "Chicken"]);
        assert_eq!(recipe.cuisine.as_deref(), Some("Japanese"));
        assert_eq!(recipe.source, MEALDB_SOURCE);
        assert_eq!(
            recipe.description,
            "Preheat oven to 350&deg;F. Combine soy sauce & water."
        );
    }

    #[test]
    fn test_null_meals_is_empty() {
        assert!(parse_mealdb_response(r#"{"meals": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_missing_name_rejected() {
        let err = parse_mealdb_response(r#"{"meals": [{"idMeal": "1", "strMeal": " "}]}"#)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AdapterError);
    }

    #[test]
    fn test_malformed_payload() {
        let err = parse_mealdb_response(r#"{"meals": "oops"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::AdapterError);
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<div>Mix&nbsp;well</div>\n\n<br/>Serve"), "Mix well Serve");
    }
}
