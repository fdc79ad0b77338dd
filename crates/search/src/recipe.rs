//! Recipe records and their scored projections.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A recipe as seen by the ranking pipeline.
///
/// Records are normalized before they get here: ingredients are plain
/// strings regardless of how the producer stored them. The pipeline only
/// ever reads a `Recipe`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique within a candidate set
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Primary signal source
    pub title: String,
    /// Secondary signal source
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Ingredient lines in recipe order
    #[serde(default, deserialize_with = "ingredient_lines")]
    pub ingredients: Vec<String>,
    /// Free-form labels
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Cuisine label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    /// Difficulty label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<String>,
    /// Provenance label, only used for score bonuses
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
}

impl Recipe {
    /// Create a recipe with just an id and a title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            ingredients: Vec::new(),
            tags: Vec::new(),
            cuisine: None,
            difficulty_level: None,
            source: String::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the ingredient lines
    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    /// Set the tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the cuisine label
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Set the difficulty label
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty_level = Some(difficulty.into());
        self
    }

    /// Set the provenance label
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Fail fast on records that break the input contract.
    pub fn check(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(SearchError::invalid_recipe(&self.id, "id is required"));
        }
        if self.title.trim().is_empty() {
            return Err(SearchError::invalid_recipe(&self.id, "title is required"));
        }
        Ok(())
    }
}

/// Check every candidate and reject duplicate ids.
pub fn validate_candidates(recipes: &[Recipe]) -> Result<()> {
    let mut seen = HashSet::with_capacity(recipes.len());
    for recipe in recipes {
        recipe.check()?;
        if !seen.insert(recipe.id.as_str()) {
            return Err(SearchError::DuplicateId(recipe.id.clone()));
        }
    }
    Ok(())
}

/// Coarse classification of why a recipe matched.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Whole query found in the title
    Exact,
    /// A keyword found in the title
    Partial,
    /// A keyword found in an ingredient
    Ingredient,
    /// A keyword found in a tag
    Tag,
    /// Nothing stronger fired
    #[default]
    Fuzzy,
}

impl MatchType {
    /// Precedence when several signals fire. Ingredient and tag share a
    /// level, so whichever comes first sticks.
    pub(crate) fn precedence(self) -> u8 {
        match self {
            MatchType::Exact => 3,
            MatchType::Partial => 2,
            MatchType::Ingredient | MatchType::Tag => 1,
            MatchType::Fuzzy => 0,
        }
    }

    /// Lower-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Partial => "partial",
            MatchType::Ingredient => "ingredient",
            MatchType::Tag => "tag",
            MatchType::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recipe with the outcome of scoring it against one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecipe {
    /// The recipe that was scored
    #[serde(flatten)]
    pub recipe: Recipe,
    /// Additive score, higher is better
    pub match_score: u32,
    /// Matched keywords and `keyword~word` fuzzy traces, de-duplicated
    pub matched_keywords: Vec<String>,
    /// Strongest signal that fired
    pub match_type: MatchType,
}

impl ScoredRecipe {
    /// A zero-score entry, used when there is nothing to rank against.
    pub fn unscored(recipe: &Recipe) -> Self {
        Self {
            recipe: recipe.clone(),
            match_score: 0,
            matched_keywords: Vec::new(),
            match_type: MatchType::Fuzzy,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Signed(n) => n.to_string(),
        Id::Unsigned(n) => n.to_string(),
    })
}

/// Accepts `["2 eggs", ...]` as well as `[{"item": "2 eggs", "order": 1}, ...]`.
fn ingredient_lines<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Line(String),
        Ordered {
            item: String,
            #[serde(default)]
            order: Option<i64>,
        },
    }

    let entries: Option<Vec<Entry>> = Option::deserialize(deserializer)?;
    let mut keyed: Vec<(i64, String)> = entries
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(position, entry)| match entry {
            Entry::Line(line) => (position as i64, line),
            Entry::Ordered { item, order } => (order.unwrap_or(position as i64), item),
        })
        .collect();

    // stable: equal orders keep their listed position
    keyed.sort_by_key(|(order, _)| *order);
    Ok(keyed.into_iter().map(|(_, item)| item).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_plain_ingredients() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"id": "r1", "title": "Pancakes", "ingredients": ["flour", "milk"], "source": "Community"}"#,
        )
        .unwrap();
        assert_eq!(recipe.ingredients, vec!["flour", "milk"]);
        assert!(recipe.tags.is_empty());
        assert_eq!(recipe.description, "");
    }

    #[test]
    fn test_deserialize_ordered_ingredients() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"id": 7, "title": "Omelette", "description": null, "tags": null,
                "ingredients": [{"item": "salt", "order": 3}, {"item": "eggs", "order": 1}, {"item": "butter", "order": 2}],
                "difficultyLevel": "easy"}"#,
        )
        .unwrap();
        assert_eq!(recipe.id, "7");
        assert_eq!(recipe.ingredients, vec!["eggs", "butter", "salt"]);
        assert_eq!(recipe.difficulty_level.as_deref(), Some("easy"));
    }

    #[test]
    fn test_check_rejects_missing_title() {
        let recipe = Recipe::new("r1", "   ");
        assert!(matches!(recipe.check(), Err(SearchError::InvalidRecipe { .. })));
    }

    #[test]
    fn test_validate_candidates_duplicate_id() {
        let recipes = vec![Recipe::new("r1", "Soup"), Recipe::new("r1", "Stew")];
        assert!(matches!(
            validate_candidates(&recipes),
            Err(SearchError::DuplicateId(id)) if id == "r1"
        ));
    }

    #[test]
    fn test_match_type_serialization() {
        assert_eq!(serde_json::to_string(&MatchType::Ingredient).unwrap(), "\"ingredient\"");
        assert_eq!(MatchType::default(), MatchType::Fuzzy);
        assert_eq!(MatchType::Tag.to_string(), "tag");
    }

    #[test]
    fn test_scored_recipe_flattens() {
        let scored = ScoredRecipe::unscored(&Recipe::new("r1", "Soup"));
        let json = serde_json::to_value(&scored).unwrap();
        assert_eq!(json["title"], "Soup");
        assert_eq!(json["matchScore"], 0);
        assert_eq!(json["matchType"], "fuzzy");

        let back: ScoredRecipe = serde_json::from_value(json).unwrap();
        assert_eq!(back, scored);
    }
}
