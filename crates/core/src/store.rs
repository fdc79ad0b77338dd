//! Recipe sources
//!
//! The ranking engine never fetches recipes itself; it is handed a
//! candidate list. A [`RecipeStore`] is whatever produces that list after
//! the coarse filters (visibility, cuisine, difficulty) have been applied.

use crate::error::{Error, Result, ResultExt};
use recipe_search::Recipe;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Coarse filters applied before ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeFilter {
    /// Only approved, public recipes
    pub approved_only: bool,
    /// Cuisine label, compared case-insensitively
    pub cuisine: Option<String>,
    /// Difficulty label, compared case-insensitively
    pub difficulty_level: Option<String>,
}

impl Default for RecipeFilter {
    fn default() -> Self {
        Self {
            approved_only: true,
            cuisine: None,
            difficulty_level: None,
        }
    }
}

impl RecipeFilter {
    /// Include unapproved and private recipes
    pub fn include_unapproved(mut self) -> Self {
        self.approved_only = false;
        self
    }

    /// Restrict to a cuisine
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Restrict to a difficulty level
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty_level = Some(difficulty.into());
        self
    }

    /// Check a stored record against the filter
    pub fn matches(&self, record: &StoredRecipe) -> bool {
        if self.approved_only && !(record.approved && record.is_public) {
            return false;
        }
        label_matches(self.cuisine.as_deref(), record.recipe.cuisine.as_deref())
            && label_matches(
                self.difficulty_level.as_deref(),
                record.recipe.difficulty_level.as_deref(),
            )
    }
}

fn label_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match (wanted, actual) {
        (None, _) => true,
        (Some(wanted), Some(actual)) => wanted.to_lowercase() == actual.trim().to_lowercase(),
        (Some(_), None) => false,
    }
}

/// A recipe plus the visibility flags the store filters on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    #[serde(default = "default_true")]
    pub approved: bool,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

fn default_true() -> bool {
    true
}

impl From<Recipe> for StoredRecipe {
    fn from(recipe: Recipe) -> Self {
        Self {
            recipe,
            approved: true,
            is_public: true,
        }
    }
}

/// Supplies candidate recipes to the ranking engine
pub trait RecipeStore {
    /// Recipes passing the filter, in store order
    fn query(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>>;

    /// Titles of every visible recipe, for suggestions
    fn titles(&self) -> Result<Vec<String>> {
        Ok(self
            .query(&RecipeFilter::default())?
            .into_iter()
            .map(|r| r.title)
            .collect())
    }
}

/// Store backed by a vector, typically loaded from a JSON export
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecipeStore {
    records: Vec<StoredRecipe>,
    ids: HashSet<String>,
}

impl InMemoryRecipeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store, rejecting invalid or duplicate records
    pub fn from_records(records: impl IntoIterator<Item = StoredRecipe>) -> Result<Self> {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Parse a JSON array of recipe records
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<StoredRecipe> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Load a JSON array of recipe records from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }

        let content = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&content)
            .context(format!("While loading catalog {}", path.display()))?;

        tracing::info!(path = %path.display(), recipes = store.len(), "Recipe catalog loaded");
        Ok(store)
    }

    /// Add one record
    pub fn insert(&mut self, record: StoredRecipe) -> Result<()> {
        record.recipe.check().map_err(Error::from)?;

        if !self.ids.insert(record.recipe.id.clone()) {
            return Err(Error::duplicate_record(&record.recipe.id));
        }

        self.records.push(record);
        Ok(())
    }

    /// Add already-normalized recipes as approved and public
    pub fn extend_recipes(&mut self, recipes: impl IntoIterator<Item = Recipe>) -> Result<()> {
        for recipe in recipes {
            self.insert(recipe.into())?;
        }
        Ok(())
    }

    /// Every record, visible or not
    pub fn records(&self) -> &[StoredRecipe] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the store holds nothing
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecipeStore for InMemoryRecipeStore {
    fn query(&self, filter: &RecipeFilter) -> Result<Vec<Recipe>> {
        Ok(self
            .records
            .iter()
            .filter(|record| filter.matches(record))
            .map(|record| record.recipe.clone())
            .collect())
    }
}

impl std::fmt::Display for RecipeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "approved_only={} cuisine={} difficulty={}",
            self.approved_only,
            self.cuisine.as_deref().unwrap_or("*"),
            self.difficulty_level.as_deref().unwrap_or("*")
        )
    }
}

/// Fail with a catalog error when a store has nothing to rank
pub fn ensure_not_empty(recipes: &[Recipe], filter: &RecipeFilter) -> Result<()> {
    if recipes.is_empty() {
        return Err(Error::catalog(format!("No recipes match the filter ({})", filter))
            .with_suggestion("Relax --cuisine/--difficulty or pass --all to include unapproved recipes"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Write;

    const CATALOG: &str = r#"[
        {"id": 1, "title": "Chicken Karahi", "cuisine": "Pakistani", "difficultyLevel": "Medium",
         "ingredients": ["chicken", "tomatoes"], "source": "Regional Kitchen"},
        {"id": 2, "title": "Pancakes", "cuisine": "American", "difficultyLevel": "Easy",
         "ingredients": [{"item": "flour", "order": 1}, {"item": "milk", "order": 2}],
         "source": "Community", "approved": false},
        {"id": 3, "title": "Beef Nihari", "cuisine": "pakistani", "difficultyLevel": "Hard",
         "source": "Regional Kitchen", "isPublic": false}
    ]"#;

    #[test]
    fn test_default_filter_hides_unapproved_and_private() {
        let store = InMemoryRecipeStore::from_json_str(CATALOG).unwrap();
        let recipes = store.query(&RecipeFilter::default()).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Chicken Karahi");
    }

    #[test]
    fn test_cuisine_filter_case_insensitive() {
        let store = InMemoryRecipeStore::from_json_str(CATALOG).unwrap();
        let filter = RecipeFilter::default().include_unapproved().with_cuisine("PAKISTANI");
        let ids: Vec<String> = store.query(&filter).unwrap().into_iter().map(|r| r.id).collect();

        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_cuisine_filter_folds_non_ascii_case() {
        let store = InMemoryRecipeStore::from_json_str(
            r#"[{"id": "1", "title": "Coq au Vin", "cuisine": "Française"}]"#,
        )
        .unwrap();
        let filter = RecipeFilter::default().with_cuisine("FRANÇAISE");

        assert_eq!(store.query(&filter).unwrap().len(), 1);
    }

    #[test]
    fn test_difficulty_filter() {
        let store = InMemoryRecipeStore::from_json_str(CATALOG).unwrap();
        let filter = RecipeFilter::default().include_unapproved().with_difficulty("easy");
        let recipes = store.query(&filter).unwrap();

        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].ingredients, vec!["flour", "milk"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = InMemoryRecipeStore::from_json_str(
            r#"[{"id": "a", "title": "Soup"}, {"id": "a", "title": "Stew"}]"#,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateRecord);
    }

    #[test]
    fn test_missing_title_rejected() {
        let err = InMemoryRecipeStore::from_json_str(r#"[{"id": "a", "title": " "}]"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_titles_only_visible() {
        let store = InMemoryRecipeStore::from_json_str(CATALOG).unwrap();
        assert_eq!(store.titles().unwrap(), vec!["Chicken Karahi"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let store = InMemoryRecipeStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = InMemoryRecipeStore::load("/nonexistent/recipes.json").unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }

    #[test]
    fn test_ensure_not_empty() {
        let filter = RecipeFilter::default().with_cuisine("Martian");
        let err = ensure_not_empty(&[], &filter).unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogError);
        assert!(err.message.contains("Martian"));
    }
}
