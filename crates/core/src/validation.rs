//! Recipe catalog validation
//!
//! Collects every problem in a catalog instead of stopping at the first,
//! so a `validate` run can report them all at once. Errors make a catalog
//! unusable for ranking; warnings only flag records that will rank poorly.
//!
//! # Example
//!
//! ```rust
//! use recipe_core::validation::validate_catalog;
//! use recipe_search::Recipe;
//!
//! let recipes = vec![Recipe::new("1", "Pancakes"), Recipe::new("1", "")];
//! let result = validate_catalog(&recipes);
//! assert!(!result.is_valid());
//! ```

use crate::error::{Error, Result};
use recipe_search::Recipe;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Longest title accepted
pub const MAX_TITLE_LENGTH: usize = 200;

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get all warnings
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ValidationError) {
        self.warnings.push(warning);
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Convert to Result type
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
            Err(Error::validation(format!("Validation failed: {}", messages.join("; "))))
        }
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Validate that a field is not empty
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Field is required".to_string(),
                code: "REQUIRED".to_string(),
                expected: Some("non-empty value".to_string()),
                actual: Some("empty".to_string()),
            });
        }
        self
    }

    /// Validate maximum length in characters
    pub fn max_length(mut self, field: &str, value: &str, max: usize) -> Self {
        let len = value.chars().count();
        if len > max {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be at most {} characters", max),
                code: "MAX_LENGTH".to_string(),
                expected: Some(format!("<= {} chars", max)),
                actual: Some(format!("{} chars", len)),
            });
        }
        self
    }

    /// Add a warning (non-blocking)
    pub fn warn_if(mut self, field: &str, condition: bool, message: &str) -> Self {
        if condition {
            self.result.add_warning(ValidationError {
                field: field.to_string(),
                message: message.to_string(),
                code: "WARNING".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

/// Validate a single recipe record
pub fn validate_recipe(recipe: &Recipe) -> ValidationResult {
    let label = |field: &str| format!("recipe[{}].{}", recipe.id, field);

    Validator::new()
        .required(&label("id"), &recipe.id)
        .required(&label("title"), &recipe.title)
        .max_length(&label("title"), &recipe.title, MAX_TITLE_LENGTH)
        .warn_if(
            &label("ingredients"),
            recipe.ingredients.is_empty(),
            "No ingredients; only title and description can match",
        )
        .warn_if(
            &label("ingredients"),
            recipe.ingredients.iter().any(|i| i.trim().is_empty()),
            "Contains blank ingredient lines",
        )
        .warn_if(
            &label("source"),
            recipe.source.trim().is_empty(),
            "No provenance label; source bonuses never apply",
        )
        .validate()
}

/// Validate a whole catalog, including id uniqueness
pub fn validate_catalog(recipes: &[Recipe]) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen = HashSet::with_capacity(recipes.len());

    for recipe in recipes {
        result.merge(validate_recipe(recipe));

        if !recipe.id.is_empty() && !seen.insert(recipe.id.as_str()) {
            result.add_error(ValidationError {
                field: format!("recipe[{}].id", recipe.id),
                message: "Duplicate recipe id".to_string(),
                code: "DUPLICATE".to_string(),
                expected: Some("unique id".to_string()),
                actual: Some(recipe.id.clone()),
            });
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_validation() {
        let result = Validator::new().required("title", "  ").validate();
        assert!(!result.is_valid());
        assert_eq!(result.errors()[0].code, "REQUIRED");
    }

    #[test]
    fn test_max_length_counts_chars() {
        let result = Validator::new().max_length("title", "crème", 5).validate();
        assert!(result.is_valid());

        let result = Validator::new().max_length("title", "crème brûlée", 5).validate();
        assert_eq!(result.errors()[0].code, "MAX_LENGTH");
    }

    #[test]
    fn test_valid_recipe_with_warnings() {
        let recipe = Recipe::new("r1", "Plain Rice");
        let result = validate_recipe(&recipe);

        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 2);
    }

    #[test]
    fn test_catalog_duplicates_and_missing_title() {
        let recipes = vec![
            Recipe::new("r1", "Pancakes")
                .with_ingredients(["flour"])
                .with_source("Community"),
            Recipe::new("r1", "Waffles"),
            Recipe::new("r2", ""),
        ];
        let result = validate_catalog(&recipes);

        assert!(!result.is_valid());
        let codes: Vec<&str> = result.errors().iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["DUPLICATE", "REQUIRED"]);
        assert!(result.to_result().is_err());
    }

    #[test]
    fn test_clean_catalog() {
        let recipes = vec![Recipe::new("r1", "Pancakes")
            .with_ingredients(["flour", "milk"])
            .with_source("Community")];
        let result = validate_catalog(&recipes);

        assert!(result.is_valid());
        assert!(result.warnings().is_empty());
        assert!(result.to_result().is_ok());
    }
}
