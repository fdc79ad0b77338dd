//! Core plumbing for recipe discovery tools
//!
//! This crate wraps the search engine with what a deployment needs around it:
//!
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration, including the scoring policy
//! - **Validation**: catalog checks that report every problem at once
//! - **Recipe stores**: sources of candidate recipes with coarse filters
//! - **Adapters**: normalization of external aggregator records
//!
//! # Example
//!
//! ```rust
//! use recipe_core::store::{InMemoryRecipeStore, RecipeFilter, RecipeStore};
//! use recipe_search::RecipeMatcher;
//!
//! let store = InMemoryRecipeStore::from_json_str(
//!     r#"[{"id": "1", "title": "Spicy Chicken Curry", "source": "Community"}]"#,
//! ).unwrap();
//!
//! let recipes = store.query(&RecipeFilter::default()).unwrap();
//! let results = RecipeMatcher::default().search(&recipes, "chicken curry");
//! assert_eq!(results[0].recipe.id, "1");
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod config;
pub mod error;
pub mod store;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::adapters::parse_mealdb_response;
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::store::{InMemoryRecipeStore, RecipeFilter, RecipeStore, StoredRecipe};
    pub use crate::validation::{validate_catalog, ValidationResult, Validator};
}
