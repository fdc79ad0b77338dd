//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A recipe record violates the input contract
    #[error("Invalid recipe {id:?}: {reason}")]
    InvalidRecipe {
        /// Identifier of the offending record (may be empty)
        id: String,
        /// What is wrong with it
        reason: String,
    },

    /// Two candidates share the same identifier
    #[error("Duplicate recipe id: {0}")]
    DuplicateId(String),

    /// Scoring configuration is out of range
    #[error("Invalid scoring configuration: {0}")]
    InvalidConfig(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Error code for integration with recipe-core error handling.
/// Range: 11xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Invalid recipe record
    InvalidRecipe = 11001,
    /// Duplicate recipe id
    DuplicateId = 11002,
    /// Invalid scoring configuration
    InvalidConfig = 11003,
    /// JSON parsing error
    JsonParsing = 11004,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::InvalidRecipe { .. } => SearchErrorCode::InvalidRecipe,
            SearchError::DuplicateId(_) => SearchErrorCode::DuplicateId,
            SearchError::InvalidConfig(_) => SearchErrorCode::InvalidConfig,
            SearchError::JsonError(_) => SearchErrorCode::JsonParsing,
        }
    }

    pub(crate) fn invalid_recipe(id: &str, reason: impl Into<String>) -> Self {
        SearchError::InvalidRecipe {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
