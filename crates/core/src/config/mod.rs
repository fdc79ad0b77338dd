//! Configuration loading and schema definitions
//!
//! The `[search]` table is the scoring policy of the search engine; the
//! rest configures the tools around it.

mod loader;
mod schema;

pub use loader::{Config, CONFIG_ENV_VAR};
pub use schema::*;
