//! Terminal output helpers for recipe discovery tools
//!
//! - Status messages
//! - Rendering of scored recipes, groups and statistics

#![warn(missing_docs)]

pub mod output;
