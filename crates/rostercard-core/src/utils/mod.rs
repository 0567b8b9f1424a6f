//! Utility functions for string matching.

pub mod text;

pub use text::{contains_ignore_case, normalize_query};
