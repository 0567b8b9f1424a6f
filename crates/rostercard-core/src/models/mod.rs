//! Data models for roster entries.
//!
//! - `Record`: one parsed roster row (category, name, details)
//! - `split_category`: major/minor section split of a category string

pub mod record;

pub use record::{split_category, Record};
