//! Core library for rostercard.
//!
//! This crate turns a delimited roster source into an ordered, sectioned list
//! of people and answers the two kinds of query the presentation layer asks:
//!
//! - `parser`: quoted comma-delimited line splitting and record construction
//! - `loader`: reading a roster source, with a built-in fallback roster
//! - `categorizer`: grouping records into major/minor sections
//! - `filter`: live text search and position filters over the sectioned list
//! - `session`: the single dispatcher a UI drives with `RosterEvent`s
//!
//! Every query is a synchronous, pure function of the loaded records. Only
//! loading touches the filesystem.

pub mod categorizer;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod parser;
pub mod session;
pub mod utils;

pub use categorizer::{categorize, Section};
pub use error::{ParseWarning, RosterError};
pub use filter::{FilterEngine, Position, RosterEntry, RosterView, ViewMode, ViewRow};
pub use loader::{default_roster, load, load_from_reader, LoadReport, RosterOrigin};
pub use models::Record;
pub use parser::{parse_line, parse_record};
pub use session::{RosterEvent, RosterSession};
