//! Grouping of records into major sections and subsections.
//!
//! Records are grouped by their exact category string in first-seen order.
//! A major header is emitted whenever a group's major section differs from
//! the group immediately before it, so a major section that reappears after a
//! different one gets a second header. Subsection headers are emitted once per
//! group.

use serde::Serialize;
use tracing::debug;

use crate::models::{split_category, Record};

/// One category group, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub category: String,
    pub major: String,
    pub minor: Option<String>,
    /// This group opens a new run of its major section
    pub starts_major: bool,
    pub records: Vec<Record>,
}

impl Section {
    /// Header text for the major section, as displayed.
    pub fn major_title(&self) -> String {
        self.major.to_uppercase()
    }
}

/// Group records by category, preserving first-seen order of categories and
/// the original order of records within each category.
pub fn categorize(records: &[Record]) -> Vec<Section> {
    let mut groups: Vec<(String, Vec<Record>)> = Vec::new();

    for record in records {
        match groups.iter_mut().find(|(category, _)| *category == record.category) {
            Some((_, members)) => members.push(record.clone()),
            None => groups.push((record.category.clone(), vec![record.clone()])),
        }
    }

    let mut sections = Vec::with_capacity(groups.len());
    let mut last_major: Option<String> = None;

    for (category, members) in groups {
        let (major, minor) = split_category(&category);
        let starts_major = last_major.as_deref() != Some(major);
        let major = major.to_string();
        let minor = minor.map(str::to_string);
        last_major = Some(major.clone());

        sections.push(Section {
            category,
            major,
            minor,
            starts_major,
            records: members,
        });
    }

    debug!(records = records.len(), sections = sections.len(), "Categorized roster");
    sections
}
