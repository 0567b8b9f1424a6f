use serde::{Deserialize, Serialize};

/// Separator between a major section and its subsection in a category.
const CATEGORY_SEPARATOR: &str = " - ";

/// One roster row. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// "Major - Minor" or a bare section name
    pub category: String,
    /// "Display Name – Subtitle", "Display Name - Subtitle" or a bare name
    pub name: String,
    /// Free text, already newline-decoded
    pub details: String,
}

impl Record {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            details: details.into(),
        }
    }

    /// Split the name into (display name, subtitle).
    ///
    /// An en dash (U+2013) wins over a plain hyphen; only the first occurrence
    /// splits, so "Jean-Luc – OC" yields ("Jean-Luc", "OC").
    pub fn name_parts(&self) -> (&str, &str) {
        let split = self
            .name
            .split_once('\u{2013}')
            .or_else(|| self.name.split_once('-'));

        match split {
            Some((display, subtitle)) => (display.trim(), subtitle.trim()),
            None => (self.name.as_str(), ""),
        }
    }

    /// Presentation flag: the category mentions "player".
    pub fn is_player(&self) -> bool {
        self.category.to_lowercase().contains("player")
    }

    /// Text matched by both search channels: display name, subtitle, details.
    /// Case is left untouched; matching lower-cases per query.
    pub fn search_text(&self) -> String {
        let (display, subtitle) = self.name_parts();
        format!("{} {} {}", display, subtitle, self.details)
    }
}

/// Split a category into (major section, optional subsection) on the first
/// literal `" - "`.
pub fn split_category(category: &str) -> (&str, Option<&str>) {
    match category.split_once(CATEGORY_SEPARATOR) {
        Some((major, minor)) => (major, Some(minor)),
        None => (category, None),
    }
}
