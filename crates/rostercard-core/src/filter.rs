//! Live text search and position filtering over the sectioned roster.
//!
//! The engine holds the flattened entries in categorized order together with
//! the header layout of that order. Both query channels are pure functions of
//! that state and return a fresh `RosterView`:
//!
//! - text search keeps the order and only toggles visibility
//! - a position filter keeps everything visible and moves matching entries to
//!   the top under a synthetic header, followed by an "Other Positions"
//!   separator and the rest

use serde::Serialize;
use tracing::debug;

use crate::categorizer::Section;
use crate::models::Record;
use crate::utils::{contains_ignore_case, normalize_query};

/// Separator text shown between matching and non-matching entries.
pub const OTHER_POSITIONS_LABEL: &str = "Other Positions";

// ============================================================================
// Positions
// ============================================================================

/// Position filter choices, in picker order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Position {
    All,
    Quarterbacks,
    RunningBacks,
    WideReceivers,
    TightEnds,
    OffensiveLine,
    DefensiveLine,
    Linebackers,
    DefensiveBacks,
    SpecialTeams,
    Coaches,
}

impl Position {
    pub const ALL: [Position; 11] = [
        Position::All,
        Position::Quarterbacks,
        Position::RunningBacks,
        Position::WideReceivers,
        Position::TightEnds,
        Position::OffensiveLine,
        Position::DefensiveLine,
        Position::Linebackers,
        Position::DefensiveBacks,
        Position::SpecialTeams,
        Position::Coaches,
    ];

    /// Filter token matched against entry search text.
    pub fn token(&self) -> &'static str {
        match self {
            Position::All => "",
            Position::Quarterbacks => "qb",
            Position::RunningBacks => "rb",
            Position::WideReceivers => "wr",
            Position::TightEnds => "te",
            Position::OffensiveLine => "ol",
            Position::DefensiveLine => "dl",
            Position::Linebackers => "lb",
            Position::DefensiveBacks => "db",
            Position::SpecialTeams => "st",
            Position::Coaches => "coach",
        }
    }

    /// Picker label.
    pub fn label(&self) -> &'static str {
        match self {
            Position::All => "All Positions",
            Position::Quarterbacks => "QB - Quarterbacks",
            Position::RunningBacks => "RB - Running Backs",
            Position::WideReceivers => "WR - Wide Receivers",
            Position::TightEnds => "TE - Tight Ends",
            Position::OffensiveLine => "OL - Offensive Line",
            Position::DefensiveLine => "DL - Defensive Line",
            Position::Linebackers => "LB - Linebackers",
            Position::DefensiveBacks => "DB - Defensive Backs",
            Position::SpecialTeams => "ST - Special Teams",
            Position::Coaches => "Coaches",
        }
    }

    /// Synthetic section header for filtered views.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Position::All => None,
            Position::Quarterbacks => Some("QUARTERBACKS"),
            Position::RunningBacks => Some("RUNNING BACKS"),
            Position::WideReceivers => Some("WIDE RECEIVERS"),
            Position::TightEnds => Some("TIGHT ENDS"),
            Position::OffensiveLine => Some("OFFENSIVE LINE"),
            Position::DefensiveLine => Some("DEFENSIVE LINE"),
            Position::Linebackers => Some("LINEBACKERS"),
            Position::DefensiveBacks => Some("DEFENSIVE BACKS"),
            Position::SpecialTeams => Some("SPECIAL TEAMS"),
            Position::Coaches => Some("COACHING STAFF"),
        }
    }

    /// Case-insensitive, whitespace-tolerant token lookup.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = normalize_query(token);
        Self::ALL.into_iter().find(|p| p.token() == token)
    }

    /// Next choice in picker order (wrapping around)
    pub fn next(&self) -> Self {
        let index = self.index();
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Previous choice in picker order (wrapping around)
    pub fn prev(&self) -> Self {
        let index = self.index();
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }
}

// ============================================================================
// Entries and Views
// ============================================================================

/// A record prepared for display and matching. Built once per load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub record: Record,
    pub display_name: String,
    pub subtitle: String,
    pub is_player: bool,
    /// Display name, subtitle and details; lower-cased per query, not here
    pub search_text: String,
}

impl RosterEntry {
    pub fn new(record: Record) -> Self {
        let (display_name, subtitle) = record.name_parts();
        let display_name = display_name.to_string();
        let subtitle = subtitle.to_string();
        let is_player = record.is_player();
        let search_text = record.search_text();

        Self {
            record,
            display_name,
            subtitle,
            is_player,
            search_text,
        }
    }

    /// `query` must already be normalized.
    pub fn matches(&self, query: &str) -> bool {
        contains_ignore_case(&self.search_text, query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewMode {
    AllSections,
    TextFiltered,
    CategoryFiltered,
}

/// One entry slot in a view, with the headers rendered before it.
///
/// Headers belong to the slot, not the entry: they are drawn even when a text
/// search hides the entry itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewRow {
    /// Index into `FilterEngine::entries`
    pub entry: usize,
    pub visible: bool,
    pub section_header: Option<String>,
    pub subsection_header: Option<String>,
    /// Draw the "Other Positions" separator before this row
    pub separator_before: bool,
}

impl ViewRow {
    fn plain(entry: usize) -> Self {
        Self {
            entry,
            visible: true,
            section_header: None,
            subsection_header: None,
            separator_before: false,
        }
    }
}

/// Ordered result of a query, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterView {
    pub mode: ViewMode,
    pub rows: Vec<ViewRow>,
}

impl RosterView {
    pub fn visible_count(&self) -> usize {
        self.rows.iter().filter(|r| r.visible).count()
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &ViewRow> {
        self.rows.iter().filter(|r| r.visible)
    }

    /// Entry indices in display order.
    pub fn order(&self) -> Vec<usize> {
        self.rows.iter().map(|r| r.entry).collect()
    }
}

// ============================================================================
// Filter Engine
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    entries: Vec<RosterEntry>,
    /// Rows of the unfiltered, categorized view
    layout: Vec<ViewRow>,
}

impl FilterEngine {
    pub fn new(sections: &[Section]) -> Self {
        let mut entries = Vec::new();
        let mut layout = Vec::new();

        for section in sections {
            for (i, record) in section.records.iter().enumerate() {
                let mut row = ViewRow::plain(entries.len());
                if i == 0 {
                    if section.starts_major {
                        row.section_header = Some(section.major_title());
                    }
                    row.subsection_header = section.minor.clone();
                }
                layout.push(row);
                entries.push(RosterEntry::new(record.clone()));
            }
        }

        Self { entries, layout }
    }

    pub fn from_records(records: &[Record]) -> Self {
        Self::new(&crate::categorizer::categorize(records))
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&RosterEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The categorized view with every entry visible.
    pub fn all_sections(&self) -> RosterView {
        RosterView {
            mode: ViewMode::AllSections,
            rows: self.layout.clone(),
        }
    }

    /// Live search: hide entries whose search text lacks the query.
    /// Order and headers are those of the categorized view.
    pub fn apply_search_filter(&self, query: &str) -> RosterView {
        let query = normalize_query(query);
        if query.is_empty() {
            return self.all_sections();
        }

        let rows: Vec<ViewRow> = self
            .layout
            .iter()
            .map(|row| ViewRow {
                visible: self.entries[row.entry].matches(&query),
                ..row.clone()
            })
            .collect();

        let view = RosterView {
            mode: ViewMode::TextFiltered,
            rows,
        };
        debug!(query = %query, visible = view.visible_count(), total = self.len(), "Applied search filter");
        view
    }

    /// Position filter: matching entries first under the position's header,
    /// then the separator, then everything else. Nothing is hidden and each
    /// partition keeps its categorized order.
    ///
    /// Tokens outside the `Position` table still partition but get no header.
    pub fn apply_category_filter(&self, token: &str) -> RosterView {
        let token = normalize_query(token);
        if token.is_empty() {
            return self.all_sections();
        }

        let (matching, non_matching): (Vec<usize>, Vec<usize>) = self
            .layout
            .iter()
            .map(|row| row.entry)
            .partition(|&i| self.entries[i].matches(&token));

        let title = Position::from_token(&token).and_then(|p| p.title());
        let needs_separator = !matching.is_empty() && !non_matching.is_empty();

        let mut rows = Vec::with_capacity(self.entries.len());
        for (n, &i) in matching.iter().enumerate() {
            let mut row = ViewRow::plain(i);
            if n == 0 {
                row.section_header = title.map(str::to_string);
            }
            rows.push(row);
        }
        for (n, &i) in non_matching.iter().enumerate() {
            let mut row = ViewRow::plain(i);
            row.separator_before = n == 0 && needs_separator;
            rows.push(row);
        }

        debug!(token = %token, matching = matching.len(), other = non_matching.len(), "Applied position filter");
        RosterView {
            mode: ViewMode::CategoryFiltered,
            rows,
        }
    }
}
