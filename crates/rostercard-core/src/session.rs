//! Query dispatcher driven by the presentation layer.
//!
//! `RosterSession` owns the loaded roster and the current view mode. Text
//! search and the position filter are mutually exclusive: using one clears the
//! other's input. Choosing "All Positions" reloads from the source.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::filter::{FilterEngine, Position, RosterView, ViewMode};
use crate::loader::{load, LoadReport};

/// Input events a UI forwards to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    TextQuery(String),
    CategorySelect(String),
    Reload,
}

#[derive(Debug)]
pub struct RosterSession {
    source: PathBuf,
    engine: FilterEngine,
    report: LoadReport,
    mode: ViewMode,
    text_query: String,
    category: String,
}

impl RosterSession {
    /// Load `source` and start in the all-sections view.
    pub fn open(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let report = load(&source);
        Self::from_report(source, report)
    }

    /// Build a session around a report that was loaded elsewhere.
    pub fn from_report(source: impl Into<PathBuf>, report: LoadReport) -> Self {
        let engine = FilterEngine::from_records(&report.records);
        Self {
            source: source.into(),
            engine,
            report,
            mode: ViewMode::AllSections,
            text_query: String::new(),
            category: String::new(),
        }
    }

    pub fn dispatch(&mut self, event: RosterEvent) -> RosterView {
        match event {
            RosterEvent::TextQuery(text) => self.on_text_query(&text),
            RosterEvent::CategorySelect(token) => self.on_category_select(&token),
            RosterEvent::Reload => self.reload(),
        }
    }

    /// Search box edit. Clears any position filter.
    pub fn on_text_query(&mut self, raw: &str) -> RosterView {
        self.category.clear();
        self.text_query = raw.to_string();

        let view = self.engine.apply_search_filter(raw);
        self.mode = view.mode;
        view
    }

    /// Position picker selection. Clears the search box; an empty token
    /// reloads the roster from its source.
    pub fn on_category_select(&mut self, token: &str) -> RosterView {
        self.text_query.clear();

        if token.trim().is_empty() {
            debug!("All positions selected, reloading roster");
            return self.reload();
        }

        self.category = token.trim().to_lowercase();
        let view = self.engine.apply_category_filter(token);
        self.mode = view.mode;
        view
    }

    /// Re-read the source and return to the all-sections view.
    pub fn reload(&mut self) -> RosterView {
        let report = load(&self.source);
        self.install(report)
    }

    /// Swap in a freshly loaded report and return to the all-sections view.
    pub fn install(&mut self, report: LoadReport) -> RosterView {
        info!(
            count = report.records.len(),
            fallback = report.is_fallback(),
            warnings = report.warnings.len(),
            "Installing roster"
        );
        self.engine = FilterEngine::from_records(&report.records);
        self.report = report;
        self.text_query.clear();
        self.category.clear();
        self.mode = ViewMode::AllSections;
        self.engine.all_sections()
    }

    /// Recompute the view for the current inputs without touching the source.
    pub fn current_view(&self) -> RosterView {
        match self.mode {
            ViewMode::AllSections => self.engine.all_sections(),
            ViewMode::TextFiltered => self.engine.apply_search_filter(&self.text_query),
            ViewMode::CategoryFiltered => self.engine.apply_category_filter(&self.category),
        }
    }

    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn text_query(&self) -> &str {
        &self.text_query
    }

    /// Selected position, if the token is one of the known ones.
    pub fn position(&self) -> Option<Position> {
        Position::from_token(&self.category)
    }
}
