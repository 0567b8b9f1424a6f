//! Application state management for rostercard.
//!
//! `App` holds the UI state around a `RosterSession`: the current view, the
//! search box, the position picker, card selection and which cards are
//! expanded. All roster logic lives in the session; this module only keeps
//! the presentation state consistent with the views it returns.

use std::collections::HashSet;

use anyhow::Result;
use tracing::{debug, info, warn};

use rostercard_core::{load, Position, RosterEntry, RosterOrigin, RosterSession, RosterView, ViewRow};

use crate::config::Config;

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for search input.
const MAX_SEARCH_LENGTH: usize = 64;

/// Number of cards to move on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

const WELCOME_MESSAGE: &str = "Welcome! Press / to search, f to filter by position, ? for help";

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Searching,
    ChoosingPosition,
    ShowingHelp,
    ShowingAbout,
    ConfirmingQuit,
    Quitting,
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub config: Config,
    pub session: RosterSession,
    pub view: RosterView,

    // UI State
    pub state: AppState,
    pub search_query: String,
    pub position: Position,
    pub picker_selection: Position,

    /// Index into the visible rows of `view`
    pub selection: usize,
    /// Expanded cards, by entry index
    pub expanded: HashSet<usize>,

    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Config, session: RosterSession) -> Self {
        let view = session.current_view();
        let mut app = Self {
            config,
            session,
            view,
            state: AppState::Normal,
            search_query: String::new(),
            position: Position::All,
            picker_selection: Position::All,
            selection: 0,
            expanded: HashSet::new(),
            status_message: None,
        };

        app.status_message = Some(app.load_summary());

        if let Some(token) = app.config.default_filter.clone() {
            match Position::from_token(&token) {
                Some(position) if position != Position::All => app.apply_position(position),
                Some(_) => {}
                None => warn!(token = %token, "Ignoring unknown default filter"),
            }
        }

        if !app.session.report().is_fallback() && app.session.report().warnings.is_empty() {
            app.status_message = Some(WELCOME_MESSAGE.to_string());
        }

        app
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Rows of the current view that have a card on screen.
    pub fn visible_rows(&self) -> Vec<&ViewRow> {
        self.view.visible_rows().collect()
    }

    pub fn entry(&self, index: usize) -> Option<&RosterEntry> {
        self.session.engine().entry(index)
    }

    /// Entry index of the selected card.
    pub fn selected_entry(&self) -> Option<usize> {
        self.view.visible_rows().nth(self.selection).map(|r| r.entry)
    }

    pub fn is_expanded(&self, entry: usize) -> bool {
        self.expanded.contains(&entry)
    }

    /// One-line description of where the roster came from.
    pub fn load_summary(&self) -> String {
        let report = self.session.report();
        let mut summary = match &report.origin {
            RosterOrigin::File(path) => {
                format!("Loaded {} entries from {}", report.records.len(), path.display())
            }
            RosterOrigin::Fallback(reason) => format!("{}; showing default roster", reason),
        };
        if !report.warnings.is_empty() {
            summary.push_str(&format!(" ({} rows skipped)", report.warnings.len()));
        }
        summary
    }

    // =========================================================================
    // Search
    // =========================================================================

    pub fn start_search(&mut self) {
        self.state = AppState::Searching;
    }

    pub fn push_search_char(&mut self, c: char) {
        if can_add_search_char(self.search_query.chars().count(), c) {
            self.search_query.push(c);
            self.run_search();
        }
    }

    pub fn pop_search_char(&mut self) {
        if self.search_query.pop().is_some() {
            self.run_search();
        }
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.run_search();
    }

    fn run_search(&mut self) {
        self.view = self.session.on_text_query(&self.search_query);
        // Typing resets the position picker
        self.position = Position::All;
        self.selection = 0;
        self.status_message = None;
    }

    // =========================================================================
    // Position Filter
    // =========================================================================

    pub fn open_position_picker(&mut self) {
        self.picker_selection = self.position;
        self.state = AppState::ChoosingPosition;
    }

    /// Apply the picker choice. "All Positions" reloads the roster.
    pub async fn choose_position(&mut self, position: Position) -> Result<()> {
        self.state = AppState::Normal;
        if position == Position::All {
            self.reload().await?;
        } else {
            self.apply_position(position);
        }
        Ok(())
    }

    fn apply_position(&mut self, position: Position) {
        self.view = self.session.on_category_select(position.token());
        self.position = position;
        self.search_query.clear();
        self.selection = 0;
        self.status_message = None;
        debug!(position = position.label(), "Position filter applied");
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Re-read the roster source off the UI thread and reset to all sections.
    pub async fn reload(&mut self) -> Result<()> {
        let source = self.session.source().to_path_buf();
        let report = tokio::task::spawn_blocking(move || load(&source)).await?;

        self.view = self.session.install(report);
        self.search_query.clear();
        self.position = Position::All;
        self.selection = 0;
        self.expanded.clear();
        self.status_message = Some(self.load_summary());
        info!(source = %self.session.source().display(), "Roster reloaded");
        Ok(())
    }

    // =========================================================================
    // Cards
    // =========================================================================

    pub fn move_selection(&mut self, delta: isize) {
        let count = self.view.visible_count();
        if count == 0 {
            self.selection = 0;
            return;
        }
        let max_index = count - 1;
        self.selection = if delta < 0 {
            self.selection.saturating_sub(delta.unsigned_abs())
        } else {
            (self.selection + delta as usize).min(max_index)
        };
    }

    pub fn select_first(&mut self) {
        self.selection = 0;
    }

    pub fn select_last(&mut self) {
        self.selection = self.view.visible_count().saturating_sub(1);
    }

    pub fn toggle_selected(&mut self) {
        if let Some(entry) = self.selected_entry() {
            if !self.expanded.remove(&entry) {
                self.expanded.insert(entry);
            }
        }
    }

    /// Expand every visible card. Hidden cards keep their state.
    pub fn expand_all(&mut self) {
        let visible: Vec<usize> = self.view.visible_rows().map(|r| r.entry).collect();
        self.expanded.extend(visible);
    }

    /// Collapse every visible card. Hidden cards keep their state.
    pub fn collapse_all(&mut self) {
        let visible: Vec<usize> = self.view.visible_rows().map(|r| r.entry).collect();
        for entry in visible {
            self.expanded.remove(&entry);
        }
    }
}

// ============================================================================
// Input Validation
// ============================================================================

pub fn can_add_search_char(current_len: usize, c: char) -> bool {
    current_len < MAX_SEARCH_LENGTH && !c.is_control()
}
