//! End-to-end flow through the public API: load a roster file, browse it,
//! search it and filter it by position the way the TUI does.

use std::io::Write;

use rostercard_core::{
    categorize, default_roster, load, FilterEngine, RosterEvent, RosterSession, ViewMode,
};

const ROSTER: &str = "\
category,name,details
Player Roster - Quarterbacks,Lamar Jackson – QB,\"Stats:\\n• NFL MVP: 2019, 2023\"
Player Roster - Running Backs,Derrick Henry – RB,\"Stats:\\n• Career Rushing TDs: 90+\"
Player Roster - Tight Ends,Mark Andrews – TE,Reliable target
Coaching Staff - Head Coach,John Harbaugh – Head Coach,Since 2008
Coaching Staff - Offense,Todd Monken - Offensive Coordinator,Coaching the offense since 2023
Player Roster - Quarterbacks,Cooper Rush – QB,Backup
bad row
";

fn roster_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ROSTER.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn display_names(session: &RosterSession, rows: &[rostercard_core::ViewRow]) -> Vec<String> {
    rows.iter()
        .map(|r| session.engine().entries()[r.entry].display_name.clone())
        .collect()
}

#[test]
fn test_load_reports_dropped_row() {
    let file = roster_file();
    let report = load(file.path());
    assert_eq!(report.records.len(), 6);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].line, 8);
    assert_eq!(report.records[0].details, "Stats:\n• NFL MVP: 2019, 2023");
}

#[test]
fn test_sections_follow_first_seen_categories() {
    let file = roster_file();
    let sections = categorize(&load(file.path()).records);
    let categories: Vec<&str> = sections.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(
        categories,
        vec![
            "Player Roster - Quarterbacks",
            "Player Roster - Running Backs",
            "Player Roster - Tight Ends",
            "Coaching Staff - Head Coach",
            "Coaching Staff - Offense",
        ]
    );
    assert_eq!(sections[0].records.len(), 2);
}

#[test]
fn test_browse_search_filter_reset() {
    let file = roster_file();
    let mut session = RosterSession::open(file.path());

    let all = session.current_view();
    assert_eq!(
        display_names(&session, &all.rows),
        vec!["Lamar Jackson", "Cooper Rush", "Derrick Henry", "Mark Andrews", "John Harbaugh", "Todd Monken"]
    );

    // Typing narrows the list without moving anything
    let typed = session.dispatch(RosterEvent::TextQuery("Mvp".to_string()));
    assert_eq!(typed.mode, ViewMode::TextFiltered);
    assert_eq!(typed.order(), all.order());
    let visible: Vec<String> = display_names(&session, &typed.visible_rows().cloned().collect::<Vec<_>>());
    assert_eq!(visible, vec!["Lamar Jackson"]);

    // Picking coaches brings both coaches to the top
    let coaches = session.dispatch(RosterEvent::CategorySelect("coach".to_string()));
    assert_eq!(
        display_names(&session, &coaches.rows),
        vec!["John Harbaugh", "Todd Monken", "Lamar Jackson", "Cooper Rush", "Derrick Henry", "Mark Andrews"]
    );
    assert_eq!(coaches.rows[0].section_header.as_deref(), Some("COACHING STAFF"));
    assert!(coaches.rows[2].separator_before);
    assert_eq!(session.text_query(), "");

    // All Positions is the same as a fresh load and categorize
    let reset = session.dispatch(RosterEvent::CategorySelect(String::new()));
    let fresh = FilterEngine::new(&categorize(&load(file.path()).records)).all_sections();
    assert_eq!(reset, fresh);
}

#[test]
fn test_missing_source_never_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = RosterSession::open(dir.path().join("ravens_roster.csv"));
    assert_eq!(session.report().records, default_roster());

    // "quarterback" in the QB details contains "rb", so every entry matches
    let view = session.on_category_select("rb");
    assert_eq!(
        display_names(&session, &view.rows),
        vec!["Lamar Jackson", "Cooper Rush", "Derrick Henry"]
    );
    assert_eq!(view.rows[0].section_header.as_deref(), Some("RUNNING BACKS"));
    assert!(view.rows.iter().all(|r| !r.separator_before));
}
