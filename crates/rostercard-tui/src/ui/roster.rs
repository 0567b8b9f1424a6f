//! Roster list rendering: section headers, separators and expandable cards.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use rostercard_core::filter::OTHER_POSITIONS_LABEL;

use crate::app::{App, AppState};
use crate::ui::styles;
use crate::utils::{truncate_string, wrap_text};

/// Indent of details text under a card name
const DETAILS_INDENT: &str = "      ";

/// Lines for the current view plus the line index where the selected card
/// starts.
///
/// Headers belong to their row and are drawn even when a search hides the
/// card below them.
pub fn build_lines(app: &App, width: u16) -> (Vec<Line<'static>>, Option<usize>) {
    let width = width as usize;
    let details_width = width.saturating_sub(DETAILS_INDENT.len()).max(10);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut selected_line = None;
    let mut visible_index = 0;

    for row in &app.view.rows {
        if row.separator_before {
            let label = format!("─────  {}  ─────", OTHER_POSITIONS_LABEL);
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(label, styles::separator_style())).alignment(Alignment::Center));
            lines.push(Line::from(""));
        }

        if let Some(ref header) = row.section_header {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(format!(" {}", header), styles::section_style())));
        }

        if let Some(ref subsection) = row.subsection_header {
            lines.push(Line::from(Span::styled(format!("  {}", subsection), styles::subsection_style())));
        }

        if !row.visible {
            continue;
        }

        let Some(entry) = app.entry(row.entry) else {
            continue;
        };

        let selected = visible_index == app.selection;
        if selected {
            selected_line = Some(lines.len());
        }
        visible_index += 1;

        let expanded = app.is_expanded(row.entry);
        let arrow = if expanded { "▲" } else { "▼" };
        let name = truncate_string(&entry.display_name, width.saturating_sub(8));

        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(arrow.to_string(), styles::arrow_style()),
            Span::raw(" "),
            Span::styled(name, styles::card_name_style(selected)),
        ]));

        if !entry.subtitle.is_empty() {
            let subtitle_style = if entry.is_player {
                styles::highlight_style()
            } else {
                styles::card_subtitle_style()
            };
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(entry.subtitle.clone(), subtitle_style),
            ]));
        }

        if expanded {
            for text in wrap_text(&entry.record.details, details_width) {
                lines.push(Line::from(vec![
                    Span::raw(DETAILS_INDENT),
                    Span::styled(text, styles::details_style()),
                ]));
            }
        }
    }

    (lines, selected_line)
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let focused = matches!(app.state, AppState::Normal);
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2) as usize;

    let (lines, selected_line) = build_lines(app, inner_width);

    // Keep the selected card in the upper third of the panel
    let scroll = selected_line
        .map(|line| line.saturating_sub(inner_height / 3))
        .unwrap_or(0);

    let total = app.session.engine().len();
    let shown = app.view.visible_count();
    let title = if shown == total {
        format!(" Roster ({}) ", total)
    } else {
        format!(" Roster ({} of {}) ", shown, total)
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused)),
        )
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use rostercard_core::{Position, RosterSession};

    fn app() -> (tempfile::TempDir, App) {
        // A missing source gives the three-entry default roster
        let dir = tempfile::tempdir().unwrap();
        let session = RosterSession::open(dir.path().join("missing.csv"));
        (dir, App::new(Config::default(), session))
    }

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_build_lines_sections() {
        let (_dir, app) = app();
        let (lines, selected) = build_lines(&app, 60);
        let text = text(&lines);
        assert_eq!(text[0], " PLAYER ROSTER");
        assert_eq!(text[1], "  Quarterbacks");
        assert_eq!(text[2], "  ▼ Lamar Jackson");
        assert_eq!(text[3], "    QB");
        assert!(text.contains(&"  Running Backs".to_string()));
        assert_eq!(selected, Some(2));
    }

    #[test]
    fn test_build_lines_expanded_card_shows_details() {
        let (_dir, mut app) = app();
        app.toggle_selected();
        let (lines, _) = build_lines(&app, 80);
        let text = text(&lines);
        assert_eq!(text[2], "  ▲ Lamar Jackson");
        assert_eq!(text[4], "      Stats:");
        assert!(text.iter().any(|l| l.contains("NFL MVP: 2019, 2023")));
    }

    #[test]
    fn test_build_lines_hidden_cards_keep_headers() {
        let (_dir, mut app) = app();
        for c in "henry".chars() {
            app.push_search_char(c);
        }
        let (lines, selected) = build_lines(&app, 60);
        let text = text(&lines);
        assert!(text.contains(&"  Quarterbacks".to_string()));
        assert!(!text.iter().any(|l| l.contains("Lamar Jackson")));
        assert!(text.iter().any(|l| l.contains("Derrick Henry")));
        assert_eq!(text[selected.unwrap()], "  ▼ Derrick Henry");
    }

    #[test]
    fn test_build_lines_position_filter_separator() {
        let (_dir, mut app) = app();
        app.view = app.session.on_category_select(Position::Quarterbacks.token());
        let (lines, _) = build_lines(&app, 60);
        let text = text(&lines);
        assert_eq!(text[0], " QUARTERBACKS");
        assert!(text.contains(&"─────  Other Positions  ─────".to_string()));
        let separator = text.iter().position(|l| l.contains("Other Positions")).unwrap();
        let henry = text.iter().position(|l| l.contains("Derrick Henry")).unwrap();
        assert!(separator < henry);
    }
}
