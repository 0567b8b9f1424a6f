use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use rostercard_core::Position;

use crate::app::{App, AppState};
use crate::utils::format_age;

use super::roster;
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(2), // Search and filter controls
            Constraint::Min(10),   // Roster
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_controls(frame, app, chunks[1]);
    roster::render(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ShowingAbout => render_about_overlay(frame),
        AppState::ChoosingPosition => render_position_picker(frame, app),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        _ => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let help_hint = "[?] Help";
    let title = format!("  {}", app.config.title());
    let subtitle = format!("  {}", app.config.subtitle());
    let used = title.chars().count() + subtitle.chars().count();

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::styled(subtitle, styles::subtitle_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(used + help_hint.len() + 2),
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(vec![Line::from(""), title_line]).block(block);
    frame.render_widget(paragraph, area);
}

fn render_controls(frame: &mut Frame, app: &App, area: Rect) {
    let searching = matches!(app.state, AppState::Searching);
    let cursor = if searching { "▌" } else { "" };
    let search_style = if searching {
        styles::selected_style()
    } else {
        styles::search_style()
    };

    let line = Line::from(vec![
        Span::styled("  Search: [", styles::muted_style()),
        Span::styled(format!("{:<20}", format!("{}{}", app.search_query, cursor)), search_style),
        Span::styled("]   Filter: [", styles::muted_style()),
        Span::styled(app.position.label(), styles::highlight_style()),
        Span::styled("]   ", styles::muted_style()),
        Span::styled("[e]", styles::help_key_style()),
        Span::styled("xpand all ", styles::muted_style()),
        Span::styled("[c]", styles::help_key_style()),
        Span::styled("ollapse all", styles::muted_style()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[/]search | [f]ilter | [r]eload | [q]uit";

    let left_text = match app.status_message {
        Some(ref msg) => format!(" {} ", msg),
        None => format!(" Loaded {} ", format_age(app.session.report().loaded_at)),
    };
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn key_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(key, styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 24, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(Span::styled(" Search", styles::highlight_style())),
        key_line("  /         ", "Search names, positions and details"),
        key_line("  Esc       ", "Clear the search box"),
        key_line("  Enter     ", "Keep the search and browse"),
        Line::from(""),
        Line::from(Span::styled(" Filter", styles::highlight_style())),
        key_line("  f         ", "Choose a position to move to the top"),
        key_line("  r         ", "Reload the roster from disk"),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        key_line("  ↑/↓ j/k   ", "Select card"),
        key_line("  PgUp/PgDn ", "Move ten cards"),
        key_line("  Enter     ", "Expand / collapse card"),
        key_line("  e / c     ", "Expand / collapse all visible"),
        Line::from(""),
        key_line("  a         ", "About"),
        key_line("  q         ", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_about_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 14, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");
    let lines = vec![
        Line::from(Span::styled(" Rostercard", styles::title_style())),
        Line::from(Span::styled(format!(" version {}", version), styles::muted_style())),
        Line::from(""),
        Line::from(" Roster and staff directory, loaded from CSV."),
        Line::from(""),
        Line::from(" • Live search across names, roles and details"),
        Line::from(" • Position filters that bring matches to the top"),
        Line::from(" • Expandable detail cards"),
        Line::from(" • Built-in roster when no file is available"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .title(" About ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_position_picker(frame: &mut Frame, app: &App) {
    let height = Position::ALL.len() as u16 + 4;
    let area = centered_rect_fixed(32, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = Position::ALL
        .iter()
        .map(|position| {
            let selected = *position == app.picker_selection;
            let marker = if *position == app.position { "•" } else { " " };
            let style = if selected {
                styles::selected_style()
            } else {
                styles::list_item_style()
            };
            Line::from(vec![
                Span::styled(format!(" {} ", marker), styles::highlight_style()),
                Span::styled(format!("{:<26}", position.label()), style),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Enter select · Esc cancel",
        styles::muted_style(),
    )));

    let block = Block::default()
        .title(" Filter by position ")
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(40, 6, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
