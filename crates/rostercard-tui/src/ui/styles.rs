use ratatui::style::{Color, Modifier, Style};

// Color palette
pub const PURPLE: Color = Color::Rgb(124, 100, 220);
pub const GOLD: Color = Color::Rgb(198, 164, 52);
pub const MUTED: Color = Color::Rgb(128, 128, 140);
pub const SUBTLE: Color = Color::Rgb(150, 150, 160);
pub const HIGHLIGHT: Color = Color::Rgb(48, 40, 80);

// Styles
pub fn title_style() -> Style {
    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
}

pub fn subtitle_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn section_style() -> Style {
    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
}

pub fn subsection_style() -> Style {
    Style::default().fg(PURPLE).add_modifier(Modifier::BOLD)
}

pub fn separator_style() -> Style {
    Style::default().fg(SUBTLE).add_modifier(Modifier::ITALIC)
}

pub fn card_name_style(selected: bool) -> Style {
    let style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    if selected {
        style.bg(HIGHLIGHT)
    } else {
        style
    }
}

pub fn card_subtitle_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn details_style() -> Style {
    Style::default().fg(Color::Rgb(200, 200, 210))
}

pub fn arrow_style() -> Style {
    Style::default().fg(GOLD)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(GOLD)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PURPLE)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn search_style() -> Style {
    Style::default().fg(GOLD)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 24, 56)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default()
        .fg(GOLD)
        .add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}
