//! Semantic style builders

use estate_app::list_view::ListStatus;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Status styles ---
pub fn status_green() -> Style {
    Style::default().fg(palette::STATUS_GREEN)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_yellow() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

pub fn status_blue() -> Style {
    Style::default().fg(palette::STATUS_BLUE)
}

// --- Keybinding hint style ---
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

// --- Selection styles ---

/// "Black on Cyan" - used for focused+selected items across widgets
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Selected row of a panel that does not have focus
pub fn unfocused_selected() -> Style {
    Style::default()
        .fg(palette::TEXT_PRIMARY)
        .add_modifier(Modifier::REVERSED)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- List status mapping ---

/// Indicator for a fetched collection.
///
/// Returns `(icon_char, label, Style)`; the label is empty once loaded,
/// callers show the record count instead.
pub fn list_status_indicator(status: &ListStatus) -> (&'static str, &'static str, Style) {
    match status {
        ListStatus::Idle => ("○", "Not loaded", text_muted()),
        ListStatus::Loading => ("↻", "Loading", status_yellow()),
        ListStatus::Loaded => ("●", "", status_green()),
        ListStatus::Errored(_) => ("✗", "Failed", status_red().add_modifier(Modifier::BOLD)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_status_indicator_labels() {
        assert_eq!(list_status_indicator(&ListStatus::Loading).1, "Loading");
        assert_eq!(list_status_indicator(&ListStatus::Loaded).0, "●");
        let (icon, label, style) = list_status_indicator(&ListStatus::Errored("boom".into()));
        assert_eq!((icon, label), ("✗", "Failed"));
        assert_eq!(style.fg, Some(palette::STATUS_RED));
    }

    #[test]
    fn test_glass_block_focus_changes_border() {
        assert_ne!(glass_block(true), glass_block(false));
    }
}
