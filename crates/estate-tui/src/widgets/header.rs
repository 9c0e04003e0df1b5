//! Header bar widget
//!
//! Application title on the left, page tabs filling the rest of the row.

use estate_app::{AppState, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{palette, styles};

use super::PageTabs;

const APP_TITLE: &str = "Estate Admin";

/// Main header showing the app title, connection dot and page tabs
pub struct MainHeader<'a> {
    state: &'a AppState,
}

impl<'a> MainHeader<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Green while logged in, muted on the login screen
    fn session_dot(&self) -> Span<'static> {
        match self.state.ui_mode {
            UiMode::Login => Span::styled("○", styles::text_muted()),
            _ => Span::styled("●", styles::status_green()),
        }
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let title = Line::from(vec![
            Span::raw(" "),
            self.session_dot(),
            Span::raw(" "),
            Span::styled(APP_TITLE, styles::accent_bold()),
            Span::raw("  "),
        ]);
        let title_width = (title.width() as u16).min(inner.width);
        Paragraph::new(title).render(
            Rect {
                width: title_width,
                ..inner
            },
            buf,
        );

        // The login screen has no pages to switch between
        if self.state.ui_mode == UiMode::Login {
            return;
        }

        let tabs_area = Rect {
            x: inner.x + title_width,
            width: inner.width.saturating_sub(title_width),
            ..inner
        };
        PageTabs::new(self.state).render(tabs_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_state, TestTerminal};
    use estate_app::config::Settings;

    #[test]
    fn test_header_shows_title_and_tabs() {
        let state = create_test_state();
        let mut term = TestTerminal::with_size(120, 3);
        term.render_widget(MainHeader::new(&state), term.area());

        assert!(term.line_contains(1, "Estate Admin"));
        assert!(term.line_contains(1, "1 Dashboard"));
    }

    #[test]
    fn test_header_hides_tabs_on_login() {
        let state = AppState::new(Settings::default(), false);
        let mut term = TestTerminal::with_size(120, 3);
        term.render_widget(MainHeader::new(&state), term.area());

        assert!(term.buffer_contains("Estate Admin"));
        assert!(!term.buffer_contains("Dashboard"));
    }

    #[test]
    fn test_header_survives_tiny_area() {
        let state = create_test_state();
        let mut term = TestTerminal::with_size(10, 2);
        term.render_widget(MainHeader::new(&state), term.area());
    }
}
