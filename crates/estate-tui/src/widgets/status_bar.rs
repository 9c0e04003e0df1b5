//! Status bar widget
//!
//! Left: where the user is and the page's latest notice. Right: the keys
//! that do something in the current context.

use estate_app::page::{Notice, PageFocus, PageState};
use estate_app::{AppState, Page};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::styles;

type Hint = (&'static str, &'static str);

const DASHBOARD_HINTS: &[Hint] = &[
    ("↑↓", "select"),
    ("Enter", "open"),
    ("r", "refresh"),
    ("Tab", "page"),
    ("q", "quit"),
];
const LIST_HINTS: &[Hint] = &[
    ("n", "new"),
    ("Enter", "edit"),
    ("d", "delete"),
    ("r", "refresh"),
    ("→", "form"),
];
const FORM_HINTS: &[Hint] = &[
    ("Enter", "edit"),
    ("a/d", "row"),
    ("K/J", "move"),
    ("x", "clear file"),
    ("s", "save"),
    ("←", "list"),
];
const EDIT_HINTS: &[Hint] = &[("Enter", "done"), ("Esc", "cancel")];
const CHAT_HINTS: &[Hint] = &[("Enter", "send"), ("Esc", "back"), ("Tab", "page")];

/// Status bar widget showing context, notices and key hints
pub struct StatusBar<'a> {
    state: &'a AppState,
    compact: bool,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self {
            state,
            compact: false,
        }
    }

    /// Narrow terminals get at most two hints and no page label
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    fn current_page(&self) -> Option<&PageState> {
        self.state
            .current_kind()
            .and_then(|kind| self.state.page_state(kind))
    }

    fn hints(&self) -> &'static [Hint] {
        match self.state.page {
            Page::Dashboard => DASHBOARD_HINTS,
            Page::Chat => CHAT_HINTS,
            Page::Collection(_) => match self.current_page() {
                Some(page) if page.edit.is_some() => EDIT_HINTS,
                Some(page) if page.focus == PageFocus::Form => FORM_HINTS,
                _ => LIST_HINTS,
            },
        }
    }

    fn context(&self) -> Span<'static> {
        let label = match (self.state.page, self.current_page()) {
            (Page::Dashboard, _) => format!(
                "Dashboard · {} records",
                self.state.overview.total_records()
            ),
            (Page::Collection(kind), Some(page)) => {
                format!("{} · {}", kind.title(), page.mode_label())
            }
            (page, _) => page.title().to_string(),
        };
        let label = match self.state.pending_uploads() {
            0 => label,
            1 => format!("{} · 1 pending upload", label),
            n => format!("{} · {} pending uploads", label, n),
        };
        Span::styled(label, styles::accent())
    }

    fn notice(&self) -> Option<Span<'static>> {
        match self.current_page()?.notice.as_ref()? {
            Notice::Info(text) => Some(Span::styled(text.clone(), styles::status_green())),
            Notice::Error(text) => Some(Span::styled(format!("✗ {}", text), styles::status_red())),
        }
    }

    fn hint_spans(&self) -> Vec<Span<'static>> {
        let hints = self.hints();
        let take = if self.compact { 2 } else { hints.len() };
        let mut spans = Vec::new();
        for (key, action) in hints.iter().take(take) {
            spans.push(Span::styled(*key, styles::keybinding()));
            spans.push(Span::styled(format!(" {} ", action), styles::text_muted()));
        }
        spans
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(styles::border_inactive());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let hints = Line::from(self.hint_spans()).right_aligned();
        let hints_width = (hints.width() as u16).min(inner.width);

        let mut left = vec![Span::raw(" ")];
        if !self.compact {
            left.push(self.context());
            left.push(Span::styled("  ", styles::text_muted()));
        }
        if let Some(notice) = self.notice() {
            left.push(notice);
        }
        Paragraph::new(Line::from(left)).render(
            Rect {
                width: inner.width.saturating_sub(hints_width),
                ..inner
            },
            buf,
        );
        Paragraph::new(hints).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_state, open_page, TestTerminal};
    use estate_core::EntityKind;

    #[test]
    fn test_dashboard_context_and_hints() {
        let state = create_test_state();
        let mut term = TestTerminal::with_size(100, 2);
        term.render_widget(StatusBar::new(&state), term.area());

        assert!(term.buffer_contains("Dashboard · 0 records"));
        assert!(term.buffer_contains("Enter open"));
        assert!(term.buffer_contains("q quit"));
    }

    #[test]
    fn test_page_notice_and_form_hints() {
        let mut state = create_test_state();
        open_page(&mut state, EntityKind::Banner, vec![]);
        let page = state.page_mut(EntityKind::Banner);
        page.focus = PageFocus::Form;
        page.notice = Some(Notice::Error("Title: is required".into()));

        let mut term = TestTerminal::with_size(120, 2);
        term.render_widget(StatusBar::new(&state), term.area());

        assert!(term.buffer_contains("Banners · New banner"));
        assert!(term.buffer_contains("✗ Title: is required"));
        assert!(term.buffer_contains("s save"));
    }

    #[test]
    fn test_pending_uploads_shown_while_held() {
        let mut state = create_test_state();
        open_page(&mut state, EntityKind::Plot, vec![]);
        let plan = state.previews.acquire("plan.png");
        let photo = state.previews.acquire("front.jpg");

        let mut term = TestTerminal::with_size(120, 2);
        term.render_widget(StatusBar::new(&state), term.area());
        assert!(term.buffer_contains("2 pending uploads"));

        drop(plan);
        drop(photo);
        let mut term = TestTerminal::with_size(120, 2);
        term.render_widget(StatusBar::new(&state), term.area());
        assert!(!term.buffer_contains("pending upload"));
    }

    #[test]
    fn test_compact_keeps_notice_drops_context() {
        let mut state = create_test_state();
        open_page(&mut state, EntityKind::Blog, vec![]);
        state.page_mut(EntityKind::Blog).notice = Some(Notice::Info("Deleted".into()));

        let mut term = TestTerminal::compact();
        term.render_widget(StatusBar::new(&state).compact(true), term.area());

        assert!(term.buffer_contains("Deleted"));
        assert!(!term.buffer_contains("Blogs ·"));
        assert!(!term.buffer_contains("refresh"));
    }
}
