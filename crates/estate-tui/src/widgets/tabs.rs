//! Page tabs shown inside the header

use estate_app::{AppState, Page};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

const SEPARATOR: &str = " │ ";

/// One tab per page, numbered for the digit shortcuts
pub struct PageTabs<'a> {
    state: &'a AppState,
}

impl<'a> PageTabs<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn is_dirty(&self, page: Page) -> bool {
        match page {
            Page::Collection(kind) => self.state.page_state(kind).is_some_and(|p| p.dirty),
            _ => false,
        }
    }

    /// Tab label; unselected tabs collapse to their number when `compact`
    fn label(&self, index: usize, page: Page, compact: bool) -> String {
        let marker = if self.is_dirty(page) { "*" } else { "" };
        if compact && page != self.state.page {
            format!("{}{}", index + 1, marker)
        } else {
            format!("{} {}{}", index + 1, page.title(), marker)
        }
    }

    fn line(&self, compact: bool) -> Line<'static> {
        let mut spans = Vec::new();
        for (index, page) in Page::all().into_iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(SEPARATOR, styles::text_muted()));
            }
            let style = if page == self.state.page {
                styles::focused_selected()
            } else {
                styles::text_secondary()
            };
            spans.push(Span::styled(self.label(index, page, compact), style));
        }
        Line::from(spans)
    }
}

impl Widget for PageTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let full = self.line(false);
        let line = if full.width() <= area.width as usize {
            full
        } else {
            self.line(true)
        };
        Paragraph::new(line).render(area, buf);
    }
}
