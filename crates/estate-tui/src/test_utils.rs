//! Test utilities for TUI rendering verification
//!
//! Widgets and full frames are rendered into ratatui's `TestBackend` and
//! asserted on as plain text.
//!
//! # Example
//!
//! ```ignore
//! let mut term = TestTerminal::new();
//! term.render_widget(StatusBar::new(&state), term.area());
//! assert!(term.buffer_contains("Dashboard"));
//! ```

use estate_app::config::Settings;
use estate_app::handler::update;
use estate_app::list_view::ListOwner;
use estate_app::{AppState, Message, Page};
use estate_core::entity::Testimonial;
use estate_core::{Entity, EntityKind};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;
use ratatui::Terminal;

/// Standard test terminal size (matches common terminal dimensions)
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

/// Compact terminal for testing responsive layouts
pub const COMPACT_WIDTH: u16 = 40;
pub const COMPACT_HEIGHT: u16 = 12;

/// Test utility wrapper around ratatui's TestBackend terminal.
pub struct TestTerminal {
    /// The underlying ratatui terminal with TestBackend.
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    /// Create a new test terminal with standard dimensions (80x24)
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    /// Create a new test terminal with compact dimensions (40x12)
    pub fn compact() -> Self {
        Self::with_size(COMPACT_WIDTH, COMPACT_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    /// Get the full terminal area
    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame, e.g. `term.draw_with(|frame| view(frame, &state))`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Check if the buffer contains a string anywhere on one line
    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    /// Check if a specific line contains text
    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        get_line_content(self.buffer(), line).contains(text)
    }

    /// Row of the first line containing `text`
    pub fn find_line(&self, text: &str) -> Option<u16> {
        (0..self.buffer().area.height).find(|&y| self.line_contains(y, text))
    }

    /// Get all content as a string (for debugging)
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        result.push_str(&get_line_content(buffer, y));
        result.push('\n');
    }
    result
}

fn get_line_content(buffer: &Buffer, line: u16) -> String {
    let mut result = String::new();
    if line < buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, line)].symbol());
        }
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// State fixtures
// ─────────────────────────────────────────────────────────────────────────────

/// Logged-in state on the dashboard
pub fn create_test_state() -> AppState {
    AppState::new(Settings::default(), true)
}

pub fn testimonial(id: &str, name: &str) -> Entity {
    Entity::Testimonial(Testimonial {
        id: id.to_string(),
        name: name.to_string(),
        designation: "Home owner".to_string(),
        message: "Smooth purchase".to_string(),
        rating: Some(5),
        ..Default::default()
    })
}

/// Show a collection page whose first fetch returned `records`
pub fn open_page(state: &mut AppState, kind: EntityKind, records: Vec<Entity>) {
    update(state, Message::ShowPage(Page::Collection(kind)));
    let generation = state.page_mut(kind).list.generation();
    update(
        state,
        Message::ListLoaded {
            kind,
            owner: ListOwner::Page,
            generation,
            result: Ok(records),
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_sizes() {
        assert_eq!(
            TestTerminal::new().area(),
            Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT)
        );
        assert_eq!(
            TestTerminal::compact().area(),
            Rect::new(0, 0, COMPACT_WIDTH, COMPACT_HEIGHT)
        );
    }

    #[test]
    fn test_buffer_contains_and_find_line() {
        use ratatui::widgets::Paragraph;

        let mut term = TestTerminal::with_size(20, 5);
        term.render_widget(Paragraph::new("one\ntwo"), term.area());

        assert!(term.buffer_contains("two"));
        assert!(!term.buffer_contains("three"));
        assert_eq!(term.find_line("two"), Some(1));
    }

    #[test]
    fn test_open_page_fixture_loads_records() {
        let mut state = create_test_state();
        open_page(
            &mut state,
            EntityKind::Testimonial,
            vec![testimonial("t1", "Asha")],
        );
        let page = state
            .page_state(EntityKind::Testimonial)
            .expect("page opened");
        assert_eq!(page.list.records().len(), 1);
    }
}
