//! Confirmation dialog widget for quit and delete prompts

use estate_app::confirm_dialog::ConfirmDialogState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::modal_overlay;
use crate::theme::{palette, styles};

const MODAL_WIDTH: u16 = 52;
const MODAL_HEIGHT: u16 = 9;

/// Confirmation dialog widget
pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDialogState,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(state: &'a ConfirmDialogState) -> Self {
        Self { state }
    }

    fn option_buttons(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (index, (label, _)) in self.state.options.iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw("   "));
            }
            let style = if index == self.state.selected {
                styles::focused_selected()
            } else {
                styles::text_secondary()
            };
            spans.push(Span::styled(format!(" {} ", label), style));
        }
        Line::from(spans)
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = modal_overlay::centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area);
        modal_overlay::prepare_modal(buf, area, modal_area);

        let title = format!(" {} ", self.state.title);
        let block = styles::modal_block(&title).title_alignment(Alignment::Center);
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Spacer
            Constraint::Length(2), // Message
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Buttons
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

        Paragraph::new(self.state.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(
                Style::default()
                    .fg(palette::STATUS_YELLOW)
                    .add_modifier(Modifier::BOLD),
            )
            .render(chunks[1], buf);

        Paragraph::new(self.option_buttons())
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        let hints = Line::from(vec![
            Span::styled("←/→", styles::keybinding()),
            Span::styled(" choose  ", styles::text_muted()),
            Span::styled("Enter", styles::keybinding()),
            Span::styled(" confirm  ", styles::text_muted()),
            Span::styled("Esc", styles::keybinding()),
            Span::styled(" cancel", styles::text_muted()),
        ]);
        Paragraph::new(hints)
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use estate_core::EntityKind;

    #[test]
    fn test_quit_dialog_renders_title_message_and_options() {
        let mut term = TestTerminal::new();
        let state = ConfirmDialogState::quit_confirmation(2);

        term.render_widget(ConfirmDialog::new(&state), term.area());

        assert!(term.buffer_contains("Quit Estate Admin?"));
        assert!(term.buffer_contains("2 forms have unsaved changes."));
        assert!(term.buffer_contains(" Quit "));
        assert!(term.buffer_contains(" Cancel "));
    }

    #[test]
    fn test_delete_dialog_names_the_record() {
        let mut term = TestTerminal::new();
        let state = ConfirmDialogState::delete_confirmation(EntityKind::Plot, "p9", "Hill view");

        term.render_widget(ConfirmDialog::new(&state), term.area());

        assert!(term.buffer_contains("Delete plot?"));
        assert!(term.buffer_contains("Hill view"));
        assert!(term.buffer_contains("Esc"));
    }

    #[test]
    fn test_selected_option_is_highlighted() {
        let mut term = TestTerminal::new();
        let mut state = ConfirmDialogState::quit_confirmation(1);
        state.select_by(1);

        term.render_widget(ConfirmDialog::new(&state), term.area());

        let row = term.find_line(" Cancel ").expect("buttons rendered");
        let buffer = term.buffer();
        let x = (0..buffer.area.width)
            .find(|&x| buffer[(x, row)].symbol() == "C")
            .expect("cancel label");
        assert_eq!(buffer[(x, row)].bg, palette::ACCENT);
    }

    #[test]
    fn test_dialog_fits_compact_terminal() {
        let mut term = TestTerminal::compact();
        let state = ConfirmDialogState::quit_confirmation(1);
        term.render_widget(ConfirmDialog::new(&state), term.area());
        assert!(term.buffer_contains("Quit"));
    }
}
