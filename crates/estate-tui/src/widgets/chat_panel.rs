//! Assistant chat page

use estate_app::chat::{ChatRole, ChatState, ChatTurn};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::styles;

pub struct ChatPanel<'a> {
    state: &'a ChatState,
}

impl<'a> ChatPanel<'a> {
    pub fn new(state: &'a ChatState) -> Self {
        Self { state }
    }

    fn turn_lines(turn: &ChatTurn, lines: &mut Vec<Line<'static>>) {
        let (speaker, style) = match turn.role {
            ChatRole::User => ("You", styles::accent_bold()),
            ChatRole::Assistant => ("Assistant", styles::status_blue()),
        };
        lines.push(Line::styled(speaker, style));
        for text in turn.text.lines() {
            lines.push(Line::styled(text.to_string(), styles::text_primary()));
        }
        lines.push(Line::default());
    }

    fn transcript(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for turn in &self.state.transcript {
            Self::turn_lines(turn, &mut lines);
        }
        if let Some(prompt) = &self.state.pending {
            Self::turn_lines(
                &ChatTurn {
                    role: ChatRole::User,
                    text: prompt.clone(),
                },
                &mut lines,
            );
            lines.push(Line::styled("Assistant is typing…", styles::text_muted()));
        }
        if let Some(error) = &self.state.error {
            lines.push(Line::styled(format!("✗ {}", error), styles::status_red()));
        }
        if lines.is_empty() {
            lines.push(Line::styled(
                "Ask the assistant about listings, pricing or copy.",
                styles::text_muted(),
            ));
        }
        lines
    }
}

/// Rows `lines` occupy once wrapped to `width`
fn wrapped_height(lines: &[Line<'_>], width: u16) -> usize {
    let width = width.max(1) as usize;
    lines
        .iter()
        .map(|line| {
            let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
            text.width().div_ceil(width).max(1)
        })
        .sum()
}

impl Widget for ChatPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [history_area, input_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(area);

        let block = styles::glass_block(false).title(" Assistant ");
        let inner = block.inner(history_area);
        block.render(history_area, buf);

        // Keep the newest turn in view
        let lines = self.transcript();
        let overflow = wrapped_height(&lines, inner.width).saturating_sub(inner.height as usize);
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((overflow as u16, 0))
            .render(inner, buf);

        let input = Line::from(vec![
            Span::styled("› ", styles::accent()),
            Span::styled(self.state.input.clone(), styles::text_primary()),
            Span::styled("▏", styles::accent()),
        ]);
        let idle = !self.state.is_pending();
        Paragraph::new(input)
            .block(styles::glass_block(idle).title(" Message "))
            .render(input_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_empty_chat_shows_hint_and_input() {
        let state = ChatState {
            input: "hello".into(),
            ..Default::default()
        };
        let mut term = TestTerminal::new();
        term.render_widget(ChatPanel::new(&state), term.area());

        assert!(term.buffer_contains("Ask the assistant"));
        assert!(term.buffer_contains("› hello▏"));
    }

    #[test]
    fn test_transcript_and_pending_prompt() {
        let state = ChatState {
            transcript: vec![
                ChatTurn {
                    role: ChatRole::User,
                    text: "Price of plot 4?".into(),
                },
                ChatTurn {
                    role: ChatRole::Assistant,
                    text: "It is listed at 40 lakh.".into(),
                },
            ],
            pending: Some("And plot 5?".into()),
            ..Default::default()
        };
        let mut term = TestTerminal::new();
        term.render_widget(ChatPanel::new(&state), term.area());

        assert!(term.buffer_contains("Price of plot 4?"));
        assert!(term.buffer_contains("It is listed at 40 lakh."));
        assert!(term.buffer_contains("And plot 5?"));
        assert!(term.buffer_contains("Assistant is typing…"));
    }

    #[test]
    fn test_long_history_scrolls_to_latest() {
        let transcript = (0..20)
            .map(|i| ChatTurn {
                role: ChatRole::User,
                text: format!("question {}", i),
            })
            .collect();
        let state = ChatState {
            transcript,
            ..Default::default()
        };
        let mut term = TestTerminal::new();
        term.render_widget(ChatPanel::new(&state), term.area());

        assert!(term.buffer_contains("question 19"));
        assert!(!term.buffer_contains("question 0 "));
    }

    #[test]
    fn test_wrapped_height() {
        let lines = vec![Line::raw("abcdef"), Line::default()];
        assert_eq!(wrapped_height(&lines, 4), 3);
        assert_eq!(wrapped_height(&lines, 10), 2);
    }
}
