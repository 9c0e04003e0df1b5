//! Login screen

use estate_app::login::{LoginField, LoginState};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::modal_overlay;
use crate::theme::styles;

const BOX_WIDTH: u16 = 56;
const BOX_HEIGHT: u16 = 12;

/// Centered sign-in box for the configured server
pub struct LoginForm<'a> {
    state: &'a LoginState,
    server: &'a str,
}

impl<'a> LoginForm<'a> {
    pub fn new(state: &'a LoginState, server: &'a str) -> Self {
        Self { state, server }
    }

    fn field(&self, label: &'static str, value: String, field: LoginField) -> Line<'static> {
        let focused = self.state.focus == field && !self.state.pending;
        let mut spans = vec![
            Span::styled(
                format!("{:<10}", label),
                if focused {
                    styles::accent_bold()
                } else {
                    styles::text_secondary()
                },
            ),
            Span::styled(value, styles::text_primary()),
        ];
        if focused {
            spans.push(Span::styled("▏", styles::accent()));
        }
        Line::from(spans)
    }

    fn status(&self) -> Line<'static> {
        if self.state.pending {
            Line::styled("Signing in…", styles::status_yellow())
        } else if let Some(error) = &self.state.error {
            Line::styled(error.clone(), styles::status_red())
        } else {
            Line::default()
        }
    }
}

impl Widget for LoginForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let box_area = modal_overlay::centered_rect(BOX_WIDTH, BOX_HEIGHT, area);
        let block = styles::glass_block(true)
            .title(" Sign in ")
            .title_alignment(Alignment::Center);
        let inner = block.inner(box_area);
        block.render(box_area, buf);

        let [server, _, email, password, _, status, _, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(Line::from(vec![
            Span::styled("Server    ", styles::text_muted()),
            Span::styled(self.server.to_string(), styles::text_secondary()),
        ]))
        .render(server, buf);

        self.field("Email", self.state.email.clone(), LoginField::Email)
            .render(email, buf);
        let masked = self.state.masked_password();
        self.field("Password", masked, LoginField::Password)
            .render(password, buf);

        Paragraph::new(self.status())
            .wrap(Wrap { trim: true })
            .render(status, buf);

        Paragraph::new(Line::from(vec![
            Span::styled("Tab", styles::keybinding()),
            Span::styled(" switch field  ", styles::text_muted()),
            Span::styled("Enter", styles::keybinding()),
            Span::styled(" sign in  ", styles::text_muted()),
            Span::styled("Esc", styles::keybinding()),
            Span::styled(" quit", styles::text_muted()),
        ]))
        .alignment(Alignment::Center)
        .render(hints, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_password_is_masked() {
        let state = LoginState {
            email: "admin@example.com".into(),
            password: "hunter2".into(),
            focus: LoginField::Password,
            ..Default::default()
        };
        let mut term = TestTerminal::new();
        let form = LoginForm::new(&state, "http://localhost:5000/api/");
        term.render_widget(form, term.area());

        assert!(term.buffer_contains("admin@example.com"));
        assert!(term.buffer_contains("•••••••"));
        assert!(!term.buffer_contains("hunter2"));
        assert!(term.buffer_contains("http://localhost:5000/api/"));
    }

    #[test]
    fn test_error_and_pending_states() {
        let mut state = LoginState {
            error: Some("Invalid credentials".into()),
            ..Default::default()
        };
        let mut term = TestTerminal::new();
        term.render_widget(LoginForm::new(&state, "srv"), term.area());
        assert!(term.buffer_contains("Invalid credentials"));

        state.error = None;
        state.pending = true;
        term.render_widget(LoginForm::new(&state, "srv"), term.area());
        assert!(term.buffer_contains("Signing in…"));
    }
}
