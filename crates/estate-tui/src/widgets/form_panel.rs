//! Form panel: every field of the record being created or edited
//!
//! Fields are grouped under their section headings (one section per
//! sub-collection row). The selected field is highlighted; while a field is
//! being edited its buffer is shown in place of the stored value.

use estate_app::forms::FormItem;
use estate_app::page::{EditBuffer, PageState, SubmitStatus};
use estate_core::{FieldKind, FieldValue, FileField};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{palette, styles};

const CURSOR: &str = "▏";

/// Width the labels are padded to, so values line up
const LABEL_WIDTH: usize = 18;

pub struct FormPanel<'a> {
    page: &'a PageState,
    focused: bool,
    show_row_ids: bool,
}

impl<'a> FormPanel<'a> {
    pub fn new(page: &'a PageState) -> Self {
        Self {
            page,
            focused: false,
            show_row_ids: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn show_row_ids(mut self, show: bool) -> Self {
        self.show_row_ids = show;
        self
    }

    fn title(&self) -> String {
        let dirty = if self.page.dirty { " *" } else { "" };
        format!(" {}{} ", self.page.mode_label(), dirty)
    }

    /// Form lines and the index of the selected field's line
    fn lines(&self) -> (Vec<Line<'static>>, usize) {
        let items = self.page.form.items();
        let mut lines = Vec::with_capacity(items.len() * 2);
        let mut selected_line = 0;
        let mut section: Option<&str> = None;

        if let Some(id) = &self.page.loading_record {
            lines.push(Line::styled(
                format!("Loading record {}…", id),
                styles::status_yellow(),
            ));
        }

        for (index, item) in items.iter().enumerate() {
            if section != Some(item.section.as_str()) {
                if section.is_some() {
                    lines.push(Line::default());
                }
                lines.push(self.heading(item));
                section = Some(item.section.as_str());
            }
            if index == self.page.selected_field {
                selected_line = lines.len();
            }
            lines.push(self.field_line(item, index == self.page.selected_field));
        }

        (lines, selected_line)
    }

    fn heading(&self, item: &FormItem) -> Line<'static> {
        let mut spans = vec![Span::styled(
            format!("▸ {}", item.section),
            Style::default()
                .fg(palette::SECTION_HEADING)
                .add_modifier(Modifier::BOLD),
        )];
        if self.show_row_ids {
            if let Some((_, row)) = item.path.row() {
                spans.push(Span::styled(format!("  #{}", row), styles::text_muted()));
            }
        }
        Line::from(spans)
    }

    fn field_line(&self, item: &FormItem, selected: bool) -> Line<'static> {
        let marker = if selected { "› " } else { "  " };
        let required = if item.required { "*" } else { "" };
        let label = format!("{}{}{}", marker, item.label, required);
        let padding = LABEL_WIDTH.saturating_sub(label.width());
        let label_style = if selected && self.focused {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        };

        let mut spans = vec![
            Span::styled(label, label_style),
            Span::raw(" ".repeat(padding + 1)),
        ];

        match self.page.edit.as_ref().filter(|e| e.path == item.path) {
            Some(edit) => spans.extend(edit_spans(edit)),
            None => spans.push(value_span(item)),
        }

        let line = Line::from(spans);
        if selected && self.focused && self.page.edit.is_none() {
            line.style(styles::focused_selected())
        } else {
            line
        }
    }

    fn status_line(&self) -> Line<'static> {
        match &self.page.submit {
            SubmitStatus::Saving => Line::styled("Saving…", styles::status_yellow()),
            SubmitStatus::Failed(message) => {
                Line::styled(format!("✗ {}", message), styles::status_red())
            }
            SubmitStatus::Idle => match &self.page.edit {
                Some(edit) if edit.kind == FieldKind::File => {
                    hint_line(&[("Enter", "attach file"), ("Esc", "cancel")])
                }
                Some(edit) if edit.kind == FieldKind::Multiline => hint_line(&[
                    ("Enter", "done"),
                    ("Ctrl-J", "new line"),
                    ("Esc", "cancel"),
                ]),
                Some(_) => hint_line(&[("Enter", "done"), ("Esc", "cancel")]),
                None if self.page.dirty => {
                    Line::styled("Unsaved changes, press s to save", styles::status_yellow())
                }
                None => Line::default(),
            },
        }
    }
}

fn hint_line(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(*key, styles::keybinding()));
        spans.push(Span::styled(format!(" {}  ", action), styles::text_muted()));
    }
    Line::from(spans)
}

fn edit_spans(edit: &EditBuffer) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    if edit.kind == FieldKind::File {
        spans.push(Span::styled("path: ", styles::text_muted()));
    }
    spans.push(Span::styled(single_line(&edit.text), styles::accent()));
    spans.push(Span::styled(CURSOR, styles::accent()));
    spans
}

fn value_span(item: &FormItem) -> Span<'static> {
    match &item.value {
        FieldValue::Text(text) if text.trim().is_empty() => {
            if item.required {
                Span::styled("(required)", Style::default().fg(palette::FIELD_REQUIRED))
            } else {
                Span::styled("(empty)", styles::text_muted())
            }
        }
        FieldValue::Text(text) => Span::styled(single_line(text), styles::text_primary()),
        FieldValue::Flag(true) => Span::styled("[x]", styles::status_green()),
        FieldValue::Flag(false) => Span::styled("[ ]", styles::text_muted()),
        FieldValue::File(FileField::Empty) => Span::styled("(no file)", styles::text_muted()),
        FieldValue::File(file @ FileField::Pending(_)) => Span::styled(
            file.label(),
            Style::default().fg(palette::FIELD_PENDING_FILE),
        ),
        FieldValue::File(file) => Span::styled(file.label(), styles::text_primary()),
    }
}

/// Multi-line values are shown on one line with visible breaks
fn single_line(text: &str) -> String {
    text.replace('\n', " ⏎ ")
}

/// First line to draw so that `selected` stays inside `height` lines
fn scroll_offset(selected: usize, height: u16) -> u16 {
    let height = height as usize;
    if height == 0 || selected < height {
        0
    } else {
        (selected + 1 - height) as u16
    }
}

impl Widget for FormPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused).title(self.title());
        let inner = block.inner(area);
        block.render(area, buf);

        let [body, status] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let (lines, selected_line) = self.lines();
        Paragraph::new(lines)
            .scroll((scroll_offset(selected_line, body.height), 0))
            .render(body, buf);
        Paragraph::new(self.status_line()).render(status, buf);
    }
}
