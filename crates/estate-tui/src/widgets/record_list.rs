//! Record list panel of a collection page

use estate_app::list_view::{ListStatus, ListView};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::theme::styles;

/// Fetched records of one collection, one line each
pub struct RecordList<'a> {
    list: &'a ListView,
    focused: bool,
    /// Id of the record open in the form, marked in the list
    editing: Option<&'a str>,
}

impl<'a> RecordList<'a> {
    pub fn new(list: &'a ListView) -> Self {
        Self {
            list,
            focused: false,
            editing: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn editing(mut self, id: Option<&'a str>) -> Self {
        self.editing = id;
        self
    }

    fn title(&self) -> Line<'static> {
        let (icon, label, style) = styles::list_status_indicator(self.list.status());
        let detail = match self.list.count() {
            Some(count) if label.is_empty() => count.to_string(),
            _ => label.to_string(),
        };
        Line::from(vec![
            Span::raw(" "),
            Span::styled(icon, style),
            Span::raw(format!(" {} ", self.list.kind().title())),
            Span::styled(format!("({}) ", detail), styles::text_muted()),
        ])
    }

    fn items(&self) -> Vec<ListItem<'static>> {
        self.list
            .records()
            .iter()
            .map(|entity| {
                let summary = entity.summary();
                let title = if summary.title.trim().is_empty() {
                    entity.id().to_string()
                } else {
                    summary.title
                };
                let marker = if self.editing == Some(entity.id()) {
                    Span::styled("✎ ", styles::accent())
                } else {
                    Span::raw("  ")
                };
                let mut spans = vec![marker, Span::styled(title, styles::text_primary())];
                if !summary.detail.is_empty() {
                    spans.push(Span::styled(
                        format!("  {}", summary.detail),
                        styles::text_muted(),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect()
    }

    /// Message shown in place of the list, if any
    fn placeholder(&self) -> Option<Vec<Line<'static>>> {
        match self.list.status() {
            ListStatus::Errored(message) => Some(vec![
                Line::styled(message.clone(), styles::status_red()),
                Line::styled("Press r to retry", styles::text_muted()),
            ]),
            ListStatus::Idle => Some(vec![Line::styled("Not loaded yet", styles::text_muted())]),
            ListStatus::Loading if self.list.records().is_empty() => {
                Some(vec![Line::styled("Loading…", styles::status_yellow())])
            }
            ListStatus::Loaded if self.list.records().is_empty() => Some(vec![Line::styled(
                "No records yet. Press n to add one.",
                styles::text_muted(),
            )]),
            _ => None,
        }
    }
}

impl Widget for RecordList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(self.focused).title(self.title());

        if let Some(lines) = self.placeholder() {
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(block)
                .render(area, buf);
            return;
        }

        let highlight = if self.focused {
            styles::focused_selected()
        } else {
            styles::unfocused_selected()
        };
        let list = List::new(self.items())
            .block(block)
            .highlight_style(highlight);
        let mut state = ListState::default().with_selected(Some(self.list.selected_index()));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{testimonial, TestTerminal};
    use estate_core::EntityKind;

    fn loaded(records: Vec<estate_core::Entity>) -> ListView {
        let mut list = ListView::new(EntityKind::Testimonial);
        let generation = list.begin_refresh();
        list.complete(generation, Ok(records));
        list
    }

    #[test]
    fn test_lists_records_with_count() {
        let list = loaded(vec![testimonial("t1", "Asha"), testimonial("t2", "Ravi")]);
        let mut term = TestTerminal::new();
        term.render_widget(RecordList::new(&list), term.area());

        assert!(term.buffer_contains("Testimonials (2)"));
        assert!(term.buffer_contains("Asha"));
        assert!(term.buffer_contains("Ravi"));
        assert!(term.buffer_contains("Home owner"));
    }

    #[test]
    fn test_empty_collection_hint() {
        let list = loaded(vec![]);
        let mut term = TestTerminal::new();
        term.render_widget(RecordList::new(&list), term.area());

        assert!(term.buffer_contains("No records yet"));
    }

    #[test]
    fn test_error_replaces_records() {
        let mut list = ListView::new(EntityKind::Testimonial);
        let generation = list.begin_refresh();
        list.complete(generation, Err("Server responded 500: boom".into()));
        let mut term = TestTerminal::new();
        term.render_widget(RecordList::new(&list), term.area());

        assert!(term.buffer_contains("Failed"));
        assert!(term.buffer_contains("Server responded 500: boom"));
        assert!(term.buffer_contains("Press r to retry"));
    }

    #[test]
    fn test_refresh_keeps_showing_previous_records() {
        let mut list = loaded(vec![testimonial("t1", "Asha")]);
        list.begin_refresh();
        let mut term = TestTerminal::new();
        term.render_widget(RecordList::new(&list), term.area());

        assert!(term.buffer_contains("Loading"));
        assert!(term.buffer_contains("Asha"));
    }

    #[test]
    fn test_record_being_edited_is_marked() {
        let list = loaded(vec![testimonial("t1", "Asha"), testimonial("t2", "Ravi")]);
        let mut term = TestTerminal::new();
        term.render_widget(
            RecordList::new(&list).focused(true).editing(Some("t2")),
            term.area(),
        );

        let row = term.find_line("Ravi").expect("row rendered");
        assert!(term.line_contains(row, "✎"));
        let other = term.find_line("Asha").expect("row");
        assert!(!term.line_contains(other, "✎"));
    }
}
