//! Dashboard overview: one row per collection

use estate_app::list_view::ListView;
use estate_app::overview::Overview;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

use crate::theme::styles;

pub struct OverviewTable<'a> {
    overview: &'a Overview,
}

impl<'a> OverviewTable<'a> {
    pub fn new(overview: &'a Overview) -> Self {
        Self { overview }
    }

    fn row(list: &ListView) -> Row<'static> {
        let (icon, label, style) = styles::list_status_indicator(list.status());
        let count = match list.count() {
            Some(count) => count.to_string(),
            None => label.to_string(),
        };
        let latest = list
            .records()
            .first()
            .map(|entity| entity.summary().title)
            .unwrap_or_default();
        Row::new(vec![
            Cell::from(Span::styled(icon, style)),
            Cell::from(list.kind().title()),
            Cell::from(Span::styled(count, style)),
            Cell::from(Span::styled(latest, styles::text_muted())),
        ])
    }

    fn summary_line(&self) -> Line<'static> {
        let failed = self.overview.failed();
        let mut spans = vec![Span::styled(
            format!(" {} records in total", self.overview.total_records()),
            styles::text_secondary(),
        )];
        if !failed.is_empty() {
            let names: Vec<&str> = failed.iter().map(|kind| kind.title()).collect();
            spans.push(Span::styled(
                format!("  ·  failed to load: {}", names.join(", ")),
                styles::status_red(),
            ));
        }
        Line::from(spans)
    }
}

impl Widget for OverviewTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true).title(" Overview ");
        let inner = block.inner(area);
        block.render(area, buf);

        let [table_area, _, summary_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let header =
            Row::new(vec!["", "Collection", "Records", "Latest"]).style(styles::accent_bold());
        let table = Table::new(
            self.overview.lists().map(Self::row),
            [
                Constraint::Length(2),
                Constraint::Length(14),
                Constraint::Length(11),
                Constraint::Fill(1),
            ],
        )
        .header(header)
        .row_highlight_style(styles::focused_selected());

        let mut state = TableState::default().with_selected(Some(self.overview.selected_index()));
        StatefulWidget::render(table, table_area, buf, &mut state);

        Paragraph::new(self.summary_line()).render(summary_area, buf);
    }
}
