//! Main render/view function (View in TEA pattern)


use estate_app::page::PageFocus;
use estate_app::{AppState, Page, UiMode};
use estate_core::EntityKind;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use super::{layout, widgets};
use crate::theme::palette;

/// Render the complete UI (View function in TEA)
///
/// Pure with respect to `state`: everything drawn is derived from it.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);
    frame.render_widget(widgets::MainHeader::new(state), areas.header);

    if state.ui_mode == UiMode::Login {
        frame.render_widget(
            widgets::LoginForm::new(&state.login, &state.settings.api.base_url),
            areas.body,
        );
        return;
    }

    match state.page {
        Page::Dashboard => {
            frame.render_widget(widgets::OverviewTable::new(&state.overview), areas.body)
        }
        Page::Collection(kind) => render_collection(frame, state, kind, areas.body),
        Page::Chat => frame.render_widget(widgets::ChatPanel::new(&state.chat), areas.body),
    }

    frame.render_widget(
        widgets::StatusBar::new(state).compact(layout::use_compact_status(area)),
        areas.status,
    );

    // Dialog goes last so it covers everything else
    if state.ui_mode == UiMode::ConfirmDialog {
        if let Some(dialog) = &state.confirm_dialog_state {
            frame.render_widget(widgets::ConfirmDialog::new(dialog), area);
        }
    }
}

/// Record list beside (or above) the form panel
fn render_collection(frame: &mut Frame, state: &AppState, kind: EntityKind, area: Rect) {
    let Some(page) = state.page_state(kind) else {
        return;
    };
    let areas = layout::split_page(area);
    let normal = state.ui_mode == UiMode::Normal;

    frame.render_widget(
        widgets::RecordList::new(&page.list)
            .focused(normal && page.focus == PageFocus::List)
            .editing(page.editing.as_deref()),
        areas.list,
    );
    frame.render_widget(
        widgets::FormPanel::new(page)
            .focused(normal && page.focus == PageFocus::Form)
            .show_row_ids(state.settings.ui.show_row_ids),
        areas.form,
    );
}
