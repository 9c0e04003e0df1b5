//! List refreshes, record loading and deletion

use estate_core::{Entity, EntityKind};
use tracing::{debug, warn};

use crate::confirm_dialog::ConfirmDialogState;
use crate::list_view::ListOwner;
use crate::message::Message;
use crate::page::{Notice, SubmitStatus};
use crate::state::AppState;

use super::{ListFetch, UpdateAction, UpdateResult};

/// Refetch every list showing `kind`
pub fn handle_entity_changed(state: &mut AppState, kind: EntityKind) -> UpdateResult {
    let fetch = state.begin_refresh(kind);
    UpdateResult::action(UpdateAction::FetchLists(vec![fetch]))
}

pub fn handle_refresh_all(state: &mut AppState) -> UpdateResult {
    let fetches = EntityKind::ALL
        .into_iter()
        .map(|kind| state.begin_refresh(kind))
        .collect();
    UpdateResult::action(UpdateAction::FetchLists(fetches))
}

/// First visit of a collection page: create it and load its list
pub fn handle_open_page(state: &mut AppState, kind: EntityKind) -> UpdateResult {
    let generation = state.page_mut(kind).list.begin_refresh();
    UpdateResult::action(UpdateAction::FetchLists(vec![ListFetch {
        kind,
        subscribers: vec![(ListOwner::Page, generation)],
    }]))
}

pub fn handle_list_loaded(
    state: &mut AppState,
    kind: EntityKind,
    owner: ListOwner,
    generation: u64,
    result: Result<Vec<Entity>, String>,
) -> UpdateResult {
    if let Err(message) = &result {
        warn!("Failed to load {} for {:?}: {}", kind, owner, message);
    }
    let list = match owner {
        ListOwner::Page => &mut state.page_mut(kind).list,
        ListOwner::Overview => state.overview.list_mut(kind),
    };
    list.complete(generation, result);
    UpdateResult::none()
}

pub fn handle_select_record(state: &mut AppState, delta: isize) -> UpdateResult {
    if let Some(page) = state.current_page_mut() {
        page.list.select_by(delta);
    }
    UpdateResult::none()
}

/// Fetch the highlighted record; the form is hydrated once it arrives
pub fn handle_edit_selected(state: &mut AppState) -> UpdateResult {
    let Some(page) = state.current_page_mut() else {
        return UpdateResult::none();
    };
    let Some(id) = page.list.selected().map(|entity| entity.id().to_string()) else {
        return UpdateResult::none();
    };
    if id.is_empty() {
        page.notice = Some(Notice::Error("Record has no id".to_string()));
        return UpdateResult::none();
    }

    page.loading_record = Some(id.clone());
    let notice = format!("Loading {} {}…", page.kind.singular(), id);
    page.notice = Some(Notice::Info(notice));
    UpdateResult::action(UpdateAction::FetchRecord {
        kind: page.kind,
        id,
    })
}

pub fn handle_record_loaded(
    state: &mut AppState,
    kind: EntityKind,
    id: String,
    result: Result<Entity, String>,
) -> UpdateResult {
    let page = state.page_mut(kind);
    if page.loading_record.as_deref() != Some(id.as_str()) {
        debug!("Dropping stale {} record {}", kind, id);
        return UpdateResult::none();
    }
    page.loading_record = None;

    match result {
        Ok(entity) => {
            page.load_record(&entity, id);
            if !page.is_saving() {
                page.submit = SubmitStatus::Idle;
                page.notice = None;
            }
        }
        Err(message) => {
            page.notice = Some(Notice::Error(message));
        }
    }
    UpdateResult::none()
}

pub fn handle_request_delete(state: &mut AppState) -> UpdateResult {
    let confirm = state.settings.behavior.confirm_delete;
    let Some(page) = state.current_page_mut() else {
        return UpdateResult::none();
    };
    let Some(entity) = page.list.selected() else {
        return UpdateResult::none();
    };
    let kind = page.kind;
    let id = entity.id().to_string();

    if confirm {
        let dialog = ConfirmDialogState::delete_confirmation(kind, &id, &entity.summary().title);
        state.show_dialog(dialog);
        UpdateResult::none()
    } else {
        UpdateResult::message(Message::ConfirmDelete { kind, id })
    }
}

pub fn handle_confirm_delete(state: &mut AppState, kind: EntityKind, id: String) -> UpdateResult {
    state.close_dialog();
    let page = state.page_mut(kind);
    let notice = format!("Deleting {} {}…", kind.singular(), id);
    page.notice = Some(Notice::Info(notice));
    UpdateResult::action(UpdateAction::Delete { kind, id })
}

/// A successful delete refetches; the list is never spliced locally
pub fn handle_delete_completed(
    state: &mut AppState,
    kind: EntityKind,
    id: String,
    result: Result<(), String>,
) -> UpdateResult {
    let page = state.page_mut(kind);
    match result {
        Ok(()) => {
            if page.editing.as_deref() == Some(id.as_str()) {
                page.reset_form();
            }
            page.notice = Some(Notice::Info(format!("Deleted {} {}", kind.singular(), id)));
            UpdateResult::message(Message::EntityChanged(kind))
        }
        Err(message) => {
            page.notice = Some(Notice::Error(message));
            UpdateResult::none()
        }
    }
}
