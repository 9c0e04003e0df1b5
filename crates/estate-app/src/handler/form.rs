//! Field editing, row operations and submission

use std::path::PathBuf;

use estate_core::{EntityKind, FieldKind, FieldValue, FileField};
use tracing::{debug, info};

use crate::forms::FieldPath;
use crate::message::Message;
use crate::page::{EditBuffer, Notice, PageFocus, PageState, SubmitStatus};
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

/// Run `f` on the visible collection page, if any
fn with_page(state: &mut AppState, f: impl FnOnce(&mut PageState) -> UpdateResult) -> UpdateResult {
    match state.current_page_mut() {
        Some(page) => f(page),
        None => UpdateResult::none(),
    }
}

pub fn handle_toggle_focus(state: &mut AppState) -> UpdateResult {
    with_page(state, |page| {
        page.edit = None;
        page.focus = match page.focus {
            PageFocus::List => PageFocus::Form,
            PageFocus::Form => PageFocus::List,
        };
        UpdateResult::none()
    })
}

/// Leave edit mode and start a blank record
pub fn handle_new_record(state: &mut AppState) -> UpdateResult {
    with_page(state, |page| {
        page.reset_form();
        page.focus = PageFocus::Form;
        // An earlier save may still be in flight; its completion reports here
        if !page.is_saving() {
            page.submit = SubmitStatus::Idle;
            page.notice = None;
        }
        UpdateResult::none()
    })
}

pub fn handle_select_field(state: &mut AppState, delta: isize) -> UpdateResult {
    with_page(state, |page| {
        page.select_field_by(delta);
        UpdateResult::none()
    })
}

pub fn handle_begin_edit(state: &mut AppState) -> UpdateResult {
    with_page(state, |page| {
        let Some(item) = page.selected_item() else {
            return UpdateResult::none();
        };
        match (item.kind, item.value) {
            (FieldKind::Flag, FieldValue::Flag(flag)) => {
                if page.form.apply(&item.path, FieldValue::Flag(!flag)) {
                    page.dirty = true;
                }
            }
            (FieldKind::File, _) => {
                page.edit = Some(EditBuffer {
                    path: item.path,
                    kind: FieldKind::File,
                    text: String::new(),
                });
            }
            (kind, value) => {
                page.edit = Some(EditBuffer {
                    path: item.path,
                    kind,
                    text: value.as_text().unwrap_or_default().to_string(),
                });
            }
        }
        UpdateResult::none()
    })
}

pub fn handle_edit_input(state: &mut AppState, c: char) -> UpdateResult {
    with_page(state, |page| {
        if let Some(edit) = page.edit.as_mut() {
            edit.text.push(c);
        }
        UpdateResult::none()
    })
}

pub fn handle_edit_backspace(state: &mut AppState) -> UpdateResult {
    with_page(state, |page| {
        if let Some(edit) = page.edit.as_mut() {
            edit.text.pop();
        }
        UpdateResult::none()
    })
}

/// Store the edit buffer; for file fields the buffer is a local path to read
pub fn handle_commit_edit(state: &mut AppState) -> UpdateResult {
    let max_bytes = state.settings.max_file_size();
    with_page(state, |page| {
        let Some(edit) = page.edit.take() else {
            return UpdateResult::none();
        };

        if edit.kind == FieldKind::File {
            let path = edit.text.trim();
            if path.is_empty() {
                return UpdateResult::none();
            }
            let path = expand_home(path);
            page.notice = Some(Notice::Info(format!("Reading {}…", path.display())));
            return UpdateResult::action(UpdateAction::LoadFile {
                kind: page.kind,
                field: edit.path,
                path,
                max_bytes,
            });
        }

        if page.form.apply(&edit.path, FieldValue::Text(edit.text)) {
            page.dirty = true;
        }
        UpdateResult::none()
    })
}

pub fn handle_cancel_edit(state: &mut AppState) -> UpdateResult {
    with_page(state, |page| {
        page.edit = None;
        UpdateResult::none()
    })
}

pub fn handle_clear_file(state: &mut AppState) -> UpdateResult {
    with_page(state, |page| {
        if let Some(item) = page.selected_item() {
            let empty = FieldValue::File(FileField::Empty);
            if item.kind == FieldKind::File && page.form.apply(&item.path, empty) {
                page.dirty = true;
            }
        }
        UpdateResult::none()
    })
}

/// Append a row next to the highlighted one and move the cursor into it
pub fn handle_add_row(state: &mut AppState) -> UpdateResult {
    with_page(state, |page| {
        let Some((collection, _)) = page.selected_item().and_then(|item| item.path.row()) else {
            page.notice = Some(Notice::Info(
                "Select a field inside a row to add another row".to_string(),
            ));
            return UpdateResult::none();
        };
        if let Some(added) = page.form.append_row(collection) {
            page.dirty = true;
            page.select_field_where(|path| path.row().map(|(_, row)| row) == Some(added));
        }
        UpdateResult::none()
    })
}

pub fn handle_remove_row(state: &mut AppState) -> UpdateResult {
    with_page(state, |page| {
        let Some((collection, row)) = page.selected_item().and_then(|item| item.path.row()) else {
            return UpdateResult::none();
        };
        if page.form.remove_row(collection, row) {
            page.dirty = true;
            page.clamp_selection();
        }
        UpdateResult::none()
    })
}

/// Reorder a row; the cursor stays on the same field since row ids are stable
pub fn handle_move_row(state: &mut AppState, offset: isize) -> UpdateResult {
    with_page(state, |page| {
        let Some(path) = page.selected_item().map(|item| item.path) else {
            return UpdateResult::none();
        };
        let Some((collection, row)) = path.row() else {
            return UpdateResult::none();
        };
        if page.form.move_row(collection, row, offset) {
            page.dirty = true;
            page.select_field_where(|p| *p == path);
        }
        UpdateResult::none()
    })
}

pub fn handle_file_loaded(
    state: &mut AppState,
    kind: EntityKind,
    field: FieldPath,
    path: PathBuf,
    result: Result<FileField, String>,
) -> UpdateResult {
    let page = state.page_mut(kind);
    match result {
        Ok(file) => {
            if page.form.apply(&field, FieldValue::File(file)) {
                page.dirty = true;
                page.notice = Some(Notice::Info(format!("Attached {}", path.display())));
            } else {
                debug!("Field {:?} is gone, dropping {}", field, path.display());
            }
        }
        Err(message) => {
            page.notice = Some(Notice::Error(message));
        }
    }
    UpdateResult::none()
}

// ─────────────────────────────────────────────────────────────────────────────
// Submission
// ─────────────────────────────────────────────────────────────────────────────

/// Validate and send the visible form; ignored while a save is in flight
pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    let options = state.settings.payload_options();
    with_page(state, |page| {
        if page.is_saving() {
            debug!("Ignoring submit on {}: save in flight", page.kind);
            return UpdateResult::none();
        }
        page.edit = None;

        if let Err(e) = page.form.validate() {
            let message = e.user_message();
            page.submit = SubmitStatus::Failed(message.clone());
            page.notice = Some(Notice::Error(message));
            return UpdateResult::none();
        }

        page.submit = SubmitStatus::Saving;
        page.notice = Some(Notice::Info("Saving…".to_string()));
        UpdateResult::action(UpdateAction::Submit {
            kind: page.kind,
            id: page.editing.clone(),
            generation: page.form_generation,
            payload: page.form.to_payload(options),
        })
    })
}

/// Success resets the form and announces the change; failure leaves it intact
///
/// A completion for a form the user has since replaced only posts a notice.
pub fn handle_submit_completed(
    state: &mut AppState,
    kind: EntityKind,
    generation: u64,
    result: Result<(), String>,
) -> UpdateResult {
    let page = state.page_mut(kind);
    let current = page.form_generation == generation;
    match result {
        Ok(()) => {
            let notice = match (&page.editing, current) {
                (Some(id), true) => format!("Saved {} {}", kind.singular(), id),
                (None, true) => format!("Created {}", kind.singular()),
                (_, false) => format!("Earlier {} saved", kind.singular()),
            };
            info!("{}", notice);
            if current {
                page.reset_form();
            }
            page.submit = SubmitStatus::Idle;
            page.notice = Some(Notice::Info(notice));
            UpdateResult::message(Message::EntityChanged(kind))
        }
        Err(message) if current => {
            page.submit = SubmitStatus::Failed(message.clone());
            page.notice = Some(Notice::Error(message));
            UpdateResult::none()
        }
        Err(message) => {
            page.submit = SubmitStatus::Idle;
            page.notice = Some(Notice::Error(format!(
                "Earlier {} not saved: {}",
                kind.singular(),
                message
            )));
            UpdateResult::none()
        }
    }
}

/// `~/photos/a.jpg` → `$HOME/photos/a.jpg`
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
