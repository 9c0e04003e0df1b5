//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::page::Page;
use crate::state::{AppPhase, AppState, UiMode};

use super::{chat, form, keys::handle_key, list, session, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::RequestQuit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::ConfirmQuit => {
            state.confirm_quit();
            UpdateResult::none()
        }

        Message::CancelQuit => {
            state.cancel_quit();
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => UpdateResult::none(),

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::ShowPage(page) => show_page(state, page),
        Message::NextPage => {
            let page = state.page.cycle(1);
            show_page(state, page)
        }
        Message::PreviousPage => {
            let page = state.page.cycle(-1);
            show_page(state, page)
        }

        // ─────────────────────────────────────────────────────────
        // Lists
        // ─────────────────────────────────────────────────────────
        Message::EntityChanged(kind) => list::handle_entity_changed(state, kind),
        Message::RefreshAll => list::handle_refresh_all(state),
        Message::ListLoaded {
            kind,
            owner,
            generation,
            result,
        } => list::handle_list_loaded(state, kind, owner, generation, result),
        Message::SelectRecord(delta) => list::handle_select_record(state, delta),
        Message::SelectOverview(delta) => {
            state.overview.select_by(delta);
            UpdateResult::none()
        }
        Message::ToggleFocus => form::handle_toggle_focus(state),

        // ─────────────────────────────────────────────────────────
        // Create / edit / delete
        // ─────────────────────────────────────────────────────────
        Message::NewRecord => form::handle_new_record(state),
        Message::EditSelected => list::handle_edit_selected(state),
        Message::RecordLoaded { kind, id, result } => {
            list::handle_record_loaded(state, kind, id, result)
        }
        Message::RequestDelete => list::handle_request_delete(state),
        Message::ConfirmDelete { kind, id } => list::handle_confirm_delete(state, kind, id),
        Message::DeleteCompleted { kind, id, result } => {
            list::handle_delete_completed(state, kind, id, result)
        }
        Message::Submit => form::handle_submit(state),
        Message::SubmitCompleted {
            kind,
            generation,
            result,
        } => form::handle_submit_completed(state, kind, generation, result),

        // ─────────────────────────────────────────────────────────
        // Form editing
        // ─────────────────────────────────────────────────────────
        Message::SelectField(delta) => form::handle_select_field(state, delta),
        Message::BeginEdit => form::handle_begin_edit(state),
        Message::EditInput(c) => form::handle_edit_input(state, c),
        Message::EditBackspace => form::handle_edit_backspace(state),
        Message::CommitEdit => form::handle_commit_edit(state),
        Message::CancelEdit => form::handle_cancel_edit(state),
        Message::ClearFile => form::handle_clear_file(state),
        Message::AddRow => form::handle_add_row(state),
        Message::RemoveRow => form::handle_remove_row(state),
        Message::MoveRow(offset) => form::handle_move_row(state, offset),
        Message::FileLoaded {
            kind,
            field,
            path,
            result,
        } => form::handle_file_loaded(state, kind, field, path, result),

        // ─────────────────────────────────────────────────────────
        // Confirm dialog
        // ─────────────────────────────────────────────────────────
        Message::DialogSelect(delta) => {
            if let Some(dialog) = state.confirm_dialog_state.as_mut() {
                dialog.select_by(delta);
            }
            UpdateResult::none()
        }
        Message::DialogConfirm => match state
            .confirm_dialog_state
            .as_ref()
            .and_then(|dialog| dialog.selected_message())
        {
            Some(msg) => UpdateResult::message(msg),
            None => {
                state.close_dialog();
                UpdateResult::none()
            }
        },
        Message::CancelDialog => {
            state.close_dialog();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Session
        // ─────────────────────────────────────────────────────────
        Message::LoginInput(c) => {
            state.login.input(c);
            UpdateResult::none()
        }
        Message::LoginBackspace => {
            state.login.backspace();
            UpdateResult::none()
        }
        Message::LoginNextField => {
            state.login.next_field();
            UpdateResult::none()
        }
        Message::SubmitLogin => session::handle_submit_login(state),
        Message::LoginCompleted(result) => session::handle_login_completed(state, result),
        Message::Logout => session::handle_logout(state),
        Message::SessionExpired => session::handle_session_expired(state),

        // ─────────────────────────────────────────────────────────
        // Chat
        // ─────────────────────────────────────────────────────────
        Message::ChatInput(c) => {
            state.chat.input.push(c);
            UpdateResult::none()
        }
        Message::ChatBackspace => {
            state.chat.input.pop();
            UpdateResult::none()
        }
        Message::SendChat => chat::handle_send(state),
        Message::ChatReply(result) => chat::handle_reply(state, result),
    }
}

/// Switch pages; a collection page fetches its list the first time it opens
fn show_page(state: &mut AppState, page: Page) -> UpdateResult {
    if state.ui_mode != UiMode::Normal {
        return UpdateResult::none();
    }
    state.page = page;
    match page {
        Page::Collection(kind) if state.page_state(kind).is_none() => {
            list::handle_open_page(state, kind)
        }
        _ => UpdateResult::none(),
    }
}
