//! Key event handlers for different UI modes

use estate_core::{EntityKind, FieldKind};

use crate::input_key::InputKey;
use crate::login::LoginField;
use crate::message::Message;
use crate::page::{Page, PageFocus, PageState};
use crate::state::{AppState, UiMode};

/// Rows skipped by PageUp / PageDown
const PAGE_STEP: isize = 10;

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    match state.ui_mode {
        UiMode::Login => handle_key_login(state, key),
        UiMode::ConfirmDialog => handle_key_confirm_dialog(state, key),
        UiMode::Normal => handle_key_normal(state, key),
    }
}

fn handle_key_login(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('c') | InputKey::Esc => Some(Message::Quit),
        InputKey::Tab | InputKey::BackTab | InputKey::Up | InputKey::Down => {
            Some(Message::LoginNextField)
        }
        // Enter on the email field moves on instead of submitting half a form
        InputKey::Enter
            if state.login.focus == LoginField::Email && state.login.password.is_empty() =>
        {
            Some(Message::LoginNextField)
        }
        InputKey::Enter => Some(Message::SubmitLogin),
        InputKey::Backspace => Some(Message::LoginBackspace),
        key => key.typed_char().map(Message::LoginInput),
    }
}

fn handle_key_confirm_dialog(state: &AppState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Left | InputKey::Char('h') | InputKey::BackTab => Some(Message::DialogSelect(-1)),
        InputKey::Right | InputKey::Char('l') | InputKey::Tab => Some(Message::DialogSelect(1)),
        InputKey::Enter => Some(Message::DialogConfirm),
        // 'y' picks the first (affirmative) option directly
        InputKey::Char('y' | 'Y') => state
            .confirm_dialog_state
            .as_ref()
            .and_then(|dialog| dialog.options.first())
            .map(|(_, msg)| msg.clone()),
        InputKey::Char('n' | 'N') | InputKey::Esc => Some(Message::CancelDialog),
        InputKey::CharCtrl('c') => Some(Message::Quit),
        _ => None,
    }
}

fn handle_key_normal(state: &AppState, key: InputKey) -> Option<Message> {
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    match state.page {
        Page::Dashboard => handle_key_dashboard(state, key),
        Page::Chat => handle_key_chat(key),
        Page::Collection(kind) => match state.page_state(kind) {
            Some(page) if page.edit.is_some() => handle_key_editing(page, key),
            Some(page) if page.focus == PageFocus::Form => handle_key_form(key),
            _ => handle_key_list(kind, key),
        },
    }
}

/// Keys shared by every page that is not capturing text
fn handle_key_navigation(key: &InputKey) -> Option<Message> {
    match key {
        InputKey::Tab => Some(Message::NextPage),
        InputKey::BackTab => Some(Message::PreviousPage),
        InputKey::Char(c @ '1'..='9') => {
            let index = c.to_digit(10)? as usize - 1;
            Page::all().get(index).copied().map(Message::ShowPage)
        }
        InputKey::Char('q') => Some(Message::RequestQuit),
        InputKey::Char('L') => Some(Message::Logout),
        _ => None,
    }
}

fn handle_key_dashboard(state: &AppState, key: InputKey) -> Option<Message> {
    if let Some(msg) = handle_key_navigation(&key) {
        return Some(msg);
    }
    match key {
        InputKey::Up | InputKey::Char('k') => Some(Message::SelectOverview(-1)),
        InputKey::Down | InputKey::Char('j') => Some(Message::SelectOverview(1)),
        InputKey::Enter => Some(Message::ShowPage(Page::Collection(
            state.overview.selected_kind(),
        ))),
        InputKey::Char('r') => Some(Message::RefreshAll),
        _ => None,
    }
}

fn handle_key_chat(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Tab => Some(Message::NextPage),
        InputKey::BackTab => Some(Message::PreviousPage),
        InputKey::Esc => Some(Message::ShowPage(Page::Dashboard)),
        InputKey::Enter => Some(Message::SendChat),
        InputKey::Backspace => Some(Message::ChatBackspace),
        key => key.typed_char().map(Message::ChatInput),
    }
}

fn handle_key_list(kind: EntityKind, key: InputKey) -> Option<Message> {
    if let Some(msg) = handle_key_navigation(&key) {
        return Some(msg);
    }
    match key {
        InputKey::Up | InputKey::Char('k') => Some(Message::SelectRecord(-1)),
        InputKey::Down | InputKey::Char('j') => Some(Message::SelectRecord(1)),
        InputKey::PageUp => Some(Message::SelectRecord(-PAGE_STEP)),
        InputKey::PageDown => Some(Message::SelectRecord(PAGE_STEP)),
        InputKey::Enter | InputKey::Char('e') => Some(Message::EditSelected),
        InputKey::Char('n') => Some(Message::NewRecord),
        InputKey::Char('d') | InputKey::Delete => Some(Message::RequestDelete),
        InputKey::Char('r') => Some(Message::EntityChanged(kind)),
        InputKey::Right | InputKey::Char('l') => Some(Message::ToggleFocus),
        _ => None,
    }
}

fn handle_key_form(key: InputKey) -> Option<Message> {
    if let Some(msg) = handle_key_navigation(&key) {
        return Some(msg);
    }
    match key {
        InputKey::Up | InputKey::Char('k') => Some(Message::SelectField(-1)),
        InputKey::Down | InputKey::Char('j') => Some(Message::SelectField(1)),
        InputKey::PageUp => Some(Message::SelectField(-PAGE_STEP)),
        InputKey::PageDown => Some(Message::SelectField(PAGE_STEP)),
        InputKey::Enter | InputKey::Char('e' | ' ') => Some(Message::BeginEdit),
        InputKey::Char('x') => Some(Message::ClearFile),
        InputKey::Char('a') => Some(Message::AddRow),
        InputKey::Char('d') => Some(Message::RemoveRow),
        InputKey::Char('K') => Some(Message::MoveRow(-1)),
        InputKey::Char('J') => Some(Message::MoveRow(1)),
        InputKey::Char('s') | InputKey::CharCtrl('s') => Some(Message::Submit),
        InputKey::Char('n') => Some(Message::NewRecord),
        InputKey::Esc | InputKey::Left | InputKey::Char('h') => Some(Message::ToggleFocus),
        _ => None,
    }
}

fn handle_key_editing(page: &PageState, key: InputKey) -> Option<Message> {
    let multiline = page
        .edit
        .as_ref()
        .is_some_and(|edit| edit.kind == FieldKind::Multiline);
    match key {
        InputKey::Esc => Some(Message::CancelEdit),
        InputKey::Enter => Some(Message::CommitEdit),
        InputKey::CharCtrl('j') if multiline => Some(Message::EditInput('\n')),
        InputKey::Backspace => Some(Message::EditBackspace),
        key => key.typed_char().map(Message::EditInput),
    }
}
