//! Login, logout and session expiry

use tracing::{info, warn};

use crate::message::Message;
use crate::page::Page;
use crate::state::{AppState, UiMode};

use super::{UpdateAction, UpdateResult};

pub fn handle_submit_login(state: &mut AppState) -> UpdateResult {
    let login = &mut state.login;
    if login.pending {
        return UpdateResult::none();
    }
    if !login.is_complete() {
        login.error = Some("Email and password are required".to_string());
        return UpdateResult::none();
    }
    login.pending = true;
    login.error = None;
    UpdateResult::action(UpdateAction::Login {
        email: login.email.trim().to_string(),
        password: login.password.clone(),
    })
}

/// On success the token is already stored; every list is refetched
pub fn handle_login_completed(state: &mut AppState, result: Result<(), String>) -> UpdateResult {
    state.login.pending = false;
    match result {
        Ok(()) => {
            info!("Logged in as {}", state.login.email.trim());
            state.login.password.clear();
            state.login.error = None;
            state.ui_mode = UiMode::Normal;
            UpdateResult::message(Message::RefreshAll)
        }
        Err(message) => {
            state.login.error = Some(message);
            UpdateResult::none()
        }
    }
}

pub fn handle_logout(state: &mut AppState) -> UpdateResult {
    info!("Logging out");
    state.confirm_dialog_state = None;
    state.ui_mode = UiMode::Login;
    state.page = Page::Dashboard;
    state.login.password.clear();
    state.login.error = None;
    UpdateResult::action(UpdateAction::Logout)
}

/// The backend answered 401: back to the login screen, forms untouched
///
/// The token has already been invalidated by the client.
pub fn handle_session_expired(state: &mut AppState) -> UpdateResult {
    if state.ui_mode == UiMode::Login {
        return UpdateResult::none();
    }
    warn!("Session expired");
    state.confirm_dialog_state = None;
    state.ui_mode = UiMode::Login;
    state.login.pending = false;
    state.login.password.clear();
    state.login.error = Some("Session expired, please log in again".to_string());
    UpdateResult::none()
}
