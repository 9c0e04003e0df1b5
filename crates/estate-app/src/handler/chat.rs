//! Assistant panel

use super::{UpdateAction, UpdateResult};
use crate::state::AppState;

pub fn handle_send(state: &mut AppState) -> UpdateResult {
    match state.chat.take_prompt() {
        Some(message) => UpdateResult::action(UpdateAction::SendChat { message }),
        None => UpdateResult::none(),
    }
}

pub fn handle_reply(state: &mut AppState, result: Result<String, String>) -> UpdateResult {
    state.chat.finish(result);
    UpdateResult::none()
}
