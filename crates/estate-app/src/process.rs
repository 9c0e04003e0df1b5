//! Message processing
//!
//! Runs a message through the TEA update function, following up on chained
//! messages and handing every resulting action to the background tasks.

use estate_api::AdminBackend;
use tokio::sync::mpsc;

use crate::actions::{handle_action, Services};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<B>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    services: &Services<B>,
) where
    B: AdminBackend + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), services.clone());
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
