//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `list`: List refreshes, record loading and deletion
//! - `form`: Field editing, row operations and submission
//! - `session`: Login, logout and session expiry
//! - `chat`: Assistant panel

pub(crate) mod chat;
pub(crate) mod form;
pub(crate) mod keys;
pub(crate) mod list;
pub(crate) mod session;
pub(crate) mod update;


use std::path::PathBuf;

use estate_core::{EntityKind, MultipartPayload};

use crate::forms::FieldPath;
use crate::list_view::ListOwner;
use crate::message::Message;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// One list request and the views waiting for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFetch {
    pub kind: EntityKind,
    /// Each subscribed view with the generation it expects
    pub subscribers: Vec<(ListOwner, u64)>,
}

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Fetch collections, one request per kind
    FetchLists(Vec<ListFetch>),

    /// Fetch one record for editing
    FetchRecord { kind: EntityKind, id: String },

    /// Create (`id` is `None`) or update a record
    Submit {
        kind: EntityKind,
        id: Option<String>,
        /// Form generation the payload was built from
        generation: u64,
        payload: MultipartPayload,
    },

    Delete { kind: EntityKind, id: String },

    /// Read a local file into a pending upload
    LoadFile {
        kind: EntityKind,
        field: FieldPath,
        path: PathBuf,
        max_bytes: u64,
    },

    Login { email: String, password: String },

    /// Forget the stored token
    Logout,

    SendChat { message: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
