//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use estate_core::{Entity, EntityKind, FileField};

use crate::forms::FieldPath;
use crate::input_key::InputKey;
use crate::list_view::ListOwner;
use crate::page::Page;

/// All possible messages/actions in the application
///
/// Results carried back from background tasks hold the user-facing error
/// string, already rendered with `Error::user_message`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Request to quit (may ask first when forms hold unsaved changes)
    RequestQuit,

    /// Force quit without confirmation (Ctrl+C)
    Quit,

    /// Confirm quit from confirmation dialog
    ConfirmQuit,

    /// Cancel quit from confirmation dialog
    CancelQuit,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    ShowPage(Page),
    NextPage,
    PreviousPage,

    // ─────────────────────────────────────────────────────────
    // Lists
    // ─────────────────────────────────────────────────────────
    /// Records of `kind` were created, updated or deleted; every list
    /// showing that collection refetches
    EntityChanged(EntityKind),

    /// Refetch every collection (startup, after login, manual refresh)
    RefreshAll,

    /// A list fetch finished
    ListLoaded {
        kind: EntityKind,
        owner: ListOwner,
        generation: u64,
        result: Result<Vec<Entity>, String>,
    },

    /// Move the highlighted row of the visible list
    SelectRecord(isize),

    /// Move the highlighted collection on the dashboard
    SelectOverview(isize),

    /// Toggle focus between list and form
    ToggleFocus,

    // ─────────────────────────────────────────────────────────
    // Page: create / edit / delete
    // ─────────────────────────────────────────────────────────
    /// Discard the form and start a new record
    NewRecord,

    /// Fetch the highlighted record and load it into the form
    EditSelected,

    /// Single-record fetch finished
    RecordLoaded {
        kind: EntityKind,
        id: String,
        result: Result<Entity, String>,
    },

    /// Ask before deleting the highlighted record
    RequestDelete,

    ConfirmDelete { kind: EntityKind, id: String },

    DeleteCompleted {
        kind: EntityKind,
        id: String,
        result: Result<(), String>,
    },

    /// Validate and send the form of the visible page
    Submit,

    SubmitCompleted {
        kind: EntityKind,
        generation: u64,
        result: Result<(), String>,
    },

    // ─────────────────────────────────────────────────────────
    // Form editing
    // ─────────────────────────────────────────────────────────
    SelectField(isize),

    /// Start editing the highlighted field (toggles flags in place)
    BeginEdit,

    EditInput(char),
    EditBackspace,
    CommitEdit,
    CancelEdit,

    /// Clear the highlighted file field
    ClearFile,

    /// Append a row to the collection of the highlighted field
    AddRow,

    /// Remove the row holding the highlighted field
    RemoveRow,

    /// Move the row holding the highlighted field up or down
    MoveRow(isize),

    /// A local file finished loading for a file field
    FileLoaded {
        kind: EntityKind,
        field: FieldPath,
        path: PathBuf,
        result: Result<FileField, String>,
    },

    // ─────────────────────────────────────────────────────────
    // Confirm dialog
    // ─────────────────────────────────────────────────────────
    DialogSelect(isize),
    DialogConfirm,
    CancelDialog,

    // ─────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────
    LoginInput(char),
    LoginBackspace,
    LoginNextField,
    SubmitLogin,
    LoginCompleted(Result<(), String>),
    Logout,
    /// The backend rejected the stored token
    SessionExpired,

    // ─────────────────────────────────────────────────────────
    // Assistant chat
    // ─────────────────────────────────────────────────────────
    ChatInput(char),
    ChatBackspace,
    SendChat,
    ChatReply(Result<String, String>),
}
