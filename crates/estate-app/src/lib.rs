//! estate-app - Application state and orchestration for Estate Admin
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management: one [`Message`] at a time goes through [`handler::update`],
//! which mutates [`AppState`] and may ask for an [`UpdateAction`]. Actions run
//! as background tasks against an [`estate_api::AdminBackend`] and report back
//! with more messages.
//!
//! Form models, the list viewer state machine and configuration loading live
//! here too, so everything except drawing can be tested without a terminal.

pub mod actions;
pub mod chat;
pub mod config;
pub mod confirm_dialog;
pub mod forms;
pub mod handler;
pub mod input_key;
pub mod list_view;
pub mod login;
pub mod message;
pub mod overview;
pub mod page;
pub mod process;
pub mod state;

// Re-export primary types
pub use actions::Services;
pub use handler::{ListFetch, UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use page::Page;
pub use state::{AppState, UiMode};
