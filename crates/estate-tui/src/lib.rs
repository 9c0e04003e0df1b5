//! estate-tui - Terminal UI for Estate Admin
//!
//! This crate provides the ratatui-based terminal interface. It owns the
//! terminal, turns crossterm events into [`estate_app::Message`]s and draws
//! [`estate_app::AppState`] every frame.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry points
pub use runner::run;
