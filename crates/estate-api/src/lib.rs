//! # estate-api - Backend Client
//!
//! The REST service every page talks to, seen from the dashboard.
//!
//! ## Public API
//!
//! - [`AdminBackend`] - Send-able trait with list / fetch / create / update /
//!   delete plus login and chat
//! - [`HttpBackend`] - reqwest implementation, multipart bodies for writes
//! - [`AuthContext`] - Shared bearer token, invalidated on 401
//! - [`TokenStore`] - Token file beside the config, written under a lock

pub mod auth;
pub mod backend;
pub mod http;
mod response;

pub use auth::{AuthContext, TokenStore};
pub use backend::{AdminBackend, LocalAdminBackend};
pub use http::{to_form, BackendConfig, HttpBackend, UpdateMethod};
