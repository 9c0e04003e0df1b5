//! Configuration for Estate Admin
//!
//! Settings live in `<config_dir>/estate-admin/config.toml`; the auth token
//! file sits next to it.

pub mod settings;
pub mod types;

pub use settings::{config_file, default_config_dir, init_config_dir, load_settings};
pub use types::*;
