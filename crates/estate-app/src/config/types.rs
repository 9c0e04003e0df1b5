//! Configuration types for Estate Admin
//!
//! Every section defaults independently, so a config file only needs the
//! keys it wants to change.

use std::time::Duration;

use estate_api::{BackendConfig, UpdateMethod};
use estate_core::PayloadOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub behavior: BehaviorSettings,

    #[serde(default)]
    pub upload: UploadSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

impl Settings {
    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig {
            base_url: self.api.base_url.clone(),
            update_method: self.api.update_method,
            timeout: Duration::from_secs(self.api.timeout_secs.max(1)),
        }
    }

    pub fn payload_options(&self) -> PayloadOptions {
        PayloadOptions {
            preserve_existing: self.upload.preserve_existing,
        }
    }

    /// Largest file accepted for an upload, in bytes
    pub fn max_file_size(&self) -> u64 {
        self.upload.max_file_size_kb.saturating_mul(1024)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Method used to save an existing record
    #[serde(default)]
    pub update_method: UpdateMethod,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            update_method: UpdateMethod::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BehaviorSettings {
    /// Ask before deleting a record
    #[serde(default = "default_true")]
    pub confirm_delete: bool,

    /// Ask before quitting with unsaved edits or a save in flight
    #[serde(default = "default_true")]
    pub confirm_quit: bool,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            confirm_delete: true,
            confirm_quit: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UploadSettings {
    /// Echo references to stored files back inside the JSON part
    #[serde(default = "default_true")]
    pub preserve_existing: bool,

    #[serde(default = "default_max_file_size_kb")]
    pub max_file_size_kb: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            preserve_existing: true,
            max_file_size_kb: default_max_file_size_kb(),
        }
    }
}

fn default_max_file_size_kb() -> u64 {
    10 * 1024
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Show internal row ids next to sub-collection rows
    #[serde(default)]
    pub show_row_ids: bool,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api.update_method, UpdateMethod::Put);
        assert!(settings.behavior.confirm_delete);
        assert!(settings.upload.preserve_existing);
        assert_eq!(settings.max_file_size(), 10 * 1024 * 1024);
    }

    #[test]
    fn test_partial_sections() {
        let settings: Settings = toml::from_str(
            r#"
[api]
update_method = "patch"

[upload]
preserve_existing = false
"#,
        )
        .unwrap();

        assert_eq!(settings.api.update_method, UpdateMethod::Patch);
        assert_eq!(settings.api.base_url, "http://localhost:5000/api");
        assert!(!settings.payload_options().preserve_existing);
        assert_eq!(settings.upload.max_file_size_kb, 10 * 1024);
        assert!(settings.behavior.confirm_quit);
    }

    #[test]
    fn test_backend_config_clamps_timeout() {
        let mut settings = Settings::default();
        settings.api.timeout_secs = 0;
        assert_eq!(settings.backend_config().timeout, Duration::from_secs(1));
    }
}
