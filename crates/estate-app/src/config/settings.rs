//! Loading of `config.toml`

use std::path::{Path, PathBuf};

use estate_core::prelude::*;

use super::types::Settings;

const APP_DIR: &str = "estate-admin";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_CONFIG: &str = r#"# Estate Admin Configuration

[api]
base_url = "http://localhost:5000/api"
update_method = "put"   # "put" or "patch" for saving existing records
timeout_secs = 30

[behavior]
confirm_delete = true   # Ask before deleting a record
confirm_quit = true     # Ask before quitting with unsaved edits

[upload]
preserve_existing = true    # Send references to already uploaded files back
max_file_size_kb = 10240

[ui]
show_row_ids = false
"#;

/// `~/.config/estate-admin`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Config file inside `dir`
pub fn config_file(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILENAME)
}

/// Load settings from a config file
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create the config directory with a commented default `config.toml`
///
/// An existing file is left alone.
pub fn init_config_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", dir, e)))?;
    }

    let config_path = config_file(dir);
    if !config_path.exists() {
        std::fs::write(&config_path, DEFAULT_CONFIG)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }
    Ok(config_path)
}
