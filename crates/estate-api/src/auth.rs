//! Authentication context and persistent token storage
//!
//! The bearer token is read from disk once at startup. Afterwards the
//! [`AuthContext`] is the only place that knows it; the HTTP client asks it for
//! the current token on every request, and a rejected token is dropped through
//! [`AuthContext::invalidate`].

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use estate_core::prelude::*;
use fs2::FileExt;

const TOKEN_FILENAME: &str = "token";
const APP_DIR: &str = "estate-admin";

/// File that keeps the bearer token between runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/estate-admin/token`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(TOKEN_FILENAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token; missing or blank files mean "not logged in"
    pub fn load(&self) -> Option<String> {
        let mut file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) => {
                debug!("No token at {:?}: {}", self.path, e);
                return None;
            }
        };
        if let Err(e) = file.lock_shared() {
            warn!("Failed to lock {:?}: {}", self.path, e);
        }
        let mut content = String::new();
        if let Err(e) = file.read_to_string(&mut content) {
            warn!("Failed to read {:?}: {}", self.path, e);
            return None;
        }
        let token = content.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    /// Write the token under an exclusive lock
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::config(format!("Failed to create {:?}: {}", parent, e)))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| Error::config(format!("Failed to open token file: {}", e)))?;

        // Truncate only once the lock is held
        file.lock_exclusive()
            .map_err(|e| Error::config(format!("Failed to lock token file: {}", e)))?;
        file.set_len(0)
            .map_err(|e| Error::config(format!("Failed to truncate token file: {}", e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = file.set_permissions(std::fs::Permissions::from_mode(0o600));
        }

        file.write_all(token.trim().as_bytes())
            .map_err(|e| Error::config(format!("Failed to write token file: {}", e)))?;
        file.flush()
            .map_err(|e| Error::config(format!("Failed to flush token file: {}", e)))?;

        info!("Saved auth token to {:?}", self.path);
        Ok(())
    }

    /// Remove the stored token; a missing file is not an error
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Shared holder of the current bearer token
///
/// Cloning shares the same token.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    token: Arc<RwLock<Option<String>>>,
    store: Option<TokenStore>,
}

impl AuthContext {
    /// In-memory context, nothing is persisted
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
            store: None,
        }
    }

    /// Context backed by a token file, read once here
    pub fn from_store(store: TokenStore) -> Self {
        let token = store.load();
        info!(
            "Auth context loaded ({})",
            if token.is_some() {
                "token present"
            } else {
                "no token"
            }
        );
        Self {
            token: Arc::new(RwLock::new(token)),
            store: Some(store),
        }
    }

    pub fn current_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_token().is_some()
    }

    /// Replace the token and persist it when backed by a store
    ///
    /// The in-memory token is set even when persisting fails.
    pub fn set_token(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.clone());
        }
        match &self.store {
            Some(store) => store.save(&token),
            None => Ok(()),
        }
    }

    /// Forget the token, both in memory and on disk
    pub fn invalidate(&self) -> Result<()> {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
        if let Some(store) = &self.store {
            store.clear()?;
        }
        info!("Auth token invalidated");
        Ok(())
    }
}
