//! Token store backed by a JSON file.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::traits::TokenStore;
use crate::{AccessToken, Error, RefreshToken, Result};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// On-disk layout, keyed the same way the web client keys local storage.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

/// Persists the token pair in a JSON file readable only by its owner.
///
/// A missing file is the same as an empty store.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    // Serialises read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<StoredTokens> {
        if !self.path.exists() {
            return Ok(StoredTokens::default());
        }

        let json = fs::read_to_string(&self.path)
            .map_err(|e| Error::storage(format!("failed to read token file: {}", e)))?;
        serde_json::from_str(&json)
            .map_err(|e| Error::storage(format!("invalid token file: {}", e)))
    }

    fn write(&self, stored: &StoredTokens) -> Result<()> {
        if stored.access_token.is_none() && stored.refresh_token.is_none() {
            return self.remove();
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::storage(format!("failed to create token directory: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(stored).map_err(Error::storage)?;
        fs::write(&self.path, json)
            .map_err(|e| Error::storage(format!("failed to write token file: {}", e)))?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.path, perms).map_err(Error::storage)?;
        }

        Ok(())
    }

    fn remove(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .map_err(|e| Error::storage(format!("failed to remove token file: {}", e)))?;
            debug!(path = %self.path.display(), "Removed token file");
        }
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut StoredTokens)) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::storage("token file lock poisoned"))?;
        let mut stored = self.read()?;
        apply(&mut stored);
        self.write(&stored)
    }
}

impl TokenStore for FileTokenStore {
    fn access_token(&self) -> Result<Option<AccessToken>> {
        Ok(self.read()?.access_token.map(AccessToken::new))
    }

    fn refresh_token(&self) -> Result<Option<RefreshToken>> {
        Ok(self.read()?.refresh_token.map(RefreshToken::new))
    }

    fn set_access_token(&self, token: &AccessToken) -> Result<()> {
        self.update(|stored| stored.access_token = Some(token.as_str().to_string()))
    }

    fn set_refresh_token(&self, token: &RefreshToken) -> Result<()> {
        self.update(|stored| stored.refresh_token = Some(token.as_str().to_string()))
    }

    fn clear(&self) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::storage("token file lock poisoned"))?;
        self.remove()
    }
}
