//! Session storage implementation
//!
//! Two tiers: a JSON file that survives restarts ("remember me") and an
//! in-process slot that lives as long as the application. Reads prefer the
//! in-process slot. Stored data that cannot be parsed reads as no session.

use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use crate::config::SessionConfig;
use crate::models::StoredSession;
use crate::utils::errors::Result;

/// Which tier a session is persisted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageTier {
    Persistent,
    Ephemeral,
}

impl StorageTier {
    pub fn from_remember(remember: bool) -> Self {
        if remember {
            StorageTier::Persistent
        } else {
            StorageTier::Ephemeral
        }
    }
}

#[derive(Debug)]
pub struct SessionStore {
    file_path: PathBuf,
    /// Raw JSON, parsed on read like the file tier
    ephemeral: Mutex<Option<String>>,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_path(&config.file_path)
    }

    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            file_path: path.as_ref().to_path_buf(),
            ephemeral: Mutex::new(None),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Read the stored session, ephemeral tier first
    pub async fn load(&self) -> Option<StoredSession> {
        if let Some(raw) = self.ephemeral.lock().await.as_deref() {
            return parse_session(raw, "ephemeral");
        }

        match tokio::fs::read_to_string(&self.file_path).await {
            Ok(raw) => parse_session(&raw, "file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.file_path.display(), error = %e, "Failed to read stored session");
                None
            }
        }
    }

    /// Persist `session` to one tier and clear the other
    pub async fn save(&self, session: &StoredSession, tier: StorageTier) -> Result<()> {
        let serialized = serde_json::to_string_pretty(session)?;

        match tier {
            StorageTier::Persistent => {
                if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&self.file_path, serialized).await?;
                *self.ephemeral.lock().await = None;
            }
            StorageTier::Ephemeral => {
                self.remove_file().await?;
                *self.ephemeral.lock().await = Some(serialized);
            }
        }

        debug!(tier = ?tier, path = %self.file_path.display(), "Session saved");
        Ok(())
    }

    /// Remove the session from both tiers
    pub async fn clear(&self) -> Result<()> {
        *self.ephemeral.lock().await = None;
        self.remove_file().await
    }

    async fn remove_file(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn parse_session(raw: &str, tier: &str) -> Option<StoredSession> {
    match serde_json::from_str(raw) {
        Ok(session) => Some(session),
        Err(e) => {
            warn!(tier = tier, error = %e, "Ignoring corrupt stored session");
            None
        }
    }
}
