//! Store settings snapshots.
//!
//! The admin panel publishes store settings as a JSON document. The
//! storefront reads it fresh on every evaluation, so external edits are
//! picked up on the next request without an invalidation protocol. Within
//! one request the snapshot is immutable.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::catalog::SystemSettings;

/// Error type for settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reads [`SystemSettings`] snapshots from a JSON file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// A store backed by the given file, or none for built-in defaults only.
    #[must_use]
    pub const fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Load the current settings snapshot.
    ///
    /// Returns `None` when no settings file is configured or the file does
    /// not exist yet; the catalog then resolves entirely from built-in
    /// defaults. A file that exists but fails to parse is an error rather
    /// than a silent fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read (other than not existing)
    /// or contains invalid JSON.
    pub async fn snapshot(&self) -> Result<Option<SystemSettings>, SettingsError> {
        let Some(path) = &self.path else {
            return Ok(None);
        };

        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("settings file {} not present, using defaults", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let settings = serde_json::from_str(&raw)?;
        Ok(Some(settings))
    }
}
