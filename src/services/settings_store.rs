//! Persisted settings access
//!
//! The settings file is read-mostly during aggregation (one whole-file
//! read per request) and exclusively written by the config endpoints
//! (whole-file replace). A missing or corrupt file yields the built-in
//! defaults instead of failing a dashboard request.

use crate::error::{AppError, Result};
use crate::models::Settings;
use std::path::PathBuf;
use tracing::warn;

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Current settings, falling back to defaults when the file is absent
    /// or unreadable.
    pub async fn load(&self) -> Settings {
        match self.try_load().await {
            Ok(settings) => settings,
            Err(err) => {
                warn!(
                    "Failed to load settings from {}, using defaults: {}",
                    self.path.display(),
                    err
                );
                Settings::default()
            }
        }
    }

    pub async fn try_load(&self) -> Result<Settings> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::Config(format!("Invalid settings file: {}", e)))
    }

    /// Replace the settings file wholesale.
    pub async fn save(&self, settings: &Settings) -> Result<()> {
        let json = serde_json::to_string_pretty(settings)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
