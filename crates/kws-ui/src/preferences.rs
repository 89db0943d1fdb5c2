//! User preference storage.

use std::future::Future;
use std::path::{Path, PathBuf};

use kws_core::error::UserFacingError;
use kws_core::Scale;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Preferences IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preferences serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl UserFacingError for PreferencesError {
    fn user_message(&self) -> &'static str {
        "Could not save your preferences."
    }
}

/// Where the chosen temperature scale lives between runs
pub trait UserPreferences: Send + Sync {
    /// The stored scale, or the default when nothing usable is stored
    fn scale(&self) -> impl Future<Output = Scale> + Send;

    fn set_scale(&self, scale: Scale) -> Result<(), PreferencesError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(default)]
    scale: Option<Scale>,
}

/// Preferences persisted as JSON, read once and then served from memory
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    default_scale: Scale,
    cached: Mutex<Option<StoredPreferences>>,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>, default_scale: Scale) -> Self {
        Self {
            path: path.into(),
            default_scale,
            cached: Mutex::new(None),
        }
    }

    /// `preferences.json` inside `config_dir`
    pub fn in_dir(config_dir: &Path, default_scale: Scale) -> Self {
        Self::new(config_dir.join(PREFERENCES_FILE), default_scale)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> StoredPreferences {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(prefs) => prefs,
                Err(e) => {
                    tracing::warn!("Ignoring unreadable preferences {}: {}", self.path.display(), e);
                    StoredPreferences::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoredPreferences::default(),
            Err(e) => {
                tracing::warn!("Failed to read preferences {}: {}", self.path.display(), e);
                StoredPreferences::default()
            }
        }
    }

    fn write(&self, prefs: &StoredPreferences) -> Result<(), PreferencesError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(prefs)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl UserPreferences for FilePreferences {
    async fn scale(&self) -> Scale {
        let cached = self.cached.lock().clone();
        let prefs = match cached {
            Some(prefs) => prefs,
            None => {
                let read = self.read().await;
                // A set_scale during the read wins over what was on disk
                self.cached.lock().get_or_insert(read).clone()
            }
        };
        prefs.scale.unwrap_or(self.default_scale)
    }

    fn set_scale(&self, scale: Scale) -> Result<(), PreferencesError> {
        let mut cached = self.cached.lock();
        let mut prefs = cached.clone().unwrap_or_default();
        prefs.scale = Some(scale);
        self.write(&prefs)?;
        *cached = Some(prefs);
        tracing::debug!("Saved scale {}", scale);
        Ok(())
    }
}

/// Preferences that only last for the life of the process
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    scale: Mutex<Option<Scale>>,
    default_scale: Scale,
}

impl MemoryPreferences {
    pub fn new(default_scale: Scale) -> Self {
        Self {
            scale: Mutex::new(None),
            default_scale,
        }
    }
}

impl UserPreferences for MemoryPreferences {
    async fn scale(&self) -> Scale {
        self.scale.lock().unwrap_or(self.default_scale)
    }

    fn set_scale(&self, scale: Scale) -> Result<(), PreferencesError> {
        *self.scale.lock() = Some(scale);
        Ok(())
    }
}
