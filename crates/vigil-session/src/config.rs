//! Persisted alert configuration.
//!
//! Three opaque keys are persisted client-side: the warning-alert
//! configuration and one style blob each for the generic success and error
//! banners. Every key follows the same rule — **parse or fall back to
//! defaults** — so malformed or missing data is never a fatal condition.
//!
//! ```text
//! ConfigService ──► ConfigStore (trait)
//!                      ├── MemoryStore   (tests)
//!                      └── FileStore     (JSON file per key, atomic writes)
//! ```
//!
//! Concurrent writers are not synchronized: last write wins, which is
//! accepted for the single-user-per-client scenario.

use crate::error::ConfigError;
use crate::warning::BannerKind;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use vigil_types::ErrorCode;

/// Persisted key for the warning-alert configuration.
pub const WARNING_ALERT_KEY: &str = "warning_alert";
/// Persisted key for the success banner style.
pub const SUCCESS_ALERT_KEY: &str = "success_alert";
/// Persisted key for the error banner style.
pub const ERROR_ALERT_KEY: &str = "error_alert";

/// Visual styling and auto-dismiss duration for a banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerStyle {
    /// CSS background color.
    pub background: String,

    /// CSS text color.
    pub color: String,

    /// Seconds before an explicitly shown banner self-hides.
    pub duration_seconds: u64,
}

impl Default for BannerStyle {
    fn default() -> Self {
        Self {
            background: "#1f2937".to_string(),
            color: "#ffffff".to_string(),
            duration_seconds: 5,
        }
    }
}

/// Warning-alert configuration.
///
/// All fields default individually so partially persisted blobs parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Remaining-seconds value at and below which the warning shows.
    pub threshold_seconds: u64,

    /// Master toggle for the pre-expiry warning.
    pub enabled: bool,

    /// Styling of the warning alert.
    pub style: BannerStyle,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            threshold_seconds: 60,
            enabled: true,
            style: BannerStyle::default(),
        }
    }
}

/// Partial update for [`AlertConfig`].
///
/// Unset fields keep their current values; the full merged object is
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertConfigPatch {
    /// New warning threshold, if changing.
    pub threshold_seconds: Option<u64>,

    /// New enabled flag, if changing.
    pub enabled: Option<bool>,

    /// Replacement style, if changing.
    pub style: Option<BannerStyle>,
}

impl AlertConfigPatch {
    /// Merges this patch into a config in place.
    pub fn apply(&self, config: &mut AlertConfig) {
        if let Some(threshold) = self.threshold_seconds {
            config.threshold_seconds = threshold;
        }
        if let Some(enabled) = self.enabled {
            config.enabled = enabled;
        }
        if let Some(style) = &self.style {
            config.style = style.clone();
        }
    }
}

/// Keyed blob storage for persisted configuration.
///
/// `load` returning `None` means "no usable value" — absent and unreadable
/// are deliberately indistinguishable so callers always fall back to
/// defaults.
pub trait ConfigStore: Send + Sync {
    /// Loads the raw blob for a key, if one is usable.
    fn load(&self, key: &str) -> Option<String>;

    /// Saves the raw blob for a key, overwriting any previous value.
    fn save(&self, key: &str, value: &str) -> Result<(), ConfigError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        match self.entries.read() {
            Ok(entries) => entries.get(key).cloned(),
            Err(e) => {
                tracing::error!("config store: lock poisoned on load: {e}");
                None
            }
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), value.to_string());
            }
            Err(e) => {
                tracing::error!("config store: lock poisoned on save: {e}");
            }
        }
        Ok(())
    }
}

/// File-backed store: one JSON file per key under a base directory.
///
/// Writes go to a temp file first and are renamed into place, so a crashed
/// write never leaves a torn blob behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Creates a store, creating the base directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DirectoryCreation`] if the directory cannot be
    /// created.
    pub fn new(base_path: PathBuf) -> Result<Self, ConfigError> {
        if !base_path.exists() {
            std::fs::create_dir_all(&base_path).map_err(|e| ConfigError::DirectoryCreation {
                path: base_path.clone(),
                source: e,
            })?;
        }
        Ok(Self { base_path })
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.base_path.join(format!(".{key}.json.tmp"))
    }
}

impl ConfigStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        let path = self.key_path(key);
        if !path.exists() {
            return None;
        }
        match std::fs::read_to_string(&path) {
            Ok(blob) => Some(blob),
            Err(e) => {
                tracing::warn!(key, error = %e, "unreadable config blob; using defaults");
                None
            }
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let temp = self.temp_path(key);
        let path = self.key_path(key);

        std::fs::write(&temp, value).map_err(|e| ConfigError::Write {
            key: key.to_string(),
            source: e,
        })?;
        std::fs::rename(&temp, &path).map_err(|e| ConfigError::Write {
            key: key.to_string(),
            source: e,
        })?;
        Ok(())
    }
}

/// Returns the default on-disk config directory (`~/.vigil/config`).
#[must_use]
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vigil")
        .join("config")
}

/// Typed access to the persisted alert configuration.
///
/// Reads parse-or-default; writes persist the full merged object and log a
/// non-fatal warning on failure — a config error never reaches the UI.
///
/// # Example
///
/// ```
/// use vigil_session::{AlertConfigPatch, ConfigService, MemoryStore};
///
/// let service = ConfigService::new(MemoryStore::new());
/// assert!(service.warning_config().enabled);
///
/// let updated = service.update_warning(AlertConfigPatch {
///     enabled: Some(false),
///     ..Default::default()
/// });
/// assert!(!updated.enabled);
/// assert_eq!(updated.threshold_seconds, 60); // untouched fields survive
/// ```
#[derive(Debug)]
pub struct ConfigService<S> {
    store: S,
}

impl<S: ConfigStore> ConfigService<S> {
    /// Creates a service over a store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current warning-alert configuration.
    #[must_use]
    pub fn warning_config(&self) -> AlertConfig {
        self.load_or_default(WARNING_ALERT_KEY)
    }

    /// Merges a partial update and persists the full merged object.
    ///
    /// Returns the merged configuration.
    pub fn update_warning(&self, patch: AlertConfigPatch) -> AlertConfig {
        let mut config = self.warning_config();
        patch.apply(&mut config);
        self.persist(WARNING_ALERT_KEY, &config);
        config
    }

    /// Current style for a banner kind.
    #[must_use]
    pub fn banner_style(&self, kind: BannerKind) -> BannerStyle {
        self.load_or_default(banner_key(kind))
    }

    /// Replaces and persists the style for a banner kind.
    pub fn update_banner_style(&self, kind: BannerKind, style: BannerStyle) -> BannerStyle {
        self.persist(banner_key(kind), &style);
        style
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let Some(blob) = self.store.load(key) else {
            return T::default();
        };
        match serde_json::from_str(&blob) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed persisted config; using defaults");
                T::default()
            }
        }
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        let blob = match serde_json::to_string(value) {
            Ok(blob) => blob,
            Err(e) => {
                let err = ConfigError::Serialize {
                    key: key.to_string(),
                    source: e,
                };
                tracing::warn!(code = err.code(), error = %err, "config not persisted");
                return;
            }
        };
        if let Err(err) = self.store.save(key, &blob) {
            tracing::warn!(code = err.code(), error = %err, "failed to persist config");
        }
    }
}

fn banner_key(kind: BannerKind) -> &'static str {
    match kind {
        BannerKind::Success => SUCCESS_ALERT_KEY,
        BannerKind::Error => ERROR_ALERT_KEY,
    }
}
