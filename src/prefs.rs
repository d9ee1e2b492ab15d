//! Persisted preferences
//!
//! Small string key-value store shared between the panel and the
//! environment oracle. Stored as a flat TOML table.

use crate::env::Env;
use crate::error::{DevlogError, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

pub const KEY_THEME: &str = "theme";
pub const KEY_PINNED: &str = "pinned";
pub const KEY_EXPANDED: &str = "expanded";
pub const KEY_SIMULATED_ENV: &str = "simulated_env";

/// Panel color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Theme> {
        match s {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

/// Shared preference store (cheap to clone)
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    inner: Arc<RwLock<Inner>>,
}

impl Preferences {
    /// Store that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `path`; a missing or unreadable file yields an empty store
    /// bound to the same path.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = if path.exists() {
            match read_values(&path) {
                Ok(values) => values,
                Err(e) => {
                    warn!("{}, using empty preferences", e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        Self {
            inner: Arc::new(RwLock::new(Inner {
                path: Some(path),
                values,
            })),
        }
    }

    /// Write the store to its file. No-op for in-memory stores.
    pub fn save(&self) -> Result<()> {
        let inner = self.inner.read();
        let Some(path) = inner.path.as_ref() else {
            return Ok(());
        };
        let content =
            toml::to_string(&inner.values).map_err(|e| DevlogError::ConfigValidation {
                field: "preferences",
                reason: e.to_string(),
            })?;
        fs::write(path, content).map_err(|e| DevlogError::ConfigWrite {
            path: path.clone(),
            source: e,
        })
    }

    pub fn path(&self) -> Option<PathBuf> {
        self.inner.read().path.clone()
    }

    // === Raw access ===

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.read().values.get(key).cloned()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        self.inner.write().values.insert(key.to_string(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.inner.write().values.remove(key)
    }

    // === Typed access ===

    pub fn theme(&self) -> Option<Theme> {
        self.get(KEY_THEME).as_deref().and_then(Theme::parse)
    }

    pub fn set_theme(&self, theme: Theme) {
        self.set(KEY_THEME, theme.as_str());
    }

    pub fn pinned(&self) -> bool {
        self.get_bool(KEY_PINNED)
    }

    pub fn set_pinned(&self, pinned: bool) {
        self.set(KEY_PINNED, pinned.to_string());
    }

    pub fn expanded(&self) -> bool {
        self.get_bool(KEY_EXPANDED)
    }

    pub fn set_expanded(&self, expanded: bool) {
        self.set(KEY_EXPANDED, expanded.to_string());
    }

    /// Raw simulated environment, as stored (may be invalid)
    pub fn simulated_env_raw(&self) -> Option<String> {
        self.get(KEY_SIMULATED_ENV)
    }

    /// Simulated environment, if set to a valid value
    pub fn simulated_env(&self) -> Option<Env> {
        self.simulated_env_raw().and_then(|s| s.parse().ok())
    }

    /// Set or clear the simulated environment
    pub fn set_simulated_env(&self, env: Option<Env>) {
        match env {
            Some(env) => self.set(KEY_SIMULATED_ENV, env.as_str()),
            None => {
                self.remove(KEY_SIMULATED_ENV);
            }
        }
    }

    fn get_bool(&self, key: &str) -> bool {
        self.get(key).map(|v| v == "true").unwrap_or(false)
    }
}

fn read_values(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = fs::read_to_string(path).map_err(|e| DevlogError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| DevlogError::ConfigValidation {
        field: "preferences",
        reason: format!("{}: {}", path.display(), e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("devlog-prefs-{}-{}.toml", name, std::process::id()))
    }

    #[test]
    fn test_typed_defaults() {
        let prefs = Preferences::in_memory();
        assert_eq!(prefs.theme(), None);
        assert!(!prefs.pinned());
        assert!(!prefs.expanded());
        assert_eq!(prefs.simulated_env(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let prefs = Preferences::in_memory();
        let other = prefs.clone();
        other.set_simulated_env(Some(Env::Production));
        assert_eq!(prefs.simulated_env(), Some(Env::Production));

        prefs.set_simulated_env(None);
        assert_eq!(other.simulated_env_raw(), None);
    }

    #[test]
    fn test_invalid_simulated_env_is_kept_raw() {
        let prefs = Preferences::in_memory();
        prefs.set(KEY_SIMULATED_ENV, "qa");
        assert_eq!(prefs.simulated_env_raw().as_deref(), Some("qa"));
        assert_eq!(prefs.simulated_env(), None);
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_path("roundtrip");
        let prefs = Preferences::load(&path);
        prefs.set_theme(Theme::Light);
        prefs.set_pinned(true);
        prefs.save().unwrap();

        let reloaded = Preferences::load(&path);
        assert_eq!(reloaded.theme(), Some(Theme::Light));
        assert!(reloaded.pinned());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_yields_empty_store() {
        let path = temp_path("corrupt");
        fs::write(&path, "this is = = not toml").unwrap();

        let prefs = Preferences::load(&path);
        assert_eq!(prefs.get(KEY_THEME), None);
        assert_eq!(prefs.path(), Some(path.clone()));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let prefs = Preferences::in_memory();
        prefs.set_theme(Theme::Dark);
        assert!(prefs.save().is_ok());
    }
}
