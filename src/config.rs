//! Configuration management
//!
//! Config is read from `devlog.toml` in the working directory, or from the
//! path given on the command line. Every section is optional.

use crate::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_CONSOLE_LOG_FILE, DEFAULT_EXPORT_MAX, DEFAULT_PREFS_FILE,
};
use crate::error::{DevlogError, Result};
use crate::prefs::Theme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

// =============================================================================
// Application Configuration
// =============================================================================

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logger: LoggerConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Host name the application is served from (drives environment
    /// detection). Unset means headless, which counts as development.
    pub hostname: Option<String>,

    /// Preferences file (theme, pinned, expanded, simulated environment)
    pub prefs_path: PathBuf,

    /// File receiving console mirror output while the overlay owns the terminal
    pub console_log_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Theme used until the user picks one
    pub theme: Theme,

    /// Expand the panel when a new entry arrives
    pub auto_expand: bool,

    /// Merge consecutive identical entries into one row with a count
    pub group_duplicates: bool,

    /// Maximum entries written when exporting
    pub export_max: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            hostname: None,
            prefs_path: PathBuf::from(DEFAULT_PREFS_FILE),
            console_log_path: PathBuf::from(DEFAULT_CONSOLE_LOG_FILE),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            auto_expand: true,
            group_duplicates: true,
            export_max: DEFAULT_EXPORT_MAX,
        }
    }
}

impl Config {
    /// Check values that deserialize fine but make no sense
    pub fn validate(&self) -> Result<()> {
        if self.display.export_max == 0 {
            return Err(DevlogError::ConfigValidation {
                field: "display.export_max",
                reason: "must be at least 1".into(),
            });
        }
        if let Some(host) = &self.logger.hostname {
            if host.trim().is_empty() {
                return Err(DevlogError::ConfigValidation {
                    field: "logger.hostname",
                    reason: "must not be blank (remove it for headless)".into(),
                });
            }
        }
        Ok(())
    }
}

/// Default config path (working directory)
pub fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

/// Read and parse a config file
pub fn read(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| DevlogError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| DevlogError::ConfigValidation {
        field: "config",
        reason: format!("{}: {}", path.display(), e),
    })?;

    config.validate()?;
    Ok(config)
}

/// Load config from file, falling back to defaults on any problem
pub fn load(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }

    match read(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}, using defaults", e);
            Config::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.logger.hostname, None);
        assert_eq!(config.logger.prefs_path, PathBuf::from(DEFAULT_PREFS_FILE));
        assert_eq!(config.display.theme, Theme::Dark);
        assert!(config.display.auto_expand);
        assert!(config.display.group_duplicates);
        assert_eq!(config.display.export_max, DEFAULT_EXPORT_MAX);
    }

    #[test]
    fn test_config_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.display.theme, Theme::Dark);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_partial_section() {
        let partial = r#"
[logger]
hostname = "staging.example.com"

[display]
theme = "light"
"#;

        let config: Config = toml::from_str(partial).unwrap();
        assert_eq!(
            config.logger.hostname.as_deref(),
            Some("staging.example.com")
        );
        assert_eq!(config.display.theme, Theme::Light);
        // Rest should be defaults
        assert!(config.display.auto_expand);
        assert_eq!(
            config.logger.console_log_path,
            PathBuf::from(DEFAULT_CONSOLE_LOG_FILE)
        );
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config {
            logger: LoggerConfig {
                hostname: Some("localhost".into()),
                ..LoggerConfig::default()
            },
            display: DisplayConfig {
                theme: Theme::Light,
                auto_expand: false,
                group_duplicates: false,
                export_max: 50,
            },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let restored: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(restored.logger.hostname.as_deref(), Some("localhost"));
        assert_eq!(restored.display.theme, Theme::Light);
        assert!(!restored.display.auto_expand);
        assert!(!restored.display.group_duplicates);
        assert_eq!(restored.display.export_max, 50);
    }

    #[test]
    fn test_validate_rejects_zero_export() {
        let mut config = Config::default();
        config.display.export_max = 0;
        assert!(matches!(
            config.validate(),
            Err(DevlogError::ConfigValidation {
                field: "display.export_max",
                ..
            })
        ));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = load(Path::new("definitely-not-here/devlog.toml"));
        assert!(config.display.auto_expand);
    }

    #[test]
    fn test_load_invalid_file_uses_defaults() {
        let path = std::env::temp_dir().join(format!("devlog-bad-{}.toml", std::process::id()));
        fs::write(&path, "[display]\nexport_max = 0\n").unwrap();

        let config = load(&path);
        assert_eq!(config.display.export_max, DEFAULT_EXPORT_MAX);

        let _ = fs::remove_file(&path);
    }
}
