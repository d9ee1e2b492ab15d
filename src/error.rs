//! Centralized error types
//!
//! All fallible operations outside the log core return `DevlogError`.
//! Use `Result<T>` as shorthand for `std::result::Result<T, DevlogError>`.
//! The log core itself never fails; it degrades to placeholders instead.

use std::fmt;
use std::path::PathBuf;

/// All devlog errors
#[derive(Debug)]
pub enum DevlogError {
    // === Formatting ===
    /// Value has no JSON representation
    Unserializable { type_name: String },

    // === Config / preferences ===
    /// Failed to read a config or preferences file
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to write a config or preferences file
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Invalid config value
    ConfigValidation { field: &'static str, reason: String },

    // === Display ===
    /// Clipboard unavailable or rejected the text
    Clipboard { message: String },
    /// File system operation failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Terminal setup, drawing or input failed
    Terminal { source: std::io::Error },
}

impl std::error::Error for DevlogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigRead { source, .. }
            | Self::ConfigWrite { source, .. }
            | Self::Io { source, .. }
            | Self::Terminal { source } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for DevlogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unserializable { type_name } => {
                write!(f, "Cannot serialize value of type {}", type_name)
            }
            Self::ConfigRead { path, .. } => write!(f, "Cannot read {}", path.display()),
            Self::ConfigWrite { path, .. } => write!(f, "Cannot write {}", path.display()),
            Self::ConfigValidation { field, reason } => {
                write!(f, "Invalid {}: {}", field, reason)
            }
            Self::Clipboard { message } => write!(f, "Clipboard error: {}", message),
            Self::Io { path, .. } => write!(f, "IO error: {}", path.display()),
            Self::Terminal { .. } => write!(f, "Terminal error"),
        }
    }
}

/// Alias for Result with DevlogError
pub type Result<T> = std::result::Result<T, DevlogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_messages() {
        let err = DevlogError::ConfigValidation {
            field: "simulated_env",
            reason: "expected development or production".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid simulated_env: expected development or production"
        );

        let err = DevlogError::Unserializable {
            type_name: "[object Window]".into(),
        };
        assert_eq!(err.to_string(), "Cannot serialize value of type [object Window]");
    }

    #[test]
    fn test_source_chain() {
        let err = DevlogError::ConfigRead {
            path: PathBuf::from("devlog.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.source().is_some());
        assert!(DevlogError::Clipboard {
            message: "busy".into()
        }
        .source()
        .is_none());
    }
}
