//! Log entry types
//!
//! Core types broadcast by the log core to its subscribers.

use super::format::to_json;
use crate::value::Value;
use chrono::{DateTime, Local};
use serde::ser::{SerializeMap, SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};
use std::fmt;
use std::rc::Rc;

/// Log level
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Level {
    Default,
    Info,
    Success,
    Warn,
    Error,
    /// Bypasses production suppression
    Force,
    /// Unrecognized level name, kept as given
    Custom(String),
}

impl Level {
    /// Parse a level name; unknown names become `Custom`
    pub fn parse(name: &str) -> Level {
        match name {
            "default" => Level::Default,
            "info" => Level::Info,
            "success" => Level::Success,
            "warn" => Level::Warn,
            "error" => Level::Error,
            "force" => Level::Force,
            other => Level::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Level::Default => "default",
            Level::Info => "info",
            Level::Success => "success",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Force => "force",
            Level::Custom(name) => name.as_str(),
        }
    }

    /// Tag prefixed by the convenience methods, e.g. `[WARN]`
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Level::Info => Some("[INFO]"),
            Level::Success => Some("[SUCCESS]"),
            Level::Warn => Some("[WARN]"),
            Level::Error => Some("[ERROR]"),
            Level::Force => Some("[FORCE]"),
            Level::Default | Level::Custom(_) => None,
        }
    }

    /// Console method used for the native mirror
    pub fn console_method(&self) -> ConsoleMethod {
        match self {
            Level::Warn => ConsoleMethod::Warn,
            Level::Error => ConsoleMethod::Error,
            _ => ConsoleMethod::Log,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Level {
    fn from(name: &str) -> Self {
        Level::parse(name)
    }
}

/// Native console method a level maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Log,
    Warn,
    Error,
}

/// One non-suppressed log call.
///
/// Immutable once created; shared between subscribers as `Rc<LogEntry>`.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    /// Display string derived from the tag and `data`
    pub message: String,
    /// The caller's arguments, unmodified and in order
    pub data: Vec<Value>,
    pub timestamp: DateTime<Local>,
}

/// What subscribers receive
#[derive(Debug, Clone)]
pub enum LogEvent {
    Entry(Rc<LogEntry>),
    /// Discard everything accumulated so far
    Clear,
}

impl LogEvent {
    pub fn entry(&self) -> Option<&Rc<LogEntry>> {
        match self {
            LogEvent::Entry(entry) => Some(entry),
            LogEvent::Clear => None,
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, LogEvent::Clear)
    }
}

// =============================================================================
// Serialization
// =============================================================================

/// Arguments serialize as JSON where possible, otherwise as their type tag
struct DataRef<'a>(&'a [Value]);

impl Serialize for DataRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for value in self.0 {
            match to_json(value) {
                Ok(json) => seq.serialize_element(&json)?,
                Err(_) => seq.serialize_element(&value.type_tag())?,
            }
        }
        seq.end()
    }
}

impl Serialize for LogEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("LogEntry", 4)?;
        s.serialize_field("level", self.level.as_str())?;
        s.serialize_field("message", &self.message)?;
        s.serialize_field("data", &DataRef(&self.data))?;
        s.serialize_field("timestamp", &self.timestamp.to_rfc3339())?;
        s.end()
    }
}

impl Serialize for LogEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LogEvent::Entry(entry) => entry.serialize(serializer),
            LogEvent::Clear => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("type", "clear")?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    fn entry(level: Level, data: Vec<Value>) -> LogEntry {
        LogEntry {
            level,
            message: "m".into(),
            data,
            timestamp: Local::now(),
        }
    }

    #[test]
    fn test_level_parse_roundtrip() {
        for name in ["default", "info", "success", "warn", "error", "force"] {
            assert_eq!(Level::parse(name).as_str(), name);
        }
        assert_eq!(Level::parse("trace"), Level::Custom("trace".into()));
        assert_eq!(Level::parse("trace").to_string(), "trace");
    }

    #[test]
    fn test_console_method_mapping() {
        assert_eq!(Level::Success.console_method(), ConsoleMethod::Log);
        assert_eq!(Level::Info.console_method(), ConsoleMethod::Log);
        assert_eq!(Level::Force.console_method(), ConsoleMethod::Log);
        assert_eq!(Level::Warn.console_method(), ConsoleMethod::Warn);
        assert_eq!(Level::Error.console_method(), ConsoleMethod::Error);
        assert_eq!(
            Level::Custom("verbose".into()).console_method(),
            ConsoleMethod::Log
        );
    }

    #[test]
    fn test_clear_serializes_with_type() {
        let json = serde_json::to_value(LogEvent::Clear).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "clear" }));
    }

    #[test]
    fn test_entry_serializes_without_type() {
        let event = LogEvent::Entry(Rc::new(entry(Level::Warn, args!["x", 2])));
        let json = serde_json::to_value(&event).unwrap();

        assert!(json.get("type").is_none());
        assert_eq!(json["level"], "warn");
        assert_eq!(json["data"], serde_json::json!(["x", 2]));
    }

    #[test]
    fn test_unserializable_data_uses_type_tag() {
        let event = entry(Level::Info, vec![Value::opaque("Window")]);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["data"], serde_json::json!(["[object Window]"]));
    }
}
