//! Sample log traffic for the demo binary
//!
//! Each sample exercises one path through the log core.

use crate::args;
use crate::logging::{capture, Log};
use crate::value::Value;
use std::fmt;
use std::io;

/// A sample the overlay can emit on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    Plain,
    Info,
    Success,
    Warn,
    Error,
    Force,
    Circular,
    Unserializable,
    NestedError,
}

impl Sample {
    pub const ALL: [Sample; 9] = [
        Sample::Plain,
        Sample::Info,
        Sample::Success,
        Sample::Warn,
        Sample::Error,
        Sample::Force,
        Sample::Circular,
        Sample::Unserializable,
        Sample::NestedError,
    ];

    /// Sample bound to a digit key (`1`..=`9`)
    pub fn from_digit(digit: char) -> Option<Sample> {
        let index = digit.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }

    pub fn emit(self, log: &Log) {
        match self {
            Sample::Plain => log.log(args!["Page rendered in", 42, "ms"]),
            Sample::Info => log.info(args![
                "Fetched user",
                Value::object()
                    .with("id", 7)
                    .with("name", "Ada")
                    .with("roles", Value::array([Value::from("admin"), Value::from("dev")]))
            ]),
            Sample::Success => log.success(args!["Saved", 3, "records"]),
            Sample::Warn => log.warn(args!["Cache miss rate", 0.35, "above threshold"]),
            Sample::Error => log.error(args![
                "Request failed:",
                Value::object().with("code", 500)
            ]),
            Sample::Force => log.force(args!["Build", env!("CARGO_PKG_VERSION"), "loaded"]),
            Sample::Circular => {
                let node = Value::object().with("name", "node");
                node.set("self", node.clone());
                log.warn(args!["Circular structure:", node]);
            }
            Sample::Unserializable => log.info(args![
                "Opaque payload",
                Value::array([Value::from(1), Value::BigInt(9_007_199_254_740_993)]),
                Value::opaque("Socket")
            ]),
            Sample::NestedError => capture::report_error(log, &SampleError::new()),
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Sample::Plain => "plain log",
            Sample::Info => "info with object",
            Sample::Success => "success",
            Sample::Warn => "warning",
            Sample::Error => "error with code",
            Sample::Force => "forced",
            Sample::Circular => "circular object",
            Sample::Unserializable => "unserializable data",
            Sample::NestedError => "error with causes",
        };
        f.write_str(name)
    }
}

/// Emit every sample once, in key order
pub fn run_sequence(log: &Log) {
    for sample in Sample::ALL {
        sample.emit(log);
    }
}

/// Error with a two-level `source()` chain
#[derive(Debug)]
pub struct SampleError {
    source: io::Error,
}

impl SampleError {
    fn new() -> Self {
        Self {
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "upstream refused connection"),
        }
    }
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sync job failed")
    }
}

impl std::error::Error for SampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{Env, StaticHost};
    use crate::logging::{Level, LogFeed};

    #[test]
    fn test_digit_mapping() {
        assert_eq!(Sample::from_digit('1'), Some(Sample::Plain));
        assert_eq!(Sample::from_digit('9'), Some(Sample::NestedError));
        assert_eq!(Sample::from_digit('0'), None);
        assert_eq!(Sample::from_digit('a'), None);
    }

    #[test]
    fn test_sequence_in_development() {
        let log = Log::new(StaticHost::headless());
        let feed = LogFeed::mount(&log);

        run_sequence(&log);

        assert_eq!(feed.len(), Sample::ALL.len());
        let error = feed.get(4).unwrap();
        assert_eq!(error.message, "[ERROR] Request failed: {\n  \"code\": 500\n}");
        let circular = feed.get(6).unwrap();
        assert!(circular.message.contains("\"self\": \"[Circular]\""));
        let nested = feed.get(8).unwrap();
        assert_eq!(nested.level, Level::Error);
        assert!(nested.message.contains("caused by: upstream refused connection"));
    }

    #[test]
    fn test_sequence_in_production_keeps_force_only() {
        let log = Log::new(StaticHost::fixed(Env::Production));
        let feed = LogFeed::mount(&log);

        run_sequence(&log);

        assert_eq!(feed.len(), 1);
        assert_eq!(feed.get(0).unwrap().level, Level::Force);
    }
}
