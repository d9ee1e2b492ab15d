//! devlog - in-process developer logging with a terminal overlay
//!
//! A `Log` handle formats each call into a `LogEntry`, mirrors it to the
//! console and broadcasts it to subscribers. Everything except `force` is
//! suppressed in production. The overlay (`app`, `ui`) is one such subscriber.

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod demo;
pub mod env;
pub mod error;
pub mod input;
pub mod logging;
pub mod prefs;
pub mod ui;
pub mod value;

pub use env::{detect_env, is_prod, Env, HostContext, ProcessHost, StaticHost};
pub use error::{DevlogError, Result};
pub use logging::{
    Console, ConsoleMethod, Level, Log, LogCore, LogEntry, LogEvent, LogFeed, Subscription,
    TracingConsole,
};
pub use prefs::Preferences;
pub use value::Value;
