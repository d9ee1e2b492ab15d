//! Log aggregation
//!
//! - `LogCore` / `Log` - emitter and call surface
//! - `LogEntry` / `LogEvent` - what subscribers receive
//! - `format` - argument list to display message
//! - `LogFeed` - accumulating subscriber for the display
//! - `capture` - panics and unhandled errors into the log

pub mod capture;
pub mod emitter;
pub mod entry;
pub mod feed;
pub mod format;
pub mod log;

pub use emitter::{Console, LogCore, Subscription, TracingConsole};
pub use entry::{ConsoleMethod, Level, LogEntry, LogEvent};
pub use feed::LogFeed;
pub use log::Log;

use crate::constants::CONSOLE_TARGET;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

/// Initialize tracing for console mirror and internal debug output.
///
/// Call early in main() before any logging occurs. Output goes to
/// `console_file` when given (the overlay owns the terminal), else stderr.
pub fn init_tracing(verbose: bool, console_file: Option<&Path>) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(format!("warn,{}=info", CONSOLE_TARGET))
    };

    let file = console_file.and_then(|path| File::create(path).ok());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .compact();

    let _ = match file {
        Some(file) => tracing_subscriber::registry()
            .with(fmt_layer.with_ansi(false).with_writer(Mutex::new(file)))
            .with(filter)
            .try_init(),
        None => tracing_subscriber::registry()
            .with(fmt_layer.with_writer(std::io::stderr))
            .with(filter)
            .try_init(),
    };
}
