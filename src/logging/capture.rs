//! Uncaught failure capture
//!
//! Routes panics and unhandled top-level errors into the log as `error`
//! entries. Both channels go through the normal suppression rule, so they
//! are silent in production.
//!
//! The panic hook is process-wide but the log core is single-threaded: only
//! panics raised on the thread that called `install` are logged, panics on
//! other threads go to the previously installed hook.
//!
//! The hook never broadcasts. A second panic inside a panic hook aborts the
//! process, so the hook only queues a report and `flush` emits it once the
//! unwind has been caught. Panics raised by subscriber callbacks are not
//! queued: the broadcast that caught them already reported them.

use super::emitter::{in_subscriber, LogCore};
use super::entry::Level;
use super::log::Log;
use crate::value::Value;
use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::RefCell;
use std::error::Error;
use std::panic;
use std::rc::{Rc, Weak};
use std::sync::Once;
use tracing::{debug, warn};

thread_local! {
    static INSTALLED: RefCell<Option<Weak<LogCore>>> = const { RefCell::new(None) };
    static PENDING: RefCell<Vec<PanicReport>> = const { RefCell::new(Vec::new()) };
}

static HOOK: Once = Once::new();

/// A panic seen by the hook, waiting for `flush`
struct PanicReport {
    message: String,
    location: Option<String>,
    backtrace: Option<String>,
}

impl PanicReport {
    fn into_args(self) -> Vec<Value> {
        let mut args = vec![Value::from(format!("Uncaught panic: {}", self.message))];
        if let Some(location) = self.location {
            args.push(Value::from(format!("\n  at {}", location)));
        }
        if let Some(backtrace) = self.backtrace {
            args.push(Value::from(format!("\n{}", backtrace)));
        }
        args
    }
}

/// Log panics raised on the current thread through `log`.
///
/// Replaces any previous registration on this thread. The process hook is
/// installed once and chains to the hook that was active before it.
/// Captured panics reach the log on the next `flush`.
pub fn install(log: &Log) {
    INSTALLED.with(|slot| *slot.borrow_mut() = Some(Rc::downgrade(log.core())));

    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if in_subscriber() {
                return;
            }

            let message = panic_message(info.payload());
            let location = info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));

            if !queue_panic(message, location) {
                previous(info);
            }
        }));
    });

    debug!("Panic capture installed");
}

/// Stop logging panics on the current thread. Queued reports are dropped.
pub fn uninstall() {
    let _ = INSTALLED.try_with(|slot| *slot.borrow_mut() = None);
    let _ = PENDING.try_with(|pending| pending.borrow_mut().clear());
}

/// Emit queued panic reports as `error` entries.
///
/// Call after a `catch_unwind` returns, or periodically from an event loop.
/// Returns the number of reports emitted.
pub fn flush() -> usize {
    let Some(core) = installed_core() else {
        return 0;
    };
    let reports = PENDING.with(|pending| std::mem::take(&mut *pending.borrow_mut()));
    let count = reports.len();
    for report in reports {
        core.add_log(Level::Error, report.into_args());
    }
    count
}

/// Number of panic reports waiting for `flush`
pub fn pending() -> usize {
    PENDING
        .try_with(|pending| pending.borrow().len())
        .unwrap_or(0)
}

/// Log an unhandled error and its `source()` chain
pub fn report_error(log: &Log, err: &(dyn Error + 'static)) {
    let mut args = vec![Value::from(format!("Unhandled error: {}", err))];
    let mut source = err.source();
    while let Some(cause) = source {
        args.push(Value::from(format!("\n  caused by: {}", cause)));
        source = cause.source();
    }
    log.add_log(Level::Error, args);
}

/// Returns true when the panic was queued for a development log core
fn queue_panic(message: String, location: Option<String>) -> bool {
    let Some(core) = installed_core() else {
        return false;
    };
    if core.is_prod() {
        return false;
    }

    warn!(
        "Panic captured: {} ({})",
        message,
        location.as_deref().unwrap_or("unknown location")
    );

    let backtrace = Backtrace::capture();
    let backtrace = (backtrace.status() == BacktraceStatus::Captured).then(|| backtrace.to_string());
    let report = PanicReport {
        message,
        location,
        backtrace,
    };

    PENDING
        .try_with(|pending| match pending.try_borrow_mut() {
            Ok(mut pending) => {
                pending.push(report);
                true
            }
            Err(_) => false,
        })
        .unwrap_or(false)
}

fn installed_core() -> Option<Rc<LogCore>> {
    INSTALLED
        .try_with(|slot| slot.borrow().as_ref().and_then(Weak::upgrade))
        .ok()
        .flatten()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}
