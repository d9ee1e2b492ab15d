//! Log core
//!
//! Single-threaded event emitter. Normalizes log calls into `LogEntry`
//! values, mirrors them to the native console and broadcasts them
//! synchronously to every subscriber, in subscription order.
//!
//! The core keeps no entries: the subscriber list is its only mutable state.

use super::entry::{ConsoleMethod, Level, LogEntry, LogEvent};
use super::format::format_message;
use crate::constants::CONSOLE_TARGET;
use crate::env::{detect_env, Env, HostContext};
use crate::value::Value;
use chrono::{DateTime, Local};
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};
use tracing::{debug, error, info, warn};

type Callback = Rc<dyn Fn(&LogEvent)>;

thread_local! {
    /// Number of subscriber callbacks currently running on this thread
    static DISPATCH_DEPTH: Cell<u32> = const { Cell::new(0) };
}

/// True while a subscriber callback is running on the current thread
pub(crate) fn in_subscriber() -> bool {
    DISPATCH_DEPTH.try_with(|depth| depth.get() > 0).unwrap_or(false)
}

// =============================================================================
// Console mirror
// =============================================================================

/// Native logging facility every non-suppressed call is mirrored to
pub trait Console {
    fn log(&self, method: ConsoleMethod, level: &Level, message: &str);
    fn clear(&self);
}

/// Mirrors to `tracing` events on the `devlog::console` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingConsole;

impl Console for TracingConsole {
    fn log(&self, method: ConsoleMethod, level: &Level, message: &str) {
        match method {
            ConsoleMethod::Log => info!(target: CONSOLE_TARGET, level = %level, "{}", message),
            ConsoleMethod::Warn => warn!(target: CONSOLE_TARGET, level = %level, "{}", message),
            ConsoleMethod::Error => error!(target: CONSOLE_TARGET, level = %level, "{}", message),
        }
    }

    fn clear(&self) {
        info!(target: CONSOLE_TARGET, "console cleared");
    }
}

// =============================================================================
// Core
// =============================================================================

pub struct LogCore {
    subscribers: RefCell<Vec<(u64, Callback)>>,
    next_id: Cell<u64>,
    last_timestamp: Cell<Option<DateTime<Local>>>,
    host: Box<dyn HostContext>,
    console: Box<dyn Console>,
}

impl LogCore {
    /// Create a core mirroring to `tracing`
    pub fn new(host: impl HostContext + 'static) -> Rc<Self> {
        Self::with_console(host, TracingConsole)
    }

    /// Create a core with a custom console mirror
    pub fn with_console(
        host: impl HostContext + 'static,
        console: impl Console + 'static,
    ) -> Rc<Self> {
        Rc::new(Self {
            subscribers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            last_timestamp: Cell::new(None),
            host: Box::new(host),
            console: Box::new(console),
        })
    }

    // === Environment ===

    /// Current environment (evaluated on every call)
    pub fn env(&self) -> Env {
        detect_env(self.host.as_ref())
    }

    /// True when running in production (evaluated on every call)
    pub fn is_prod(&self) -> bool {
        self.env() == Env::Production
    }

    // === Subscriptions ===

    /// Register a callback; it receives every event until unsubscribed
    pub fn subscribe(self: &Rc<Self>, callback: impl Fn(&LogEvent) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));

        Subscription {
            core: Rc::downgrade(self),
            id,
            active: Cell::new(true),
        }
    }

    /// Number of registered callbacks
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn remove(&self, id: u64) {
        self.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
    }

    fn is_subscribed(&self, id: u64) -> bool {
        self.subscribers.borrow().iter().any(|(sid, _)| *sid == id)
    }

    // === Emission ===

    /// Log `args` at `level`.
    ///
    /// In production every level except `Force` is a no-op: no entry, no
    /// console mirror, no broadcast.
    pub fn add_log(&self, level: Level, args: Vec<Value>) {
        self.add_tagged(level, None, args);
    }

    /// Like `add_log`, with a tag folded into the message and console output
    /// but not into `data`.
    pub fn add_tagged(&self, level: Level, tag: Option<&str>, args: Vec<Value>) {
        if level != Level::Force && self.is_prod() {
            return;
        }

        let message = format_message(tag, &args);
        self.console.log(level.console_method(), &level, &message);

        let entry = LogEntry {
            level,
            message,
            data: args,
            timestamp: self.next_timestamp(),
        };

        self.broadcast(&LogEvent::Entry(Rc::new(entry)));
    }

    /// Mirror a clear to the console and broadcast `LogEvent::Clear`
    pub fn clear(&self) {
        self.console.clear();
        self.broadcast(&LogEvent::Clear);
    }

    /// Notify a snapshot of the subscriber list.
    ///
    /// Callbacks may log, subscribe or unsubscribe re-entrantly. Callbacks
    /// added during the broadcast miss the in-flight event; callbacks removed
    /// during it are skipped. A panicking callback does not stop the others.
    fn broadcast(&self, event: &LogEvent) {
        let snapshot: Vec<(u64, Callback)> = self.subscribers.borrow().clone();

        for (id, callback) in snapshot {
            if !self.is_subscribed(id) {
                continue;
            }
            DISPATCH_DEPTH.with(|depth| depth.set(depth.get() + 1));
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback(event)));
            DISPATCH_DEPTH.with(|depth| depth.set(depth.get() - 1));

            if outcome.is_err() {
                warn!("Log subscriber {} panicked; continuing broadcast", id);
            }
        }
    }

    /// Timestamps never go backwards in emission order
    fn next_timestamp(&self) -> DateTime<Local> {
        let now = Local::now();
        let stamp = match self.last_timestamp.get() {
            Some(last) if now < last => last,
            _ => now,
        };
        self.last_timestamp.set(Some(stamp));
        stamp
    }
}

impl Drop for LogCore {
    fn drop(&mut self) {
        debug!(
            "Log core dropped with {} subscriber(s)",
            self.subscribers.get_mut().len()
        );
    }
}

// =============================================================================
// Subscription
// =============================================================================

/// Handle returned by `subscribe`.
///
/// `unsubscribe` removes exactly the callback it was created for; calling it
/// again is a no-op. Dropping the handle does not unsubscribe.
#[must_use = "dropping a Subscription leaves the callback registered"]
pub struct Subscription {
    core: Weak<LogCore>,
    id: u64,
    active: Cell<bool>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if self.active.replace(false) {
            if let Some(core) = self.core.upgrade() {
                core.remove(self.id);
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.active.get())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::args;
    use crate::env::StaticHost;

    /// Console that records every mirror call
    #[derive(Default, Clone)]
    pub(crate) struct RecordingConsole {
        pub calls: Rc<RefCell<Vec<(ConsoleMethod, String)>>>,
        pub clears: Rc<Cell<usize>>,
    }

    impl Console for RecordingConsole {
        fn log(&self, method: ConsoleMethod, _level: &Level, message: &str) {
            self.calls.borrow_mut().push((method, message.to_string()));
        }

        fn clear(&self) {
            self.clears.set(self.clears.get() + 1);
        }
    }

    fn collect(core: &Rc<LogCore>) -> (Subscription, Rc<RefCell<Vec<LogEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let sub = core.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        (sub, events)
    }

    #[test]
    fn test_development_broadcasts_every_level() {
        let core = LogCore::new(StaticHost::fixed(Env::Development));
        let (_sub, events) = collect(&core);

        for level in ["default", "info", "success", "warn", "error", "force", "trace"] {
            core.add_log(Level::parse(level), args!["x"]);
        }

        let events = events.borrow();
        assert_eq!(events.len(), 7);
        assert_eq!(events[6].entry().unwrap().level, Level::Custom("trace".into()));
    }

    #[test]
    fn test_production_suppresses_all_but_force() {
        let console = RecordingConsole::default();
        let core = LogCore::with_console(StaticHost::fixed(Env::Production), console.clone());
        let (_sub, events) = collect(&core);

        core.add_log(Level::Info, args!["hidden"]);
        core.add_log(Level::Error, args!["hidden"]);
        assert!(events.borrow().is_empty());
        assert!(console.calls.borrow().is_empty());

        core.add_log(Level::Force, args!["shown"]);
        assert_eq!(events.borrow().len(), 1);
        assert_eq!(console.calls.borrow().len(), 1);
    }

    #[test]
    fn test_console_mirror_mapping() {
        let console = RecordingConsole::default();
        let core = LogCore::with_console(StaticHost::headless(), console.clone());

        core.add_log(Level::Success, args!["a"]);
        core.add_log(Level::Warn, args!["b"]);
        core.add_log(Level::Error, args!["c"]);
        core.add_log(Level::Custom("odd".into()), args!["d"]);

        let methods: Vec<ConsoleMethod> = console.calls.borrow().iter().map(|(m, _)| *m).collect();
        assert_eq!(
            methods,
            vec![
                ConsoleMethod::Log,
                ConsoleMethod::Warn,
                ConsoleMethod::Error,
                ConsoleMethod::Log
            ]
        );
    }

    #[test]
    fn test_unsubscribe_is_exact_and_idempotent() {
        let core = LogCore::new(StaticHost::headless());
        let (first, first_events) = collect(&core);
        let (_second, second_events) = collect(&core);

        first.unsubscribe();
        first.unsubscribe();
        assert!(!first.is_active());
        assert_eq!(core.subscriber_count(), 1);

        core.add_log(Level::Info, args!["x"]);
        assert!(first_events.borrow().is_empty());
        assert_eq!(second_events.borrow().len(), 1);
    }

    #[test]
    fn test_subscription_order_is_notification_order() {
        let core = LogCore::new(StaticHost::headless());
        let order = Rc::new(RefCell::new(Vec::new()));
        let subs: Vec<Subscription> = (0..3)
            .map(|i| {
                let order = order.clone();
                core.subscribe(move |_| order.borrow_mut().push(i))
            })
            .collect();

        core.add_log(Level::Info, args!["x"]);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        drop(subs);
    }

    #[test]
    fn test_clear_broadcasts_even_in_production() {
        let console = RecordingConsole::default();
        let core = LogCore::with_console(StaticHost::fixed(Env::Production), console.clone());
        let (_sub, events) = collect(&core);

        core.clear();
        assert_eq!(events.borrow().len(), 1);
        assert!(events.borrow()[0].is_clear());
        assert_eq!(console.clears.get(), 1);
    }

    #[test]
    fn test_reentrant_log_and_subscribe_during_broadcast() {
        let core = LogCore::new(StaticHost::headless());
        let late_events = Rc::new(RefCell::new(Vec::<LogEvent>::new()));
        let late_subs = Rc::new(RefCell::new(Vec::new()));

        let weak = Rc::downgrade(&core);
        let sink = late_events.clone();
        let holder = late_subs.clone();
        let _sub = core.subscribe(move |event| {
            let Some(core) = weak.upgrade() else { return };
            let Some(entry) = event.entry() else { return };
            if entry.message == "outer" {
                let sink = sink.clone();
                holder
                    .borrow_mut()
                    .push(core.subscribe(move |e| sink.borrow_mut().push(e.clone())));
                core.add_log(Level::Info, args!["inner"]);
            }
        });

        core.add_log(Level::Info, args!["outer"]);

        // The late subscriber sees the nested entry, not the in-flight one
        let late = late_events.borrow();
        assert_eq!(late.len(), 1);
        assert_eq!(late[0].entry().unwrap().message, "inner");
    }

    #[test]
    fn test_panicking_subscriber_is_isolated() {
        let core = LogCore::new(StaticHost::headless());
        let _bad = core.subscribe(|_| panic!("subscriber failure"));
        let (_good, events) = collect(&core);

        core.add_log(Level::Info, args!["x"]);
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_dispatch_depth_tracks_callbacks() {
        let core = LogCore::new(StaticHost::headless());
        let seen = Rc::new(Cell::new(false));
        let flag = seen.clone();
        let _sub = core.subscribe(move |_| flag.set(in_subscriber()));
        let _bad = core.subscribe(|_| panic!("subscriber failure"));

        assert!(!in_subscriber());
        core.add_log(Level::Info, args!["x"]);
        assert!(seen.get());
        // Restored even though the second callback unwound
        assert!(!in_subscriber());
    }

    #[test]
    fn test_timestamps_are_non_decreasing() {
        let core = LogCore::new(StaticHost::headless());
        let (_sub, events) = collect(&core);

        for i in 0..20 {
            core.add_log(Level::Info, args![i]);
        }

        let events = events.borrow();
        let stamps: Vec<_> = events.iter().map(|e| e.entry().unwrap().timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_tag_is_not_data() {
        let core = LogCore::new(StaticHost::headless());
        let (_sub, events) = collect(&core);

        core.add_tagged(Level::Warn, Some("[WARN]"), args!["low"]);

        let events = events.borrow();
        let entry = events[0].entry().unwrap();
        assert_eq!(entry.message, "[WARN] low");
        assert_eq!(entry.data.len(), 1);
        assert!(entry.data[0].same(&Value::from("low")));
    }
}
