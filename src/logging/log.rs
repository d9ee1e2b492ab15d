//! Call surface for application code
//!
//! `Log` is a cheap handle over a shared `LogCore`: one method per level plus
//! a default call, all delegating to the core's `add_log`.

use super::emitter::{Console, LogCore, Subscription};
use super::entry::{Level, LogEvent};
use crate::env::{Env, HostContext};
use crate::value::Value;
use std::rc::Rc;

/// Logging handle (clone freely; all clones share one core)
#[derive(Clone)]
pub struct Log {
    core: Rc<LogCore>,
}

impl Log {
    pub fn new(host: impl HostContext + 'static) -> Self {
        Self {
            core: LogCore::new(host),
        }
    }

    pub fn with_console(host: impl HostContext + 'static, console: impl Console + 'static) -> Self {
        Self {
            core: LogCore::with_console(host, console),
        }
    }

    pub fn core(&self) -> &Rc<LogCore> {
        &self.core
    }

    /// Default call: `info`, without a tag
    pub fn log(&self, args: Vec<Value>) {
        self.core.add_log(Level::Info, args);
    }

    pub fn info(&self, args: Vec<Value>) {
        self.tagged(Level::Info, args);
    }

    pub fn success(&self, args: Vec<Value>) {
        self.tagged(Level::Success, args);
    }

    pub fn warn(&self, args: Vec<Value>) {
        self.tagged(Level::Warn, args);
    }

    pub fn error(&self, args: Vec<Value>) {
        self.tagged(Level::Error, args);
    }

    /// Visible in production too
    pub fn force(&self, args: Vec<Value>) {
        self.tagged(Level::Force, args);
    }

    /// Log at an arbitrary level, without a tag
    pub fn add_log(&self, level: impl Into<Level>, args: Vec<Value>) {
        self.core.add_log(level.into(), args);
    }

    pub fn clear(&self) {
        self.core.clear();
    }

    /// Current environment. Recomputed on every call.
    pub fn env(&self) -> Env {
        self.core.env()
    }

    pub fn is_prod(&self) -> bool {
        self.core.is_prod()
    }

    pub fn subscribe(&self, callback: impl Fn(&LogEvent) + 'static) -> Subscription {
        self.core.subscribe(callback)
    }

    fn tagged(&self, level: Level, args: Vec<Value>) {
        let tag = level.tag();
        self.core.add_tagged(level, tag, args);
    }
}

impl std::fmt::Debug for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Log")
            .field("subscribers", &self.core.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::env::StaticHost;
    use crate::logging::LogEntry;
    use crate::prefs::Preferences;
    use std::cell::RefCell;

    fn capture(log: &Log) -> (Subscription, Rc<RefCell<Vec<Rc<LogEntry>>>>) {
        let entries = Rc::new(RefCell::new(Vec::new()));
        let sink = entries.clone();
        let sub = log.subscribe(move |event| {
            if let Some(entry) = event.entry() {
                sink.borrow_mut().push(entry.clone());
            }
        });
        (sub, entries)
    }

    #[test]
    fn test_default_call_is_untagged_info() {
        let log = Log::new(StaticHost::headless());
        let (_sub, entries) = capture(&log);

        log.log(args!["plain"]);

        let entries = entries.borrow();
        assert_eq!(entries[0].level, Level::Info);
        assert_eq!(entries[0].message, "plain");
    }

    #[test]
    fn test_convenience_methods_tag_message_only() {
        let log = Log::new(StaticHost::headless());
        let (_sub, entries) = capture(&log);

        log.info(args!["a"]);
        log.success(args!["b"]);
        log.warn(args!["c"]);
        log.error(args!["d"]);
        log.force(args!["e"]);

        let messages: Vec<String> = entries.borrow().iter().map(|e| e.message.clone()).collect();
        assert_eq!(
            messages,
            vec!["[INFO] a", "[SUCCESS] b", "[WARN] c", "[ERROR] d", "[FORCE] e"]
        );
        assert!(entries.borrow().iter().all(|e| e.data.len() == 1));
    }

    #[test]
    fn test_add_log_accepts_level_names() {
        let log = Log::new(StaticHost::headless());
        let (_sub, entries) = capture(&log);

        log.add_log("verbose", args!["x"]);
        assert_eq!(entries.borrow()[0].level, Level::Custom("verbose".into()));
    }

    #[test]
    fn test_env_follows_preference_changes() {
        let prefs = Preferences::in_memory();
        let log = Log::new(crate::env::ProcessHost::new(prefs.clone(), None));
        let (_sub, entries) = capture(&log);

        // Explicit override keeps the test independent of DEVLOG_ENV
        prefs.set_simulated_env(Some(Env::Development));
        assert_eq!(log.env(), Env::Development);
        log.warn(args!["visible"]);

        prefs.set_simulated_env(Some(Env::Production));
        assert_eq!(log.env(), Env::Production);
        log.warn(args!["hidden"]);
        log.force(args!["forced"]);

        let messages: Vec<String> = entries.borrow().iter().map(|e| e.message.clone()).collect();
        assert_eq!(messages, vec!["[WARN] visible", "[FORCE] forced"]);
    }
}
