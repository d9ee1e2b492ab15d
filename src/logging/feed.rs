//! Subscription bridge between the log core and the display
//!
//! `LogFeed` subscribes once when mounted, accumulates every received entry
//! and empties itself on `LogEvent::Clear`. The list is unbounded: entries
//! stay until a clear or until the feed is dropped.

use super::emitter::Subscription;
use super::entry::{LogEntry, LogEvent};
use super::log::Log;
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use tracing::debug;

#[derive(Default)]
struct FeedState {
    entries: Vec<Rc<LogEntry>>,
    /// Bumped on every change so views can tell when to redraw
    revision: u64,
}

impl FeedState {
    fn apply(&mut self, event: &LogEvent) {
        match event {
            LogEvent::Entry(entry) => self.entries.push(Rc::clone(entry)),
            LogEvent::Clear => self.entries.clear(),
        }
        self.revision += 1;
    }
}

/// Events received while the entry list was borrowed, in arrival order
type Backlog = Rc<RefCell<Vec<LogEvent>>>;

/// Observable list of accumulated entries
///
/// Holding the `Ref` from `entries` across a log call is allowed: the event
/// is parked and applied on the next access.
pub struct LogFeed {
    state: Rc<RefCell<FeedState>>,
    backlog: Backlog,
    subscription: Option<Subscription>,
    is_prod: bool,
}

impl LogFeed {
    /// Subscribe to `log` and start accumulating.
    ///
    /// `is_prod` is captured here, once per mount.
    pub fn mount(log: &Log) -> Self {
        let state = Rc::new(RefCell::new(FeedState::default()));
        let backlog: Backlog = Rc::default();
        let sink = Rc::clone(&state);
        let parked = Rc::clone(&backlog);

        let subscription = log.subscribe(move |event| match sink.try_borrow_mut() {
            Ok(mut state) => {
                drain(&mut state, &parked);
                state.apply(event);
            }
            Err(_) => parked.borrow_mut().push(event.clone()),
        });

        debug!("Log feed mounted");

        Self {
            state,
            backlog,
            subscription: Some(subscription),
            is_prod: log.is_prod(),
        }
    }

    /// Apply parked events if the list is not currently borrowed
    fn sync(&self) {
        if self.backlog.borrow().is_empty() {
            return;
        }
        if let Ok(mut state) = self.state.try_borrow_mut() {
            drain(&mut state, &self.backlog);
        }
    }

    /// Unsubscribe. Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            debug!("Log feed unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Environment flag computed at mount time
    pub fn is_prod(&self) -> bool {
        self.is_prod
    }

    /// Accumulated entries, oldest first
    pub fn entries(&self) -> Ref<'_, [Rc<LogEntry>]> {
        self.sync();
        Ref::map(self.state.borrow(), |state| state.entries.as_slice())
    }

    /// Entry at `index`, oldest first
    pub fn get(&self, index: usize) -> Option<Rc<LogEntry>> {
        self.sync();
        self.state.borrow().entries.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.sync();
        self.state.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Change counter
    pub fn revision(&self) -> u64 {
        self.sync();
        self.state.borrow().revision
    }
}

fn drain(state: &mut FeedState, backlog: &RefCell<Vec<LogEvent>>) {
    let parked = std::mem::take(&mut *backlog.borrow_mut());
    for event in &parked {
        state.apply(event);
    }
}

impl Drop for LogFeed {
    fn drop(&mut self) {
        self.unmount();
    }
}
