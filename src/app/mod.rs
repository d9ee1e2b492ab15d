//! Application state and orchestration
//!
//! Owns the log handle, the feed the panel reads from, and the panel state.
//! UI code only reads from here and forwards key presses.

mod commands;
pub mod operations;
pub mod state;

pub use state::PanelState;

use crate::args;
use crate::config::Config;
use crate::constants::STATUS_MESSAGE_TIMEOUT_SECS;
use crate::env::Env;
use crate::input;
use crate::logging::{capture, Log, LogFeed};
use crate::prefs::Preferences;
use crate::ui::theme::{palette, Palette};
use crate::ui::view::{entry_text, group_duplicates, Row};
use crossterm::event::KeyEvent;
use std::panic;
use std::time::Instant;
use tracing::{debug, warn};

/// Main application
pub struct App {
    config: Config,
    prefs: Preferences,
    pub(super) log: Log,
    feed: LogFeed,
    pub(super) panel: PanelState,
    last_revision: u64,

    status_message: Option<(String, Instant)>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, prefs: Preferences, log: Log) -> Self {
        let theme = prefs.theme().unwrap_or(config.display.theme);
        let panel = PanelState::new(theme, prefs.expanded(), prefs.pinned());
        let feed = LogFeed::mount(&log);

        debug!(env = %log.env(), "App created");

        Self {
            config,
            prefs,
            log,
            last_revision: feed.revision(),
            feed,
            panel,
            status_message: None,
            should_quit: false,
        }
    }

    // =========================================================================
    // State access
    // =========================================================================

    pub fn log(&self) -> &Log {
        &self.log
    }

    pub fn feed(&self) -> &LogFeed {
        &self.feed
    }

    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    /// Rows as displayed, after duplicate grouping
    pub fn rows(&self) -> Vec<Row> {
        group_duplicates(&self.feed.entries(), self.config.display.group_duplicates)
    }

    pub fn palette(&self) -> Palette {
        palette(self.panel.theme)
    }

    /// Environment currently resolved for the log
    pub fn env(&self) -> Env {
        self.log.env()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Pick up feed changes since the last frame
    pub fn poll(&mut self) {
        capture::flush();

        let revision = self.feed.revision();
        if revision == self.last_revision {
            return;
        }
        self.last_revision = revision;

        if self.feed.is_empty() {
            self.panel.reset();
        } else if self.config.display.auto_expand {
            self.panel.expanded = true;
        }
        let row_count = self.rows().len();
        self.panel.clamp(row_count);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let cmd = input::translate_key(key);
        self.execute_command(cmd)
    }

    pub fn handle_scroll(&mut self, up: bool) {
        self.move_selection(if up { -1 } else { 1 });
    }

    // =========================================================================
    // Status message
    // =========================================================================

    pub(super) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, t)| t.elapsed().as_secs() < STATUS_MESSAGE_TIMEOUT_SECS)
            .map(|(s, _)| s.as_str())
    }

    // =========================================================================
    // Panel
    // =========================================================================

    pub fn toggle_expanded(&mut self) {
        if self.panel.pinned && self.panel.expanded {
            self.set_status("Panel is pinned");
            return;
        }
        self.panel.expanded = !self.panel.expanded;
        self.prefs.set_expanded(self.panel.expanded);
        self.save_prefs();
    }

    pub fn toggle_pin(&mut self) {
        self.panel.pinned = !self.panel.pinned;
        if self.panel.pinned {
            self.panel.expanded = true;
        }
        self.prefs.set_pinned(self.panel.pinned);
        self.save_prefs();
        self.set_status(if self.panel.pinned { "Pinned" } else { "Unpinned" });
    }

    pub fn toggle_theme(&mut self) {
        self.panel.theme = self.panel.theme.toggled();
        self.prefs.set_theme(self.panel.theme);
        self.save_prefs();
    }

    /// Switch the simulated environment and remount the feed, so the new
    /// environment applies from a fresh list
    pub fn toggle_env(&mut self) {
        let env = self.log.env().toggled();
        self.prefs.set_simulated_env(Some(env));
        self.save_prefs();

        self.feed = LogFeed::mount(&self.log);
        self.last_revision = self.feed.revision();
        self.panel.reset();

        self.log.force(args!["Simulated environment:", env.as_str()]);
        self.set_status(format!("Environment: {}", env));
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let row_count = self.rows().len();
        self.panel.move_selection(delta, row_count);
    }

    pub(super) fn select_first(&mut self) {
        self.panel.selected = if self.feed.is_empty() { None } else { Some(0) };
        self.panel.deep = false;
    }

    fn save_prefs(&mut self) {
        if let Err(e) = self.prefs.save() {
            warn!("{}", e);
            self.set_status(e.to_string());
        }
    }

    // =========================================================================
    // Log actions
    // =========================================================================

    pub fn clear_logs(&mut self) {
        self.log.clear();
        self.set_status("Logs cleared");
    }

    /// Copy the selected row, or the newest one, to the clipboard
    pub fn copy_selected(&mut self) {
        let rows = self.rows();
        let row = match self.panel.selected {
            Some(i) => rows.get(i),
            None => rows.last(),
        };
        let Some(row) = row else {
            self.set_status("Nothing to copy");
            return;
        };

        match operations::copy_to_clipboard(&entry_text(&row.entry)) {
            Ok(()) => {
                self.panel.mark_copied(row.index);
                self.set_status("Copied");
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub fn export_logs(&mut self) {
        let result = operations::export_logs(
            &self.feed.entries(),
            self.config.display.export_max,
            &operations::export_dir(),
        );
        match result {
            Ok(summary) => self.set_status(format!(
                "Exported {} logs to {}",
                summary.line_count,
                summary.path.display()
            )),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Panic inside the app and recover, leaving the report in the log
    pub fn raise_panic(&mut self) {
        let result = panic::catch_unwind(|| panic!("Simulated crash from the overlay"));
        if result.is_err() {
            capture::flush();
            self.set_status("Panic captured");
        }
    }

    /// Log a fatal error while the feed is still mounted
    pub fn report_error(&mut self, err: &(dyn std::error::Error + 'static)) {
        capture::report_error(&self.log, err);
        self.poll();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
