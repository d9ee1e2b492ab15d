//! Panel state
//!
//! What the overlay shows besides the entries themselves.

use crate::constants::COPIED_MARKER_SECS;
use crate::prefs::Theme;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct PanelState {
    pub expanded: bool,
    pub pinned: bool,
    pub theme: Theme,
    /// Selected row; `None` follows the newest entry
    pub selected: Option<usize>,
    /// Fully expand the selected row's data
    pub deep: bool,
    copied: Option<(usize, Instant)>,
}

impl PanelState {
    pub fn new(theme: Theme, expanded: bool, pinned: bool) -> Self {
        Self {
            expanded: expanded || pinned,
            pinned,
            theme,
            selected: None,
            deep: false,
            copied: None,
        }
    }

    pub fn mark_copied(&mut self, index: usize) {
        self.copied = Some((index, Instant::now()));
    }

    /// Entry index whose copied marker is still showing
    pub fn copied(&self) -> Option<usize> {
        self.copied
            .filter(|(_, at)| at.elapsed() < Duration::from_secs(COPIED_MARKER_SECS))
            .map(|(index, _)| index)
    }

    /// Forget selection and markers (after a clear or remount)
    pub fn reset(&mut self) {
        self.selected = None;
        self.deep = false;
        self.copied = None;
    }

    /// Move the selection by `delta` rows within `row_count` rows.
    ///
    /// Moving up from no selection picks the newest row; moving down past it
    /// returns to following the newest entry.
    pub fn move_selection(&mut self, delta: isize, row_count: usize) {
        if row_count == 0 {
            self.selected = None;
            return;
        }
        let current = self.selected.unwrap_or(row_count) as isize;
        let target = current + delta;

        self.selected = if target >= row_count as isize {
            None
        } else {
            Some(target.max(0) as usize)
        };
        self.deep = false;
    }

    /// Keep the selection inside `row_count` rows
    pub fn clamp(&mut self, row_count: usize) {
        if let Some(selected) = self.selected {
            if selected >= row_count {
                self.selected = row_count.checked_sub(1);
            }
        }
    }
}
