//! Pure view helpers: time formatting, duplicate grouping, copy text

use crate::constants::{EMPTY_TIME, TIME_FORMAT};
use crate::logging::LogEntry;
use chrono::{DateTime, Local};
use std::rc::Rc;

/// `HH:MM:SS`, or `00:00:00` when there is no time
pub fn format_time(time: Option<&DateTime<Local>>) -> String {
    match time {
        Some(time) => time.format(TIME_FORMAT).to_string(),
        None => EMPTY_TIME.to_string(),
    }
}

/// A displayed row: one entry standing for `count` consecutive duplicates
#[derive(Debug, Clone)]
pub struct Row {
    /// The most recent entry of the run
    pub entry: Rc<LogEntry>,
    /// Index of that entry in the feed
    pub index: usize,
    pub count: usize,
}

/// Merge runs of consecutive entries with equal level and message.
///
/// Without grouping every entry is its own row.
pub fn group_duplicates(entries: &[Rc<LogEntry>], group: bool) -> Vec<Row> {
    let mut rows: Vec<Row> = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        if group {
            if let Some(last) = rows.last_mut() {
                if last.entry.level == entry.level && last.entry.message == entry.message {
                    last.entry = Rc::clone(entry);
                    last.index = index;
                    last.count += 1;
                    continue;
                }
            }
        }
        rows.push(Row {
            entry: Rc::clone(entry),
            index,
            count: 1,
        });
    }

    rows
}

/// Text placed on the clipboard for one entry
pub fn entry_text(entry: &LogEntry) -> String {
    entry.message.clone()
}

/// Plain-text line for exports: `HH:MM:SS [level] message`
pub fn export_line(entry: &LogEntry) -> String {
    format!(
        "{} [{}] {}",
        format_time(Some(&entry.timestamp)),
        entry.level,
        entry.message
    )
}

/// Export the most recent `max` entries as text, oldest first
pub fn export_text(entries: &[Rc<LogEntry>], max: usize) -> String {
    let start = entries.len().saturating_sub(max);
    entries[start..]
        .iter()
        .map(|e| export_line(e))
        .collect::<Vec<_>>()
        .join("\n")
}
