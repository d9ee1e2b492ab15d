//! Log operations - clipboard and file export

use crate::error::{DevlogError, Result};
use crate::logging::LogEntry;
use crate::ui::view::export_text;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

// =============================================================================
// Clipboard
// =============================================================================

/// Put text on the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| DevlogError::Clipboard {
        message: e.to_string(),
    })?;
    clipboard
        .set_text(text)
        .map_err(|e| DevlogError::Clipboard {
            message: e.to_string(),
        })
}

// =============================================================================
// File Export
// =============================================================================

/// Outcome of a successful export
#[derive(Debug)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub line_count: usize,
}

/// Write the most recent `max` entries to a timestamped file in `dir`
pub fn export_logs(entries: &[Rc<LogEntry>], max: usize, dir: &Path) -> Result<ExportSummary> {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("devlog-{}.txt", timestamp));

    let text = export_text(entries, max);
    let line_count = entries.len().min(max);

    fs::write(&path, text).map_err(|e| DevlogError::Io {
        path: path.clone(),
        source: e,
    })?;

    Ok(ExportSummary { path, line_count })
}

/// Directory exports are written to
pub fn export_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir())
}
