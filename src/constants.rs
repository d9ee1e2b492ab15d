//! Application-wide constants
//!
//! Centralized constants to avoid duplication and ensure consistency.

// =============================================================================
// Formatting
// =============================================================================

/// Replaces a reference that was already visited during serialization
pub const CIRCULAR_SENTINEL: &str = "[Circular]";

/// Largest integer an f64 represents exactly (2^53 - 1)
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Timestamp format used by the panel
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Shown when an entry has no timestamp
pub const EMPTY_TIME: &str = "00:00:00";

// =============================================================================
// Environment
// =============================================================================

/// Process variable carrying an explicit deploy environment
pub const DEPLOY_ENV_VAR: &str = "DEVLOG_ENV";

/// Process variable carrying the generic build mode
pub const BUILD_MODE_VAR: &str = "DEVLOG_MODE";

/// Tracing target used for the native console mirror
pub const CONSOLE_TARGET: &str = "devlog::console";

// =============================================================================
// Files
// =============================================================================

/// Default config file name (working directory)
pub const DEFAULT_CONFIG_FILE: &str = "devlog.toml";

/// Default preferences file name (working directory)
pub const DEFAULT_PREFS_FILE: &str = "devlog-prefs.toml";

/// Default file receiving console mirror output while the overlay owns the terminal
pub const DEFAULT_CONSOLE_LOG_FILE: &str = "devlog-console.log";

/// Default maximum entries written by an export
pub const DEFAULT_EXPORT_MAX: usize = 2000;

// =============================================================================
// UI
// =============================================================================

/// Frame duration for TUI loop (milliseconds, ~60 FPS)
pub const FRAME_DURATION_MS: u64 = 16;

/// How long the copied marker stays on an entry (seconds)
pub const COPIED_MARKER_SECS: u64 = 2;

/// Status message display timeout (seconds)
pub const STATUS_MESSAGE_TIMEOUT_SECS: u64 = 2;

/// Width of the expanded panel
pub const PANEL_WIDTH: u16 = 64;

/// Size of the collapsed badge
pub const BADGE_WIDTH: u16 = 9;
pub const BADGE_HEIGHT: u16 = 3;

/// Number of entries to move per page (PageUp/PageDown)
pub const PAGE_SCROLL_LINES: usize = 10;
