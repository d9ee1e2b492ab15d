//! Input event handling
//!
//! Translates keyboard events into app commands.

use crate::demo::Sample;
use crossterm::event::{KeyCode, KeyEvent};

/// Command to execute on the App
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    Quit,

    // Panel
    ToggleExpanded,
    TogglePin,
    ToggleTheme,
    ToggleEnv,

    // Selection
    SelectUp,
    SelectDown,
    SelectPageUp,
    SelectPageDown,
    SelectFirst,
    SelectNewest,
    ToggleDeep,

    // Log actions
    ClearLogs,
    CopySelected,
    ExportLogs,

    // Samples
    Emit(Sample),
    RaisePanic,

    None,
}

/// Translate a key press into an AppCommand
pub fn translate_key(key: KeyEvent) -> AppCommand {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => AppCommand::Quit,

        // Panel
        KeyCode::Char(' ') => AppCommand::ToggleExpanded,
        KeyCode::Char('p') | KeyCode::Char('P') => AppCommand::TogglePin,
        KeyCode::Char('t') | KeyCode::Char('T') => AppCommand::ToggleTheme,
        KeyCode::Char('e') | KeyCode::Char('E') => AppCommand::ToggleEnv,

        // Selection
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => AppCommand::SelectUp,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => AppCommand::SelectDown,
        KeyCode::PageUp => AppCommand::SelectPageUp,
        KeyCode::PageDown => AppCommand::SelectPageDown,
        KeyCode::Home => AppCommand::SelectFirst,
        KeyCode::End => AppCommand::SelectNewest,
        KeyCode::Enter => AppCommand::ToggleDeep,

        // Log actions
        KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Backspace => AppCommand::ClearLogs,
        KeyCode::Char('y') | KeyCode::Char('Y') => AppCommand::CopySelected,
        KeyCode::Char('x') | KeyCode::Char('X') => AppCommand::ExportLogs,

        // Samples
        KeyCode::Char('!') => AppCommand::RaisePanic,
        KeyCode::Char(digit) if digit.is_ascii_digit() => match Sample::from_digit(digit) {
            Some(sample) => AppCommand::Emit(sample),
            None => AppCommand::None,
        },

        _ => AppCommand::None,
    }
}
