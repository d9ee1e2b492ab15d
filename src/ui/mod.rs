//! Terminal UI using ratatui
//!
//! Thin layer responsible only for terminal I/O. All business logic
//! is delegated to App via handle_key() and handle_scroll().

pub mod json;
pub mod theme;
pub mod view;
pub mod widgets;

use crate::app::App;
use crate::constants::FRAME_DURATION_MS;
use crate::error::{DevlogError, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io;
use widgets::{panel::LogPanel, status::StatusWidget};

/// Map io::Error to DevlogError::Terminal
fn map_io_err(e: io::Error) -> DevlogError {
    DevlogError::Terminal { source: e }
}

/// Run the TUI event loop
pub fn run(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode().map_err(map_io_err)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(map_io_err)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(map_io_err)?;

    let result = event_loop(&mut terminal, app);

    // Restore terminal even when the loop failed
    disable_raw_mode().map_err(map_io_err)?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(map_io_err)?;
    terminal.show_cursor().map_err(map_io_err)?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Pick up new entries
        app.poll();

        terminal.draw(|f| draw(f, app)).map_err(map_io_err)?;

        // Handle input with timeout
        if event::poll(std::time::Duration::from_millis(FRAME_DURATION_MS)).map_err(map_io_err)? {
            match event::read().map_err(map_io_err)? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => app.handle_scroll(true),
                    MouseEventKind::ScrollDown => app.handle_scroll(false),
                    _ => {}
                },
                _ => {}
            }
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let palette = app.palette();
    let panel = app.panel();
    let rows = app.rows();
    let entry_count = app.feed().len();

    // Host backdrop
    let status = StatusWidget::new(app.env(), entry_count, app.status_text(), palette);
    frame.render_widget(status, area);

    // Overlay (rendered on top)
    let overlay = LogPanel::new(&rows, entry_count, app.env(), palette)
        .expanded(panel.expanded)
        .pinned(panel.pinned)
        .selected(panel.selected)
        .copied(panel.copied())
        .deep(panel.deep);
    frame.render_widget(overlay, area);
}
