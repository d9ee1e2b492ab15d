//! Command execution
//!
//! Translates AppCommand into method calls on App.

use super::App;
use crate::constants::PAGE_SCROLL_LINES;
use crate::input::AppCommand;

impl App {
    /// Execute an application command. Returns true if app should quit.
    pub fn execute_command(&mut self, cmd: AppCommand) -> bool {
        match cmd {
            AppCommand::Quit => {
                self.quit();
                true
            }
            AppCommand::ToggleExpanded => {
                self.toggle_expanded();
                false
            }
            AppCommand::TogglePin => {
                self.toggle_pin();
                false
            }
            AppCommand::ToggleTheme => {
                self.toggle_theme();
                false
            }
            AppCommand::ToggleEnv => {
                self.toggle_env();
                false
            }
            AppCommand::SelectUp => {
                self.move_selection(-1);
                false
            }
            AppCommand::SelectDown => {
                self.move_selection(1);
                false
            }
            AppCommand::SelectPageUp => {
                self.move_selection(-(PAGE_SCROLL_LINES as isize));
                false
            }
            AppCommand::SelectPageDown => {
                self.move_selection(PAGE_SCROLL_LINES as isize);
                false
            }
            AppCommand::SelectFirst => {
                self.select_first();
                false
            }
            AppCommand::SelectNewest => {
                self.panel.selected = None;
                self.panel.deep = false;
                false
            }
            AppCommand::ToggleDeep => {
                if self.panel.selected.is_some() {
                    self.panel.deep = !self.panel.deep;
                }
                false
            }
            AppCommand::ClearLogs => {
                self.clear_logs();
                false
            }
            AppCommand::CopySelected => {
                self.copy_selected();
                false
            }
            AppCommand::ExportLogs => {
                self.export_logs();
                false
            }
            AppCommand::Emit(sample) => {
                sample.emit(&self.log);
                false
            }
            AppCommand::RaisePanic => {
                self.raise_panic();
                false
            }
            AppCommand::None => false,
        }
    }
}
