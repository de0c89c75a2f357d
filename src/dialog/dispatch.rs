//! Top-level key dispatch
//!
//! The focused row sees every key first. Whatever it hands back unhandled
//! is interpreted here: navigation, the escape/validate/refresh targets and
//! the dialog-wide shortcut table.

use super::Dialog;
use crate::component::Component;
use crate::controls::{ControlId, ControlKind};
use crate::keys;
use crate::outcome::{Direction, KeyOutcome};
use crate::row::Orientation;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

impl Dialog {
    /// Feed one key to the dialog
    ///
    /// Returns the terminal control the key activated, if any.
    pub fn press_key(&mut self, key: KeyEvent) -> Option<ControlId> {
        let Some(row) = self.focused_row_index() else {
            return self.dispatch_unhandled(key);
        };

        let outcome = self.rows[row].handle_key(key);
        log::debug!("row {} answered {:?} with {}", row, key.code, outcome);
        match outcome {
            KeyOutcome::Activated(id) => Some(id),
            KeyOutcome::Consumed => {
                if keys::is_space(&key) {
                    self.sync_focused_selection();
                }
                None
            }
            KeyOutcome::Bubbled(key) => {
                // Shortcut toggles of bound check boxes leave the selection alone
                log::debug!("bubbled {:?} from row {}", key.code, row);
                None
            }
            KeyOutcome::Reroute { direction, column } => {
                self.move_vertical(direction, column);
                None
            }
            KeyOutcome::Unhandled(key) => self.dispatch_unhandled(key),
        }
    }

    fn dispatch_unhandled(&mut self, key: KeyEvent) -> Option<ControlId> {
        if keys::is_back_tab(&key) {
            self.tab(false);
            return None;
        }
        match key.code {
            KeyCode::Tab => {
                self.tab(true);
                None
            }
            KeyCode::Up => {
                self.move_vertical(Direction::Up, None);
                None
            }
            KeyCode::Down => {
                self.move_vertical(Direction::Down, None);
                None
            }
            KeyCode::Left | KeyCode::Right if self.focused_row_is_horizontal() => {
                let direction = if key.code == KeyCode::Left {
                    Direction::Up
                } else {
                    Direction::Down
                };
                self.move_vertical(direction, None);
                None
            }
            KeyCode::Esc => {
                if self.escape_target.is_none() {
                    log::debug!("escape ignored: no escape target");
                }
                self.escape_target
            }
            KeyCode::Enter => self.enter_target(),
            KeyCode::F(5) => self
                .refresh_target
                .or_else(|| self.activate_shortcut(key)),
            KeyCode::Char(' ') if keys::is_printable(&key) => {
                if self.toggle_focused() {
                    self.sync_focused_selection();
                    return None;
                }
                self.activate_shortcut(key)
            }
            _ => self.activate_shortcut(key),
        }
    }

    fn focused_row_is_horizontal(&self) -> bool {
        self.focused_row_index()
            .is_some_and(|i| self.rows[i].orientation() == Orientation::Horizontal)
    }

    /// Focused button of a button row, else the validate target
    fn enter_target(&self) -> Option<ControlId> {
        let row = self.focused_row_index().map(|i| &self.rows[i]);
        if let Some(row) = row.filter(|r| r.is_homogeneous(ControlKind::Button)) {
            if let Some(control) = row.focused_control() {
                return Some(control.id());
            }
        }
        self.validate_target
    }

    /// Toggle the focused check box or radio button
    fn toggle_focused(&mut self) -> bool {
        let Some(row) = self.focused_row_index() else {
            return false;
        };
        let row = &mut self.rows[row];
        match row.focused_index() {
            Some(item) if row.content()[item].kind().is_toggle() => row.toggle(item),
            _ => false,
        }
    }

    /// Apply the selection sync for a Space toggle of the focused control
    pub(crate) fn sync_focused_selection(&self) {
        let (Some(selection), Some(control)) = (&self.selection, self.get_focused_control()) else {
            return;
        };
        if control.kind() != ControlKind::CheckBox {
            return;
        }
        let Some(toggle) = control.as_toggle() else {
            return;
        };
        if let Some(object) = toggle.bound_object() {
            selection.sync(object, toggle.is_enabled());
        }
    }

    /// Control bound to `key` in the hidden or dialog-wide shortcut table
    pub(crate) fn shortcut_target(&self, key: &KeyEvent) -> Option<ControlId> {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }
        let code = keys::normalize(key.code);
        self.hidden_shortcuts
            .get(&code)
            .or_else(|| self.all_buttons.get(&code))
            .copied()
    }

    /// Buttons activate; check boxes and radio buttons toggle in place
    fn activate_shortcut(&mut self, key: KeyEvent) -> Option<ControlId> {
        let id = self.shortcut_target(&key)?;
        let kind = self.control(id)?.kind();
        match kind {
            ControlKind::Button => {
                log::debug!("shortcut {:?} activates {}", key.code, id);
                Some(id)
            }
            ControlKind::CheckBox | ControlKind::RadioButton => {
                if let Some(row) = self.row_mut(id.row) {
                    row.toggle(id.item);
                }
                None
            }
            _ => None,
        }
    }
}
