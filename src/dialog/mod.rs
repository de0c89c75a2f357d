//! Dialog - Orchestrates rows, focus and the input loop
//!
//! Rows are split once at construction into a static prefix (drawn once per
//! invocation) and a dynamic suffix (redrawn after every key). Focus moves
//! between the rows that hold at least one interactive control.

mod dispatch;
mod invoke;
mod navigation;
mod selection;
mod validation;

pub use selection::Selection;
pub use validation::FieldError;

use crate::component::{Component, RenderContext};
use crate::config::Config;
use crate::controls::{button, Control, ControlId, ControlKind};
use crate::error::BuildError;
use crate::row::Row;
use crossterm::event::KeyCode;
use ratatui::text::Line;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct Dialog {
    rows: Vec<Row>,
    /// Shortcut-only buttons; never drawn, ids use row `rows.len()`
    hidden: Row,
    static_rows: Vec<usize>,
    dynamic_rows: Vec<usize>,
    /// Rows holding at least one interactive control
    objects_index: Vec<usize>,
    /// Index into `objects_index`
    focused_row: usize,
    escape_target: Option<ControlId>,
    validate_target: Option<ControlId>,
    refresh_target: Option<ControlId>,
    hidden_shortcuts: HashMap<KeyCode, ControlId>,
    all_buttons: HashMap<KeyCode, ControlId>,
    selection: Option<Selection>,
    show_error_details: bool,
    pause_after_errors: bool,
    config: Config,
}

impl Dialog {
    pub fn builder() -> DialogBuilder {
        DialogBuilder::new()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn static_rows(&self) -> &[usize] {
        &self.static_rows
    }

    pub fn dynamic_rows(&self) -> &[usize] {
        &self.dynamic_rows
    }

    pub fn objects_index(&self) -> &[usize] {
        &self.objects_index
    }

    pub fn focused_row(&self) -> usize {
        self.focused_row
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn escape_target(&self) -> Option<ControlId> {
        self.escape_target
    }

    pub fn validate_target(&self) -> Option<ControlId> {
        self.validate_target
    }

    pub fn refresh_target(&self) -> Option<ControlId> {
        self.refresh_target
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    fn row(&self, index: usize) -> Option<&Row> {
        if index == self.rows.len() {
            Some(&self.hidden)
        } else {
            self.rows.get(index)
        }
    }

    fn row_mut(&mut self, index: usize) -> Option<&mut Row> {
        if index == self.rows.len() {
            Some(&mut self.hidden)
        } else {
            self.rows.get_mut(index)
        }
    }

    /// Look up a control by id, hidden shortcut buttons included
    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.row(id.row).and_then(|row| row.control(id.item))
    }

    pub fn control_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.row_mut(id.row).and_then(|row| row.control_mut(id.item))
    }

    /// First control carrying `name`
    pub fn find(&self, name: &str) -> Option<&Control> {
        self.rows
            .iter()
            .chain(std::iter::once(&self.hidden))
            .flat_map(|row| row.content())
            .find(|c| c.name() == name)
    }

    /// Index into `rows` of the focused row
    pub(crate) fn focused_row_index(&self) -> Option<usize> {
        self.objects_index.get(self.focused_row).copied()
    }

    pub fn get_focused_control(&self) -> Option<&Control> {
        self.focused_row_index()
            .and_then(|i| self.rows[i].focused_control())
    }

    /// Move focus to the `index`-th focusable row
    pub fn focus_row(&mut self, index: usize) -> Result<(), BuildError> {
        if index >= self.objects_index.len() {
            return Err(BuildError::InvalidFocus {
                index,
                focusable: self.objects_index.len(),
            });
        }
        self.focused_row = index;
        let row = self.objects_index[index];
        self.rows[row].focus_first();
        Ok(())
    }

    /// Align every header to the widest one
    pub fn realign(&mut self) {
        let location = self
            .rows
            .iter()
            .map(Row::header_width)
            .max()
            .unwrap_or(0);
        for row in &mut self.rows {
            row.set_separator_location(location);
        }
    }

    /// Restore every control to its construction-time value
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.reset();
        }
    }

    /// Current values keyed by control name or display text
    ///
    /// A radio group contributes one entry, the value of its enabled
    /// button; every other value-bearing control contributes its own.
    pub fn get_value(&self, use_name: bool) -> Map<String, Value> {
        let mut values = Map::new();
        for row in &self.rows {
            if row.is_radio_group() {
                let preferred = if use_name { row.name() } else { row.header() };
                let key = preferred
                    .or(row.name())
                    .or(row.header())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("row{}", row.id()));
                values.insert(key, row.get_value());
                continue;
            }
            for control in row.content() {
                if let Some(value) = control.value() {
                    let key = if use_name {
                        control.name()
                    } else {
                        control.display_text()
                    };
                    values.insert(key.to_string(), value);
                }
            }
        }
        values
    }

    fn render_context(&self, width: usize) -> RenderContext<'_> {
        RenderContext::new(&self.config.theme, width)
    }

    fn render_rows(&self, indices: &[usize], width: usize) -> Vec<Line<'static>> {
        let ctx = self.render_context(width);
        let focused = self.focused_row_index();
        indices
            .iter()
            .flat_map(|&i| {
                self.rows[i].draw_with_fill(focused == Some(i), &ctx, self.config.separator_char)
            })
            .collect()
    }

    pub fn render_static(&self, width: usize) -> Vec<Line<'static>> {
        self.render_rows(&self.static_rows, width)
    }

    pub fn render_dynamic(&self, width: usize) -> Vec<Line<'static>> {
        self.render_rows(&self.dynamic_rows, width)
    }

    /// Width the dialog asks for
    pub fn width(&self) -> usize {
        self.rows.iter().map(Component::width).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.iter().map(Component::height).sum()
    }
}

/// Builder for [`Dialog`]
#[derive(Debug, Default)]
pub struct DialogBuilder {
    rows: Vec<Row>,
    hidden: Vec<Control>,
    escape: Option<String>,
    validate: Option<String>,
    refresh: Option<String>,
    focused_row: Option<usize>,
    selection: Option<Selection>,
    config: Option<Config>,
    show_error_details: Option<bool>,
    pause_after_errors: Option<bool>,
}

impl DialogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Add a top-level control as a row of its own
    pub fn control(self, control: Control) -> Self {
        self.row(Row::single(control))
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Button bound to Escape, by control name
    pub fn escape_target(mut self, name: impl Into<String>) -> Self {
        self.escape = Some(name.into());
        self
    }

    /// Button bound to Enter, by control name
    pub fn validate_target(mut self, name: impl Into<String>) -> Self {
        self.validate = Some(name.into());
        self
    }

    /// Button bound to F5, by control name
    pub fn refresh_target(mut self, name: impl Into<String>) -> Self {
        self.refresh = Some(name.into());
        self
    }

    /// Button reachable only through its shortcut
    pub fn hidden_shortcut(mut self, control: Control) -> Self {
        self.hidden.push(control);
        self
    }

    pub fn focused_row(mut self, index: usize) -> Self {
        self.focused_row = Some(index);
        self
    }

    /// Keep `items` in sync with bound check boxes toggled by Space
    pub fn selection(mut self, items: Rc<RefCell<Vec<Value>>>, unique_property: impl Into<String>) -> Self {
        self.selection = Some(Selection::new(items, unique_property));
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn show_error_details(mut self, show: bool) -> Self {
        self.show_error_details = Some(show);
        self
    }

    pub fn pause_after_errors(mut self, pause: bool) -> Self {
        self.pause_after_errors = Some(pause);
        self
    }

    pub fn build(self) -> Result<Dialog, BuildError> {
        let config = self.config.unwrap_or_default();
        let mut rows = self.rows;
        for (i, row) in rows.iter_mut().enumerate() {
            row.attach(i);
        }

        for control in &self.hidden {
            if control.kind() != ControlKind::Button || control.shortcut().is_none() {
                return Err(BuildError::Malformed {
                    kind: control.kind().label().to_string(),
                    message: format!("hidden control {} must be a button with a shortcut", control.name()),
                });
            }
        }
        let mut hidden = Row::horizontal(self.hidden);
        hidden.attach(rows.len());

        // Prefix rule: everything after the first interactive row is dynamic
        let mut static_rows = Vec::new();
        let mut dynamic_rows = Vec::new();
        let mut objects_index = Vec::new();
        let mut crossed_into_dynamic = false;
        for (i, row) in rows.iter().enumerate() {
            let dynamic = row.is_dynamic_object();
            if dynamic {
                objects_index.push(i);
            }
            if crossed_into_dynamic || dynamic {
                crossed_into_dynamic = true;
                dynamic_rows.push(i);
            } else {
                static_rows.push(i);
            }
        }

        let mut all_buttons = HashMap::new();
        for row in &rows {
            for &(code, item) in row.shortcuts() {
                all_buttons.entry(code).or_insert(ControlId { row: row.id(), item });
            }
        }
        let hidden_shortcuts = hidden
            .shortcuts()
            .iter()
            .map(|&(code, item)| (code, ControlId { row: hidden.id(), item }))
            .collect();

        let mut dialog = Dialog {
            rows,
            hidden,
            static_rows,
            dynamic_rows,
            objects_index,
            focused_row: 0,
            escape_target: None,
            validate_target: None,
            refresh_target: None,
            hidden_shortcuts,
            all_buttons,
            selection: self.selection,
            show_error_details: self.show_error_details.unwrap_or(config.show_error_details),
            pause_after_errors: self.pause_after_errors.unwrap_or(config.pause_after_errors),
            config,
        };

        dialog.escape_target = dialog.resolve_target(self.escape.as_deref(), button::CANCEL)?;
        dialog.validate_target = dialog.resolve_target(self.validate.as_deref(), button::VALIDATE)?;
        dialog.refresh_target = dialog.resolve_target(self.refresh.as_deref(), button::REFRESH)?;

        dialog.realign();
        if let Some(index) = self.focused_row {
            dialog.focus_row(index)?;
        }

        log::debug!(
            "dialog built: {} rows, {} static, {} focusable",
            dialog.rows.len(),
            dialog.static_rows.len(),
            dialog.objects_index.len()
        );
        Ok(dialog)
    }
}

impl Dialog {
    /// Explicit target by name, else the first button carrying `action`
    fn resolve_target(&self, name: Option<&str>, action: &str) -> Result<Option<ControlId>, BuildError> {
        let buttons = || {
            self.rows
                .iter()
                .chain(std::iter::once(&self.hidden))
                .flat_map(|row| row.content())
                .filter(|c| c.kind() == ControlKind::Button)
        };

        match name {
            Some(name) => buttons()
                .find(|c| c.name() == name)
                .map(|c| Some(c.id()))
                .ok_or_else(|| BuildError::UnknownTarget(name.to_string())),
            None => Ok(buttons()
                .find(|c| c.as_button().is_some_and(|b| b.is_action(action)))
                .map(Control::id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{Button, Separator, TextBox};
    use crate::keys::{char_key, press, typed};
    use serde_json::json;

    fn form() -> Dialog {
        Dialog::builder()
            .control(Control::text("Edit user"))
            .control(Control::property("Id", "42"))
            .control(Control::text_box(TextBox::new("Name", "Ann")))
            .control(Control::separator(Separator::new()))
            .control(Control::checkbox("Admin", false))
            .row(Row::horizontal(vec![
                Control::button(Button::action("OK", button::VALIDATE)),
                Control::button(Button::action("Cancel", button::CANCEL)),
            ]))
            .control(Control::text("footer"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_prefix_classification() {
        let dialog = form();
        assert_eq!(dialog.static_rows(), &[0, 1]);
        assert_eq!(dialog.dynamic_rows(), &[2, 3, 4, 5, 6]);
        assert_eq!(dialog.objects_index(), &[2, 4, 5]);
    }

    #[test]
    fn test_all_static_dialog() {
        let dialog = Dialog::builder()
            .control(Control::text("a"))
            .control(Control::text("b"))
            .build()
            .unwrap();
        assert_eq!(dialog.static_rows(), &[0, 1]);
        assert!(dialog.dynamic_rows().is_empty());
        assert!(dialog.get_focused_control().is_none());
    }

    #[test]
    fn test_sentinels_auto_discovered() {
        let dialog = form();
        assert_eq!(dialog.validate_target(), Some(ControlId { row: 5, item: 0 }));
        assert_eq!(dialog.escape_target(), Some(ControlId { row: 5, item: 1 }));
        assert_eq!(dialog.refresh_target(), None);
    }

    #[test]
    fn test_explicit_target_by_name() {
        let dialog = Dialog::builder()
            .row(Row::horizontal(vec![
                Control::button(Button::value("Yes", json!(true))),
                Control::button(Button::value("No", json!(false))),
            ]))
            .escape_target("No")
            .build()
            .unwrap();
        assert_eq!(dialog.escape_target(), Some(ControlId { row: 0, item: 1 }));

        let err = Dialog::builder()
            .control(Control::button(Button::placeholder("Go")))
            .escape_target("Missing")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::UnknownTarget(_)));
    }

    #[test]
    fn test_invalid_initial_focus() {
        let err = Dialog::builder()
            .control(Control::checkbox("A", false))
            .focused_row(3)
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidFocus { index: 3, focusable: 1 }));
    }

    #[test]
    fn test_hidden_shortcut_requires_shortcut() {
        let err = Dialog::builder()
            .control(Control::checkbox("A", false))
            .hidden_shortcut(Control::button(Button::action("Help", "Help")))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::Malformed { .. }));
    }

    #[test]
    fn test_first_shortcut_wins() {
        let dialog = Dialog::builder()
            .control(Control::checkbox("Alpha", false).with_shortcut(KeyCode::Char('a')))
            .control(Control::checkbox("Again", false).with_shortcut(KeyCode::Char('A')))
            .build()
            .unwrap();
        assert_eq!(
            dialog.all_buttons.get(&KeyCode::Char('a')),
            Some(&ControlId { row: 0, item: 0 })
        );
    }

    #[test]
    fn test_realign_headers() {
        let mut dialog = Dialog::builder()
            .control(Control::property("Id", "42"))
            .control(Control::text_box(TextBox::new("Full name", "Ann")))
            .build()
            .unwrap();
        let lines = dialog.render_static(40);
        assert_eq!(lines[0].to_string(), "Id        : 42");

        dialog.rows[0] = Row::single(Control::property("Identifier", "42"));
        dialog.realign();
        let lines = dialog.render_static(40);
        assert_eq!(lines[0].to_string(), "Identifier : 42");
    }

    #[test]
    fn test_get_value_by_name_and_header() {
        let dialog = Dialog::builder()
            .control(Control::text_box(TextBox::new("First name", "Ann")).named("first"))
            .control(Control::checkbox("Admin", true))
            .row(
                Row::horizontal(vec![Control::radio("Red", false), Control::radio("Blue", true)])
                    .with_header("Color")
                    .named("color"),
            )
            .build()
            .unwrap();

        let by_header = dialog.get_value(false);
        assert_eq!(
            Value::Object(by_header),
            json!({"First name": "Ann", "Admin": true, "Color": "Blue"})
        );
        let by_name = dialog.get_value(true);
        let keys: Vec<&str> = by_name.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["first", "Admin", "color"]);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut dialog = Dialog::builder()
            .control(Control::text_box(TextBox::new("Name", "Ann")))
            .control(Control::checkbox("Admin", false))
            .row(Row::horizontal(vec![Control::radio("A", true), Control::radio("B", false)]))
            .build()
            .unwrap();
        let initial = dialog.get_value(false);

        for key in typed("ie") {
            dialog.press_key(key);
        }
        dialog.press_key(press(KeyCode::Down));
        dialog.press_key(char_key(' '));
        dialog.press_key(press(KeyCode::Down));
        dialog.press_key(press(KeyCode::Right));
        dialog.press_key(char_key(' '));
        assert_ne!(dialog.get_value(false), initial);

        dialog.reset();
        assert_eq!(dialog.get_value(false), initial);
        dialog.reset();
        assert_eq!(dialog.get_value(false), initial);
    }

    #[test]
    fn test_property_updated_through_control_mut() {
        let mut dialog = form();
        let id = ControlId { row: 1, item: 0 };
        if let Some(p) = dialog.control_mut(id).and_then(Control::as_property_mut) {
            p.set_value("43");
        }
        assert_eq!(dialog.render_static(40)[1].to_string(), "Id   : 43");
    }

    #[test]
    fn test_control_lookup_by_id() {
        let dialog = form();
        let id = ControlId { row: 2, item: 0 };
        assert_eq!(dialog.control(id).map(Control::name), Some("Name"));
        assert!(dialog.control(ControlId { row: 9, item: 0 }).is_none());
        assert_eq!(dialog.find("Cancel").map(Control::id), Some(ControlId { row: 5, item: 1 }));
    }
}
