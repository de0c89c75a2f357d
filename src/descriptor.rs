//! Declarative dialog descriptions
//!
//! A descriptor lists items tagged by `kind`. Items are decoded one at a
//! time so an unknown kind or a nested row reports a `BuildError` instead
//! of a generic parse failure.

use crate::config::Config;
use crate::controls::{Button, Control, Separator, TextBox};
use crate::dialog::{Dialog, DialogBuilder};
use crate::error::BuildError;
use crate::keys;
use crate::row::{Orientation, Row};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogDescriptor {
    pub items: Vec<Value>,
    pub hidden_shortcuts: Vec<Value>,
    pub escape: Option<String>,
    pub validate: Option<String>,
    pub refresh: Option<String>,
    pub focused_row: Option<usize>,
    /// Property identifying objects bound to check boxes; enables the
    /// selection array
    pub unique_property: Option<String>,
    pub show_error_details: Option<bool>,
    pub pause_after_errors: Option<bool>,
}

/// Attributes every control item may carry
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Common {
    name: Option<String>,
    shortcut: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TextItem {
    text: String,
}

#[derive(Debug, Deserialize)]
struct PropertyItem {
    header: String,
    #[serde(default)]
    value: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SeparatorItem {
    text: Option<String>,
    fill: Option<char>,
    length: Option<usize>,
    page: Option<(usize, usize)>,
}

#[derive(Debug, Deserialize)]
struct SpaceItem {
    #[serde(default = "one")]
    width: usize,
    #[serde(default = "one")]
    height: usize,
}

fn one() -> usize {
    1
}

#[derive(Debug, Deserialize)]
struct TextBoxItem {
    header: String,
    #[serde(default)]
    text: String,
    regex: Option<String>,
    password_char: Option<char>,
    field_width: Option<usize>,
    error_field: Option<String>,
    error_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ButtonItem {
    text: String,
    action: Option<String>,
    value: Option<Value>,
    selected_properties: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ToggleItem {
    text: String,
    #[serde(default)]
    checked: bool,
    bound: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RowItem {
    #[serde(default)]
    orientation: OrientationItem,
    header: Option<String>,
    name: Option<String>,
    #[serde(default)]
    mandatory: bool,
    items: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum OrientationItem {
    #[default]
    Horizontal,
    Vertical,
}

fn kind_of(item: &Value) -> Result<&str, BuildError> {
    match item.get("kind") {
        Some(Value::String(kind)) => Ok(kind.as_str()),
        Some(other) => Err(BuildError::UnknownKind(other.to_string())),
        None => Err(BuildError::MissingKind),
    }
}

fn decode<T: DeserializeOwned>(kind: &str, item: &Value) -> Result<T, BuildError> {
    serde_json::from_value(item.clone()).map_err(|e| BuildError::Malformed {
        kind: kind.to_string(),
        message: e.to_string(),
    })
}

/// Decode a single control item
fn control(item: &Value) -> Result<Control, BuildError> {
    let kind = kind_of(item)?;
    let control = match kind {
        "text" => Control::text(decode::<TextItem>(kind, item)?.text),
        "property" => {
            let p: PropertyItem = decode(kind, item)?;
            Control::property(p.header, p.value)
        }
        "separator" => {
            let s: SeparatorItem = decode(kind, item)?;
            let mut separator = Separator::new();
            if let Some(length) = s.length {
                separator = separator.with_length(length);
            }
            if let Some(text) = s.text {
                separator = separator.with_text(text);
            }
            if let Some(fill) = s.fill {
                separator = separator.with_fill(fill);
            }
            if let Some((current, total)) = s.page {
                separator = separator.with_page(current, total);
            }
            Control::separator(separator)
        }
        "space" => {
            let s: SpaceItem = decode(kind, item)?;
            Control::space(s.width, s.height)
        }
        "textbox" => {
            let t: TextBoxItem = decode(kind, item)?;
            let mut text_box = TextBox::new(t.header, t.text);
            if let Some(pattern) = &t.regex {
                text_box = text_box.with_regex(pattern)?;
            }
            if let Some(c) = t.password_char {
                text_box = text_box.with_password_char(c);
            }
            if let Some(width) = t.field_width {
                text_box = text_box.with_field_width(width);
            }
            if t.error_field.is_some() || t.error_reason.is_some() {
                text_box = text_box.with_error(t.error_field, t.error_reason);
            }
            Control::text_box(text_box)
        }
        "button" => {
            let b: ButtonItem = decode(kind, item)?;
            let button = match (b.action, b.value) {
                (Some(action), Some(value)) => Button::action_with_value(b.text, action, value),
                (Some(action), None) => Button::action(b.text, action),
                (None, Some(value)) => Button::value(b.text, value),
                (None, None) => Button::placeholder(b.text),
            };
            let button = match b.selected_properties {
                Some(properties) => button.with_selected_properties(properties),
                None => button,
            };
            Control::button(button)
        }
        "checkbox" | "radiobutton" => {
            let t: ToggleItem = decode(kind, item)?;
            let control = if kind == "checkbox" {
                Control::checkbox(t.text, t.checked)
            } else {
                Control::radio(t.text, t.checked)
            };
            match t.bound {
                Some(object) => control.bound_to(object),
                None => control,
            }
        }
        "row" => return Err(BuildError::NestedRow),
        other => return Err(BuildError::UnknownKind(other.to_string())),
    };
    with_common(control, item)
}

fn with_common(mut control: Control, item: &Value) -> Result<Control, BuildError> {
    let common: Common = decode(control.kind().label(), item)?;
    if let Some(name) = common.name {
        control = control.named(name);
    }
    if let Some(shortcut) = common.shortcut {
        let code = keys::parse_key(&shortcut).ok_or(BuildError::InvalidShortcut(shortcut))?;
        control = control.with_shortcut(code);
    }
    Ok(control)
}

/// Decode a top-level item: a row, or a control wrapped into its own row
fn row(item: &Value) -> Result<Row, BuildError> {
    if kind_of(item)? != "row" {
        return control(item).map(Row::single);
    }
    let r: RowItem = decode("row", item)?;
    let content = r.items.iter().map(control).collect::<Result<Vec<_>, _>>()?;
    let orientation = match r.orientation {
        OrientationItem::Horizontal => Orientation::Horizontal,
        OrientationItem::Vertical => Orientation::Vertical,
    };
    let mut row = Row::new(orientation, content);
    if let Some(header) = r.header {
        row = row.with_header(header);
    }
    if let Some(name) = r.name {
        row = row.named(name);
    }
    if r.mandatory {
        row = row.mandatory();
    }
    Ok(row)
}

impl DialogDescriptor {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("Failed to parse dialog JSON")
    }

    pub fn from_yaml(s: &str) -> Result<Self> {
        serde_yaml::from_str(s).context("Failed to parse dialog YAML")
    }

    /// Load a `.json`, `.yaml` or `.yml` file
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&contents),
            _ => Self::from_json(&contents),
        }
    }

    pub fn builder(&self, config: Config) -> Result<DialogBuilder, BuildError> {
        let mut builder = Dialog::builder().config(config);
        for item in &self.items {
            builder = builder.row(row(item)?);
        }
        for item in &self.hidden_shortcuts {
            builder = builder.hidden_shortcut(control(item)?);
        }
        if let Some(name) = &self.escape {
            builder = builder.escape_target(name);
        }
        if let Some(name) = &self.validate {
            builder = builder.validate_target(name);
        }
        if let Some(name) = &self.refresh {
            builder = builder.refresh_target(name);
        }
        if let Some(index) = self.focused_row {
            builder = builder.focused_row(index);
        }
        if let Some(property) = &self.unique_property {
            builder = builder.selection(Rc::new(RefCell::new(Vec::new())), property);
        }
        if let Some(show) = self.show_error_details {
            builder = builder.show_error_details(show);
        }
        if let Some(pause) = self.pause_after_errors {
            builder = builder.pause_after_errors(pause);
        }
        Ok(builder)
    }

    pub fn build(&self, config: Config) -> Result<Dialog, BuildError> {
        self.builder(config)?.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{ControlId, ControlKind};
    use crossterm::event::KeyCode;
    use serde_json::json;

    fn build(value: Value) -> Result<Dialog, BuildError> {
        let descriptor: DialogDescriptor = serde_json::from_value(value).unwrap();
        descriptor.build(Config::default())
    }

    #[test]
    fn test_login_form_from_json() {
        let dialog = DialogDescriptor::from_json(
            r#"{
                "items": [
                    {"kind": "text", "text": "Sign in"},
                    {"kind": "textbox", "header": "User", "regex": "^.+$", "name": "user"},
                    {"kind": "textbox", "header": "Password", "password_char": "*"},
                    {"kind": "row", "items": [
                        {"kind": "button", "text": "OK", "action": "Validate"},
                        {"kind": "button", "text": "Cancel", "action": "Cancel", "shortcut": "Esc"}
                    ]}
                ]
            }"#,
        )
        .unwrap()
        .build(Config::default())
        .unwrap();

        assert_eq!(dialog.rows().len(), 4);
        assert_eq!(dialog.static_rows(), &[0]);
        assert_eq!(dialog.validate_target(), Some(ControlId { row: 3, item: 0 }));
        assert_eq!(dialog.escape_target(), Some(ControlId { row: 3, item: 1 }));
        assert_eq!(dialog.find("user").map(Control::kind), Some(ControlKind::TextBox));
        assert!(!dialog.is_valid_form());
    }

    #[test]
    fn test_yaml_descriptor() {
        let yaml = r#"
items:
  - kind: row
    header: Size
    mandatory: true
    orientation: vertical
    items:
      - { kind: radiobutton, text: Small, checked: true }
      - { kind: radiobutton, text: Large, bound: { code: L } }
  - kind: checkbox
    text: Gift wrap
    shortcut: g
unique_property: code
"#;
        let dialog = DialogDescriptor::from_yaml(yaml).unwrap().build(Config::default()).unwrap();
        assert!(dialog.rows()[0].is_radio_group());
        assert!(dialog.rows()[0].is_mandatory());
        assert_eq!(dialog.rows()[1].content()[0].shortcut(), Some(KeyCode::Char('g')));
        assert!(dialog.selection().is_some());
        assert_eq!(dialog.get_value(false)["Size"], json!("Small"));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = build(json!({"items": [{"kind": "slider"}]})).unwrap_err();
        assert!(matches!(err, BuildError::UnknownKind(k) if k == "slider"));
    }

    #[test]
    fn test_missing_kind_is_rejected() {
        let err = build(json!({"items": [{"text": "hello"}]})).unwrap_err();
        assert!(matches!(err, BuildError::MissingKind));
    }

    #[test]
    fn test_nested_row_is_rejected() {
        let err = build(json!({"items": [
            {"kind": "row", "items": [{"kind": "row", "items": []}]}
        ]}))
        .unwrap_err();
        assert!(matches!(err, BuildError::NestedRow));
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let err = build(json!({"items": [
            {"kind": "textbox", "header": "Zip", "regex": "[0-9"}
        ]}))
        .unwrap_err();
        assert!(matches!(err, BuildError::InvalidRegex { ref field, .. } if field == "Zip"));
    }

    #[test]
    fn test_malformed_item_is_rejected() {
        let err = build(json!({"items": [{"kind": "textbox"}]})).unwrap_err();
        assert!(matches!(err, BuildError::Malformed { ref kind, .. } if kind == "textbox"));
    }

    #[test]
    fn test_invalid_shortcut_is_rejected() {
        let err = build(json!({"items": [
            {"kind": "checkbox", "text": "A", "shortcut": "Hyper"}
        ]}))
        .unwrap_err();
        assert!(matches!(err, BuildError::InvalidShortcut(_)));
    }

    #[test]
    fn test_button_shapes() {
        let dialog = build(json!({"items": [{"kind": "row", "items": [
            {"kind": "button", "text": "Back", "action": "Back", "value": 1},
            {"kind": "button", "text": "Pick", "value": {"Id": 3}},
            {"kind": "button", "text": "Noop"}
        ]}]}))
        .unwrap();
        let row = &dialog.rows()[0];
        assert!(row.content()[0].as_button().unwrap().is_action("Back"));
        assert!(row.content()[1].as_button().unwrap().has_payload());
        assert!(!row.content()[2].as_button().unwrap().has_payload());
    }
}
