//! Result of a completed invocation
//!
//! Every terminal control collapses into one of three shapes, picked by the
//! button's activation kind.

use crate::controls::button::{self, ActivationKind, Callback, Payload};
use crate::controls::{Control, ControlId};
use serde::Serialize;
use serde_json::{json, Value};

/// Dialog state captured when the terminal control fired
///
/// `control` is the id of the triggering control inside the dialog that
/// produced this result; look it up with `Dialog::control`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub control: ControlId,
    pub control_name: String,
    pub form_is_valid: bool,
}

#[derive(Debug, Clone)]
pub enum DialogResult {
    Action {
        name: String,
        value: Option<Payload>,
        /// `Some(0)` for `Back` actions, `None` otherwise
        depth: Option<u32>,
        snapshot: Snapshot,
    },
    Value {
        value: Value,
        selected_properties: Option<Vec<String>>,
        snapshot: Snapshot,
    },
    Scriptblock {
        callable: Callback,
        snapshot: Snapshot,
    },
}

impl DialogResult {
    /// Build the result for an activated button
    pub fn from_control(control: &Control, form_is_valid: bool) -> anyhow::Result<Self> {
        let button = control
            .as_button()
            .ok_or_else(|| anyhow::anyhow!("control {} is not a button", control.name()))?;
        let snapshot = Snapshot {
            control: control.id(),
            control_name: control.name().to_string(),
            form_is_valid,
        };

        let result = match button.activation() {
            ActivationKind::Value => DialogResult::Value {
                value: button
                    .payload()
                    .and_then(Payload::as_value)
                    .cloned()
                    .unwrap_or(Value::Null),
                selected_properties: button.selected_properties().map(<[String]>::to_vec),
                snapshot,
            },
            ActivationKind::Scriptblock => match button.payload() {
                Some(Payload::Callback(callable)) => DialogResult::Scriptblock {
                    callable: callable.clone(),
                    snapshot,
                },
                other => DialogResult::Value {
                    value: other.and_then(Payload::as_value).cloned().unwrap_or(Value::Null),
                    selected_properties: None,
                    snapshot,
                },
            },
            ActivationKind::Action | ActivationKind::ActionScriptblock => {
                let name = button.action_name().unwrap_or(button.text()).to_string();
                let depth = (name == button::BACK).then_some(0);
                DialogResult::Action {
                    name,
                    value: button.payload().cloned(),
                    depth,
                    snapshot,
                }
            }
        };
        Ok(result)
    }

    pub fn snapshot(&self) -> &Snapshot {
        match self {
            DialogResult::Action { snapshot, .. }
            | DialogResult::Value { snapshot, .. }
            | DialogResult::Scriptblock { snapshot, .. } => snapshot,
        }
    }

    pub fn action_name(&self) -> Option<&str> {
        match self {
            DialogResult::Action { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Cancel and Exit actions end a validating loop regardless of the form
    pub fn is_cancel_or_exit(&self) -> bool {
        matches!(self.action_name(), Some(button::CANCEL) | Some(button::EXIT))
    }

    /// JSON view; callbacks are reported by kind only
    pub fn to_json(&self) -> Value {
        match self {
            DialogResult::Action {
                name,
                value,
                depth,
                snapshot,
            } => json!({
                "type": "action",
                "name": name,
                "value": value.as_ref().map(payload_json).unwrap_or(Value::Null),
                "depth": depth,
                "snapshot": snapshot,
            }),
            DialogResult::Value {
                value,
                selected_properties,
                snapshot,
            } => json!({
                "type": "value",
                "value": value,
                "selected_properties": selected_properties,
                "snapshot": snapshot,
            }),
            DialogResult::Scriptblock { snapshot, .. } => json!({
                "type": "scriptblock",
                "snapshot": snapshot,
            }),
        }
    }
}

fn payload_json(payload: &Payload) -> Value {
    match payload {
        Payload::Value(v) => v.clone(),
        Payload::Callback(_) => json!("<callback>"),
    }
}
