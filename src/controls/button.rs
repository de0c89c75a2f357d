//! Push buttons and what they produce when activated

use crate::config::Colors;
use crate::dialog::Dialog;
use ratatui::text::{Line, Span};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

/// Action names the dialog binds to its escape/validate/refresh sentinels
pub const CANCEL: &str = "Cancel";
pub const VALIDATE: &str = "Validate";
pub const REFRESH: &str = "Refresh";
pub const BACK: &str = "Back";
pub const EXIT: &str = "Exit";

/// How an activated button is turned into a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationKind {
    Value,
    Scriptblock,
    Action,
    ActionScriptblock,
}

impl ActivationKind {
    pub fn is_action(self) -> bool {
        matches!(self, ActivationKind::Action | ActivationKind::ActionScriptblock)
    }
}

/// Deferred computation handed back to the caller in a result
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(&Dialog) -> Value>);

impl Callback {
    pub fn new(f: impl Fn(&Dialog) -> Value + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, dialog: &Dialog) -> Value {
        (self.0)(dialog)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback")
    }
}

#[derive(Debug, Clone)]
pub enum Payload {
    Value(Value),
    Callback(Callback),
}

impl Payload {
    /// JSON view of the payload; callbacks have none
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Payload::Value(v) => Some(v),
            Payload::Callback(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Button {
    text: String,
    activation: ActivationKind,
    action_name: Option<String>,
    payload: Option<Payload>,
    selected_properties: Option<Vec<String>>,
}

impl Button {
    /// Button producing `Result::Action { name }`
    pub fn action(text: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            activation: ActivationKind::Action,
            action_name: Some(name.into()),
            payload: None,
            selected_properties: None,
        }
    }

    /// Button producing `Result::Action { name, value }`
    pub fn action_with_value(text: impl Into<String>, name: impl Into<String>, value: Value) -> Self {
        Self {
            payload: Some(Payload::Value(value)),
            ..Self::action(text, name)
        }
    }

    /// Button producing `Result::Action` carrying a callback as its value
    pub fn action_callback(
        text: impl Into<String>,
        name: impl Into<String>,
        f: impl Fn(&Dialog) -> Value + 'static,
    ) -> Self {
        Self {
            activation: ActivationKind::ActionScriptblock,
            payload: Some(Payload::Callback(Callback::new(f))),
            ..Self::action(text, name)
        }
    }

    /// Button producing `Result::Value`
    pub fn value(text: impl Into<String>, value: Value) -> Self {
        Self {
            text: text.into(),
            activation: ActivationKind::Value,
            action_name: None,
            payload: Some(Payload::Value(value)),
            selected_properties: None,
        }
    }

    /// Button producing `Result::Scriptblock`
    pub fn callback(text: impl Into<String>, f: impl Fn(&Dialog) -> Value + 'static) -> Self {
        Self {
            text: text.into(),
            activation: ActivationKind::Scriptblock,
            action_name: None,
            payload: Some(Payload::Callback(Callback::new(f))),
            selected_properties: None,
        }
    }

    /// Payload-less button; Enter falls through it to the validate target
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            activation: ActivationKind::Value,
            action_name: None,
            payload: None,
            selected_properties: None,
        }
    }

    pub fn with_selected_properties(mut self, properties: Vec<String>) -> Self {
        self.selected_properties = Some(properties);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn activation(&self) -> ActivationKind {
        self.activation
    }

    pub fn action_name(&self) -> Option<&str> {
        self.action_name.as_deref()
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    pub fn selected_properties(&self) -> Option<&[String]> {
        self.selected_properties.as_deref()
    }

    /// Whether this button carries the given sentinel action
    pub fn is_action(&self, name: &str) -> bool {
        self.activation.is_action() && self.action_name.as_deref() == Some(name)
    }

    pub fn width(&self) -> usize {
        self.text.width() + 4
    }

    pub fn draw(&self, focused: bool, colors: Colors) -> Line<'static> {
        let label = if focused {
            format!("[ {} ]", self.text)
        } else {
            format!("< {} >", self.text)
        };
        Line::from(Span::styled(label, colors.style(focused)))
    }
}
