//! Check boxes and radio buttons
//!
//! Both keep a checked flag plus the value to restore on reset. Mutual
//! exclusion between radio buttons is the owning row's job; a radio only
//! knows whether its group forbids deselecting it.

use crate::config::Colors;
use ratatui::text::{Line, Span};
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone)]
pub struct Toggle {
    text: String,
    enabled: bool,
    original_enabled: bool,
    bound_object: Option<Value>,
    /// Set by the owning row for radio buttons of a mandatory group
    pub(crate) mandatory: bool,
}

impl Toggle {
    pub fn new(text: impl Into<String>, enabled: bool) -> Self {
        Self {
            text: text.into(),
            enabled,
            original_enabled: enabled,
            bound_object: None,
            mandatory: false,
        }
    }

    pub fn bound_to(mut self, object: Value) -> Self {
        self.bound_object = Some(object);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn bound_object(&self) -> Option<&Value> {
        self.bound_object.as_ref()
    }

    /// Bound object, or the display text when nothing is bound
    pub fn value(&self) -> Value {
        self.bound_object
            .clone()
            .unwrap_or_else(|| Value::String(self.text.clone()))
    }

    /// Flip a check box
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Flip a radio button; returns false when a mandatory group keeps it on
    pub fn toggle_radio(&mut self) -> bool {
        if self.enabled && self.mandatory {
            return false;
        }
        self.enabled = !self.enabled;
        true
    }

    pub fn reset(&mut self) {
        self.enabled = self.original_enabled;
    }

    pub fn width(&self) -> usize {
        self.text.width() + 4
    }

    pub fn draw(&self, focused: bool, radio: bool, colors: Colors) -> Line<'static> {
        let mark = match (radio, self.enabled) {
            (false, true) => "[x]",
            (false, false) => "[ ]",
            (true, true) => "(•)",
            (true, false) => "( )",
        };
        Line::from(vec![
            Span::styled(mark.to_string(), colors.style(focused)),
            Span::styled(format!(" {}", self.text), colors.style(focused)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_checkbox_toggle_and_reset() {
        let mut t = Toggle::new("Remember me", false);
        t.toggle();
        assert!(t.is_enabled());
        t.toggle();
        t.toggle();
        t.reset();
        assert!(!t.is_enabled());
    }

    #[test]
    fn test_mandatory_radio_cannot_turn_off() {
        let mut t = Toggle::new("Red", true);
        t.mandatory = true;
        assert!(!t.toggle_radio());
        assert!(t.is_enabled());

        t.mandatory = false;
        assert!(t.toggle_radio());
        assert!(!t.is_enabled());
    }

    #[test]
    fn test_value_prefers_bound_object() {
        let t = Toggle::new("Alice", false).bound_to(json!({"Id": 1}));
        assert_eq!(t.value(), json!({"Id": 1}));
        assert_eq!(Toggle::new("Bob", false).value(), json!("Bob"));
    }

    #[test]
    fn test_draw_marks() {
        let colors = crate::config::Theme::default().toggle;
        assert_eq!(Toggle::new("A", true).draw(false, false, colors).to_string(), "[x] A");
        assert_eq!(Toggle::new("A", false).draw(false, true, colors).to_string(), "( ) A");
    }
}
