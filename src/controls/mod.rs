//! Dialog controls
//!
//! A `Control` wraps one widget of a closed set of kinds together with the
//! attributes every kind shares (name, shortcut, colors, position).

pub mod button;
pub mod static_text;
pub mod text_box;
pub mod toggle;

pub use button::{ActivationKind, Button, Callback, Payload};
pub use static_text::{Property, Separator, Space, Text};
pub use text_box::{TextBox, Validator};
pub use toggle::Toggle;

use crate::component::{Component, RenderContext};
use crate::config::Colors;
use crate::keys;
use crate::outcome::KeyOutcome;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::Line;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Position of a control inside its dialog
///
/// `row` identifies the owning row, `item` the slot inside that row. Radio
/// buttons use it to find their siblings; results use it to point back at
/// the control that ended the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ControlId {
    pub row: usize,
    pub item: usize,
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.item)
    }
}

/// Kind tag used for capability queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Text,
    Property,
    Separator,
    Space,
    TextBox,
    Button,
    CheckBox,
    RadioButton,
}

impl ControlKind {
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            ControlKind::TextBox
                | ControlKind::Button
                | ControlKind::CheckBox
                | ControlKind::RadioButton
        )
    }

    /// Kinds that can be switched on and off
    pub fn is_toggle(self) -> bool {
        matches!(self, ControlKind::CheckBox | ControlKind::RadioButton)
    }

    /// Kinds reachable through a keyboard shortcut
    pub fn takes_shortcut(self) -> bool {
        matches!(
            self,
            ControlKind::Button | ControlKind::CheckBox | ControlKind::RadioButton
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            ControlKind::Text => "text",
            ControlKind::Property => "property",
            ControlKind::Separator => "separator",
            ControlKind::Space => "space",
            ControlKind::TextBox => "textbox",
            ControlKind::Button => "button",
            ControlKind::CheckBox => "checkbox",
            ControlKind::RadioButton => "radiobutton",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Widget {
    Text(Text),
    Property(Property),
    Separator(Separator),
    Space(Space),
    TextBox(TextBox),
    Button(Button),
    CheckBox(Toggle),
    RadioButton(Toggle),
}

#[derive(Debug, Clone)]
pub struct Control {
    pub(crate) id: ControlId,
    name: String,
    shortcut: Option<KeyCode>,
    colors: Option<Colors>,
    widget: Widget,
}

/// Derive a name from display text: alphanumerics only
fn derive_name(text: &str, kind: ControlKind) -> String {
    let name: String = text.chars().filter(|c| c.is_alphanumeric()).collect();
    if name.is_empty() {
        kind.label().to_string()
    } else {
        name
    }
}

impl Control {
    pub fn new(widget: Widget) -> Self {
        let mut control = Self {
            id: ControlId::default(),
            name: String::new(),
            shortcut: None,
            colors: None,
            widget,
        };
        control.name = derive_name(control.display_text(), control.kind());
        control
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Widget::Text(Text::new(text)))
    }

    pub fn property(header: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(Widget::Property(Property::new(header, value)))
    }

    pub fn separator(separator: Separator) -> Self {
        Self::new(Widget::Separator(separator))
    }

    pub fn space(width: usize, height: usize) -> Self {
        Self::new(Widget::Space(Space::new(width, height)))
    }

    pub fn text_box(text_box: TextBox) -> Self {
        Self::new(Widget::TextBox(text_box))
    }

    pub fn button(button: Button) -> Self {
        Self::new(Widget::Button(button))
    }

    pub fn checkbox(text: impl Into<String>, checked: bool) -> Self {
        Self::new(Widget::CheckBox(Toggle::new(text, checked)))
    }

    pub fn radio(text: impl Into<String>, checked: bool) -> Self {
        Self::new(Widget::RadioButton(Toggle::new(text, checked)))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_shortcut(mut self, code: KeyCode) -> Self {
        self.shortcut = Some(keys::normalize(code));
        self
    }

    pub fn with_colors(mut self, colors: Colors) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Attach a bound object to a check box or radio button
    pub fn bound_to(mut self, object: Value) -> Self {
        if let Widget::CheckBox(t) | Widget::RadioButton(t) = &mut self.widget {
            *t = t.clone().bound_to(object);
        }
        self
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shortcut(&self) -> Option<KeyCode> {
        self.shortcut
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn kind(&self) -> ControlKind {
        match self.widget {
            Widget::Text(_) => ControlKind::Text,
            Widget::Property(_) => ControlKind::Property,
            Widget::Separator(_) => ControlKind::Separator,
            Widget::Space(_) => ControlKind::Space,
            Widget::TextBox(_) => ControlKind::TextBox,
            Widget::Button(_) => ControlKind::Button,
            Widget::CheckBox(_) => ControlKind::CheckBox,
            Widget::RadioButton(_) => ControlKind::RadioButton,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.kind().is_interactive()
    }

    /// Text shown to the user: label, header or button caption
    pub fn display_text(&self) -> &str {
        match &self.widget {
            Widget::Text(t) => t.text(),
            Widget::Property(p) => p.header(),
            Widget::Separator(_) | Widget::Space(_) => "",
            Widget::TextBox(t) => t.header(),
            Widget::Button(b) => b.text(),
            Widget::CheckBox(t) | Widget::RadioButton(t) => t.text(),
        }
    }

    pub fn as_text_box(&self) -> Option<&TextBox> {
        match &self.widget {
            Widget::TextBox(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_box_mut(&mut self) -> Option<&mut TextBox> {
        match &mut self.widget {
            Widget::TextBox(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_button(&self) -> Option<&Button> {
        match &self.widget {
            Widget::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_toggle(&self) -> Option<&Toggle> {
        match &self.widget {
            Widget::CheckBox(t) | Widget::RadioButton(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_toggle_mut(&mut self) -> Option<&mut Toggle> {
        match &mut self.widget {
            Widget::CheckBox(t) | Widget::RadioButton(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_property_mut(&mut self) -> Option<&mut Property> {
        match &mut self.widget {
            Widget::Property(p) => Some(p),
            _ => None,
        }
    }

    /// Header width for the aligned separator column, if this kind has one
    pub fn header_width(&self) -> Option<usize> {
        use unicode_width::UnicodeWidthStr;
        match &self.widget {
            Widget::TextBox(t) => Some(t.header().width()),
            Widget::Property(p) => Some(p.header().width()),
            _ => None,
        }
    }

    pub(crate) fn set_separator_location(&mut self, location: usize) {
        match &mut self.widget {
            Widget::TextBox(t) => t.set_separator_location(location),
            Widget::Property(p) => p.set_separator_location(location),
            _ => {}
        }
    }

    /// Current value of a value-bearing control
    pub fn value(&self) -> Option<Value> {
        match &self.widget {
            Widget::TextBox(t) => Some(Value::String(t.text().to_string())),
            Widget::CheckBox(t) => Some(Value::Bool(t.is_enabled())),
            Widget::RadioButton(t) => Some(Value::Bool(t.is_enabled())),
            _ => None,
        }
    }

    /// Flip a check box or radio button in place
    ///
    /// Radio exclusion is applied by the owning row, not here.
    pub(crate) fn toggle(&mut self) -> bool {
        match &mut self.widget {
            Widget::CheckBox(t) => {
                t.toggle();
                true
            }
            Widget::RadioButton(t) => t.toggle_radio(),
            _ => false,
        }
    }

    fn colors(&self, ctx: &RenderContext) -> Colors {
        if let Some(colors) = self.colors {
            return colors;
        }
        match self.kind() {
            ControlKind::Button => ctx.theme.button,
            ControlKind::CheckBox | ControlKind::RadioButton => ctx.theme.toggle,
            _ => ctx.theme.field,
        }
    }

    pub(crate) fn draw_with_fill(&self, focused: bool, ctx: &RenderContext, fill: char) -> Vec<Line<'static>> {
        let colors = self.colors(ctx);
        match &self.widget {
            Widget::Text(t) => t.draw(ctx),
            Widget::Property(p) => vec![p.draw(ctx)],
            Widget::Separator(s) => vec![s.draw(ctx, fill)],
            Widget::Space(s) => s.draw(),
            Widget::TextBox(t) => vec![t.draw(focused, colors, ctx)],
            Widget::Button(b) => vec![b.draw(focused, colors)],
            Widget::CheckBox(t) => vec![t.draw(focused, false, colors)],
            Widget::RadioButton(t) => vec![t.draw(focused, true, colors)],
        }
    }
}

impl Component for Control {
    fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let id = self.id;
        let shortcut_hit = self
            .shortcut
            .is_some_and(|code| keys::matches_shortcut(code, &key));
        let space = keys::is_space(&key);

        match &mut self.widget {
            Widget::TextBox(t) => t.handle_key(key),
            Widget::Button(b) => {
                let enter = key.code == KeyCode::Enter && b.has_payload();
                if space || enter || shortcut_hit {
                    KeyOutcome::Activated(id)
                } else {
                    KeyOutcome::Unhandled(key)
                }
            }
            Widget::CheckBox(t) if space || shortcut_hit => {
                t.toggle();
                KeyOutcome::Consumed
            }
            Widget::RadioButton(t) if space || shortcut_hit => {
                t.toggle_radio();
                KeyOutcome::Consumed
            }
            _ => KeyOutcome::Unhandled(key),
        }
    }

    fn draw(&self, focused: bool, ctx: &RenderContext) -> Vec<Line<'static>> {
        self.draw_with_fill(focused, ctx, '─')
    }

    fn width(&self) -> usize {
        match &self.widget {
            Widget::Text(t) => t.width(),
            Widget::Property(p) => p.width(),
            Widget::Separator(s) => s.width(),
            Widget::Space(s) => s.width,
            Widget::TextBox(t) => t.width(),
            Widget::Button(b) => b.width(),
            Widget::CheckBox(t) | Widget::RadioButton(t) => t.width(),
        }
    }

    fn height(&self) -> usize {
        match &self.widget {
            Widget::Text(t) => t.height(),
            Widget::Space(s) => s.height.max(1),
            _ => 1,
        }
    }

    fn reset(&mut self) {
        match &mut self.widget {
            Widget::TextBox(t) => t.reset(),
            Widget::CheckBox(t) | Widget::RadioButton(t) => t.reset(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{char_key, press};

    #[test]
    fn test_interactive_kinds() {
        assert!(Control::text_box(TextBox::new("Name", "")).is_interactive());
        assert!(Control::button(Button::placeholder("OK")).is_interactive());
        assert!(Control::checkbox("A", false).is_interactive());
        assert!(Control::radio("A", false).is_interactive());
        assert!(!Control::text("hello").is_interactive());
        assert!(!Control::property("Id", "1").is_interactive());
        assert!(!Control::separator(Separator::new()).is_interactive());
        assert!(!Control::space(1, 1).is_interactive());
    }

    #[test]
    fn test_name_derived_from_display_text() {
        assert_eq!(Control::checkbox("Remember me!", false).name(), "Rememberme");
        assert_eq!(Control::separator(Separator::new()).name(), "separator");
        assert_eq!(Control::checkbox("x", false).named("opt").name(), "opt");
    }

    #[test]
    fn test_button_space_always_activates() {
        let mut b = Control::button(Button::placeholder("Go"));
        assert_eq!(
            b.handle_key(char_key(' ')),
            KeyOutcome::Activated(ControlId::default())
        );
    }

    #[test]
    fn test_button_enter_requires_payload() {
        let mut placeholder = Control::button(Button::placeholder("Go"));
        assert!(placeholder.handle_key(press(KeyCode::Enter)).is_unhandled());

        let mut valued = Control::button(Button::value("Go", serde_json::json!(1)));
        assert!(valued.handle_key(press(KeyCode::Enter)).activated().is_some());
    }

    #[test]
    fn test_button_shortcut_activates() {
        let mut b = Control::button(Button::action("OK", "Validate"))
            .with_shortcut(KeyCode::Char('o'));
        assert!(b.handle_key(char_key('O')).activated().is_some());
        assert!(b.handle_key(char_key('x')).is_unhandled());
    }

    #[test]
    fn test_checkbox_space_toggles() {
        let mut c = Control::checkbox("A", false);
        assert_eq!(c.handle_key(char_key(' ')), KeyOutcome::Consumed);
        assert_eq!(c.value(), Some(Value::Bool(true)));
        assert!(c.handle_key(press(KeyCode::Enter)).is_unhandled());
    }

    #[test]
    fn test_reset_is_noop_for_static_kinds() {
        let mut t = Control::text("static");
        t.reset();
        assert_eq!(t.display_text(), "static");
    }

    #[test]
    fn test_custom_colors_override_theme() {
        use crate::config::{ColorPair, Theme};
        use ratatui::style::Color;

        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, 20);
        let red = ColorPair::new(Color::Red, Color::Reset);
        let c = Control::checkbox("A", false).with_colors(Colors::new(red, red));
        let line = &c.draw(false, &ctx)[0];
        assert_eq!(line.spans[0].style.fg, Some(Color::Red));
    }

    #[test]
    fn test_shortcut_is_normalized() {
        let c = Control::checkbox("A", false).with_shortcut(KeyCode::Char('A'));
        assert_eq!(c.shortcut(), Some(KeyCode::Char('a')));
    }
}
