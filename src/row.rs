//! Rows of controls
//!
//! A row lays its controls out horizontally or vertically, owns focus among
//! its interactive members and dispatches its members' shortcuts. To the
//! dialog a row is a single focusable unit.

use crate::component::{Component, RenderContext};
use crate::controls::{Control, ControlId, ControlKind};
use crate::keys;
use crate::outcome::{Direction, KeyOutcome};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::text::{Line, Span};
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone)]
pub struct Row {
    id: usize,
    name: Option<String>,
    header: Option<String>,
    separator_location: usize,
    content: Vec<Control>,
    /// Indices into `content` of interactive members
    focusable: Vec<usize>,
    /// Index into `focusable`
    focused_item: usize,
    orientation: Orientation,
    mandatory_radio_value: bool,
    /// (shortcut, content index) of every shortcut-bearing member
    shortcuts: Vec<(KeyCode, usize)>,
}

impl Row {
    pub fn new(orientation: Orientation, content: Vec<Control>) -> Self {
        let focusable = content
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_interactive())
            .map(|(i, _)| i)
            .collect();
        let mut row = Self {
            id: 0,
            name: None,
            header: None,
            separator_location: 0,
            content,
            focusable,
            focused_item: 0,
            orientation,
            mandatory_radio_value: false,
            shortcuts: Vec::new(),
        };
        row.attach(0);
        row
    }

    pub fn horizontal(content: Vec<Control>) -> Self {
        Self::new(Orientation::Horizontal, content)
    }

    pub fn vertical(content: Vec<Control>) -> Self {
        Self::new(Orientation::Vertical, content)
    }

    /// Row wrapping a single top-level control
    pub fn single(control: Control) -> Self {
        Self::horizontal(vec![control])
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        let header = header.into();
        self.separator_location = header.width();
        self.header = Some(header);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Forbid deselecting the enabled radio button of this group
    pub fn mandatory(mut self) -> Self {
        self.mandatory_radio_value = true;
        self.attach(self.id);
        self
    }

    /// Wire the row into its dialog slot: control ids, radio group flags
    /// and the shortcut table
    pub(crate) fn attach(&mut self, id: usize) {
        self.id = id;
        self.shortcuts.clear();
        for (item, control) in self.content.iter_mut().enumerate() {
            control.id = ControlId { row: id, item };
            if control.kind() == ControlKind::RadioButton {
                if let Some(t) = control.as_toggle_mut() {
                    t.mandatory = self.mandatory_radio_value;
                }
            }
            if let Some(code) = control.shortcut() {
                if control.kind().takes_shortcut() {
                    self.shortcuts.push((code, item));
                }
            }
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_mandatory(&self) -> bool {
        self.mandatory_radio_value
    }

    pub fn content(&self) -> &[Control] {
        &self.content
    }

    pub fn control(&self, item: usize) -> Option<&Control> {
        self.content.get(item)
    }

    pub fn control_mut(&mut self, item: usize) -> Option<&mut Control> {
        self.content.get_mut(item)
    }

    pub(crate) fn shortcuts(&self) -> &[(KeyCode, usize)] {
        &self.shortcuts
    }

    pub fn focusable_indices(&self) -> &[usize] {
        &self.focusable
    }

    pub fn focused_item(&self) -> usize {
        self.focused_item
    }

    /// Content index of the focused control
    pub fn focused_index(&self) -> Option<usize> {
        self.focusable.get(self.focused_item).copied()
    }

    pub fn focused_control(&self) -> Option<&Control> {
        self.focused_index().and_then(|i| self.content.get(i))
    }

    pub fn focused_control_mut(&mut self) -> Option<&mut Control> {
        let index = self.focused_index()?;
        self.content.get_mut(index)
    }

    pub fn set_focused_item(&mut self, item: usize) {
        self.focused_item = item.min(self.focusable.len().saturating_sub(1));
    }

    pub fn focus_first(&mut self) {
        self.focused_item = 0;
    }

    pub fn focus_last(&mut self) {
        self.focused_item = self.focusable.len().saturating_sub(1);
    }

    /// Contains at least one interactive control
    pub fn is_dynamic_object(&self) -> bool {
        !self.focusable.is_empty()
    }

    /// Every non-Space member is a radio button
    pub fn is_radio_group(&self) -> bool {
        let mut radios = 0;
        for control in &self.content {
            match control.kind() {
                ControlKind::Space => {}
                ControlKind::RadioButton => radios += 1,
                _ => return false,
            }
        }
        radios > 0
    }

    /// Every non-Space member is of `kind`
    pub fn is_homogeneous(&self, kind: ControlKind) -> bool {
        let mut members = self
            .content
            .iter()
            .filter(|c| c.kind() != ControlKind::Space)
            .peekable();
        members.peek().is_some() && members.all(|c| c.kind() == kind)
    }

    pub fn contains_kind(&self, kind: ControlKind) -> bool {
        self.content.iter().any(|c| c.kind() == kind)
    }

    /// Value of a radio group: the enabled radio's bound object or text
    pub fn get_value(&self) -> Value {
        self.content
            .iter()
            .filter_map(|c| match c.kind() {
                ControlKind::RadioButton => c.as_toggle(),
                _ => None,
            })
            .find(|t| t.is_enabled())
            .map(|t| t.value())
            .unwrap_or(Value::Null)
    }

    /// Toggle a member in place, enforcing radio exclusion
    ///
    /// Returns whether the member changed state.
    pub fn toggle(&mut self, item: usize) -> bool {
        let Some(control) = self.content.get_mut(item) else {
            return false;
        };
        let changed = control.toggle();
        if changed {
            self.exclude_siblings(item);
        }
        changed
    }

    /// Switch off every other radio button when `item` is an enabled radio
    fn exclude_siblings(&mut self, item: usize) {
        let enabled_radio = self.content.get(item).is_some_and(|c| {
            c.kind() == ControlKind::RadioButton && c.as_toggle().is_some_and(|t| t.is_enabled())
        });
        if !enabled_radio {
            return;
        }
        for (i, control) in self.content.iter_mut().enumerate() {
            if i != item && control.kind() == ControlKind::RadioButton {
                if let Some(t) = control.as_toggle_mut() {
                    t.set_enabled(false);
                }
            }
        }
    }

    /// (focusable position, width) of every button, in layout order
    pub(crate) fn button_columns(&self) -> Vec<(usize, usize)> {
        self.focusable
            .iter()
            .enumerate()
            .filter(|(_, &i)| self.content[i].kind() == ControlKind::Button)
            .map(|(pos, &i)| (pos, self.content[i].width()))
            .collect()
    }

    fn step(&mut self, delta: isize, key: KeyEvent) -> KeyOutcome {
        let target = self.focused_item as isize + delta;
        if target < 0 || target >= self.focusable.len() as isize {
            return KeyOutcome::Unhandled(key);
        }
        self.focused_item = target as usize;
        log::debug!("row {} focus -> item {}", self.id, self.focused_item);
        KeyOutcome::Consumed
    }

    fn navigate(&mut self, key: KeyEvent) -> KeyOutcome {
        let horizontal = self.orientation == Orientation::Horizontal;
        match key.code {
            KeyCode::Left if horizontal => self.step(-1, key),
            KeyCode::Right if horizontal => self.step(1, key),
            KeyCode::Up if !horizontal => self.step(-1, key),
            KeyCode::Down if !horizontal => self.step(1, key),
            _ if keys::is_back_tab(&key) => self.step(-1, key),
            _ if keys::is_tab(&key) => self.step(1, key),
            _ => self.dispatch_shortcut(key),
        }
    }

    /// Continue a caret-carrying move inside a vertical row
    fn reroute(&mut self, direction: Direction, column: Option<usize>) -> KeyOutcome {
        let passthrough = KeyOutcome::Reroute { direction, column };
        if self.orientation != Orientation::Vertical || !direction.is_vertical() {
            return passthrough;
        }
        let target = self.focused_item as isize + direction.step();
        if target < 0 || target >= self.focusable.len() as isize {
            return passthrough;
        }
        self.focused_item = target as usize;
        if let (Some(col), Some(tb)) = (
            column,
            self.focused_control_mut().and_then(|c| c.as_text_box_mut()),
        ) {
            tb.seed_cursor(col);
        }
        KeyOutcome::Consumed
    }

    fn dispatch_shortcut(&mut self, key: KeyEvent) -> KeyOutcome {
        let Some(item) = self
            .shortcuts
            .iter()
            .find(|(code, _)| keys::matches_shortcut(*code, &key))
            .map(|(_, item)| *item)
        else {
            return KeyOutcome::Unhandled(key);
        };

        let control = &self.content[item];
        match control.kind() {
            ControlKind::Button => KeyOutcome::Activated(control.id()),
            ControlKind::CheckBox | ControlKind::RadioButton => {
                let bound = control
                    .as_toggle()
                    .is_some_and(|t| t.bound_object().is_some());
                self.toggle(item);
                if bound {
                    KeyOutcome::Bubbled(key)
                } else {
                    KeyOutcome::Consumed
                }
            }
            _ => KeyOutcome::Unhandled(key),
        }
    }

    pub fn reset(&mut self) {
        for control in &mut self.content {
            control.reset();
        }
    }

    pub(crate) fn set_separator_location(&mut self, location: usize) {
        if self.header.is_some() {
            self.separator_location = location;
        }
        for control in &mut self.content {
            control.set_separator_location(location);
        }
    }

    /// Widest header in this row
    pub(crate) fn header_width(&self) -> usize {
        let own = self.header.as_ref().map(|h| h.width()).unwrap_or(0);
        self.content
            .iter()
            .filter_map(|c| c.header_width())
            .fold(own, usize::max)
    }

    fn header_prefix(&self) -> Option<String> {
        self.header.as_ref().map(|h| {
            format!(
                "{}{} : ",
                h,
                " ".repeat(self.separator_location.saturating_sub(h.width()))
            )
        })
    }

    pub(crate) fn draw_with_fill(&self, focused: bool, ctx: &RenderContext, fill: char) -> Vec<Line<'static>> {
        let focused_index = if focused { self.focused_index() } else { None };
        let blocks: Vec<(Vec<Line<'static>>, usize)> = self
            .content
            .iter()
            .enumerate()
            .map(|(i, c)| (c.draw_with_fill(focused_index == Some(i), ctx, fill), c.width()))
            .collect();
        let prefix = self.header_prefix();
        let header_style = ctx.theme.header.style();

        match self.orientation {
            Orientation::Horizontal => {
                let height = blocks.iter().map(|(l, _)| l.len()).max().unwrap_or(1).max(1);
                (0..height)
                    .map(|line_no| {
                        let mut spans: Vec<Span<'static>> = Vec::new();
                        if let Some(prefix) = &prefix {
                            if line_no == 0 {
                                spans.push(Span::styled(prefix.clone(), header_style));
                            } else {
                                spans.push(Span::raw(" ".repeat(prefix.width())));
                            }
                        }
                        for (k, (lines, width)) in blocks.iter().enumerate() {
                            if k > 0 {
                                spans.push(Span::raw(" "));
                            }
                            match lines.get(line_no) {
                                Some(line) => {
                                    spans.extend(line.spans.iter().cloned());
                                    let pad = width.saturating_sub(line.width());
                                    if pad > 0 {
                                        spans.push(Span::raw(" ".repeat(pad)));
                                    }
                                }
                                None => spans.push(Span::raw(" ".repeat(*width))),
                            }
                        }
                        Line::from(spans)
                    })
                    .collect()
            }
            Orientation::Vertical => {
                let mut lines = Vec::new();
                if let Some(header) = &self.header {
                    lines.push(Line::from(Span::styled(header.clone(), header_style)));
                }
                for (block, _) in blocks {
                    lines.extend(block);
                }
                lines
            }
        }
    }
}

impl Component for Row {
    fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        let Some(index) = self.focused_index() else {
            return self.dispatch_shortcut(key);
        };

        match self.content[index].handle_key(key) {
            KeyOutcome::Consumed => {
                self.exclude_siblings(index);
                KeyOutcome::Consumed
            }
            KeyOutcome::Unhandled(key) => self.navigate(key),
            KeyOutcome::Reroute { direction, column } => self.reroute(direction, column),
            outcome => outcome,
        }
    }

    fn draw(&self, focused: bool, ctx: &RenderContext) -> Vec<Line<'static>> {
        self.draw_with_fill(focused, ctx, '─')
    }

    fn width(&self) -> usize {
        let prefix = self.header_prefix().map(|p| p.width()).unwrap_or(0);
        match self.orientation {
            Orientation::Horizontal => {
                let widths: usize = self.content.iter().map(|c| c.width()).sum();
                prefix + widths + self.content.len().saturating_sub(1)
            }
            Orientation::Vertical => self
                .content
                .iter()
                .map(|c| c.width())
                .fold(prefix, usize::max),
        }
    }

    fn height(&self) -> usize {
        match self.orientation {
            Orientation::Horizontal => self.content.iter().map(|c| c.height()).max().unwrap_or(1),
            Orientation::Vertical => {
                let header = usize::from(self.header.is_some());
                header + self.content.iter().map(|c| c.height()).sum::<usize>()
            }
        }
    }

    fn reset(&mut self) {
        Row::reset(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Theme;
    use crate::controls::{Button, TextBox};
    use crate::keys::{char_key, press};
    use serde_json::json;

    fn radio_states(row: &Row) -> Vec<bool> {
        row.content()
            .iter()
            .filter_map(|c| c.as_toggle())
            .map(|t| t.is_enabled())
            .collect()
    }

    fn ok_cancel() -> Row {
        Row::horizontal(vec![
            Control::button(Button::action("OK", "Validate")),
            Control::button(Button::action("Cancel", "Cancel")),
        ])
    }

    #[test]
    fn test_focusable_excludes_static_members() {
        let row = Row::horizontal(vec![
            Control::text("Pick:"),
            Control::checkbox("A", false),
            Control::space(2, 1),
            Control::checkbox("B", false),
            Control::separator(crate::controls::Separator::new()),
        ]);
        assert_eq!(row.focusable_indices(), &[1, 3]);
        assert!(row.is_dynamic_object());
    }

    #[test]
    fn test_horizontal_navigation_and_boundaries() {
        let mut row = ok_cancel();
        assert!(row.handle_key(press(KeyCode::Left)).is_unhandled());
        assert_eq!(row.handle_key(press(KeyCode::Right)), KeyOutcome::Consumed);
        assert_eq!(row.focused_item(), 1);
        assert!(row.handle_key(press(KeyCode::Right)).is_unhandled());
        assert!(row.handle_key(press(KeyCode::Up)).is_unhandled());
        assert!(row.handle_key(press(KeyCode::Down)).is_unhandled());
    }

    #[test]
    fn test_vertical_navigation_and_boundaries() {
        let mut row = Row::vertical(vec![
            Control::checkbox("A", false),
            Control::checkbox("B", false),
        ]);
        assert!(row.handle_key(press(KeyCode::Left)).is_unhandled());
        assert_eq!(row.handle_key(press(KeyCode::Down)), KeyOutcome::Consumed);
        assert!(row.handle_key(press(KeyCode::Down)).is_unhandled());
        assert_eq!(row.handle_key(press(KeyCode::Up)), KeyOutcome::Consumed);
        assert!(row.handle_key(press(KeyCode::Up)).is_unhandled());
    }

    #[test]
    fn test_tab_boundary_is_unhandled() {
        let mut row = ok_cancel();
        assert_eq!(row.handle_key(press(KeyCode::Tab)), KeyOutcome::Consumed);
        assert_eq!(row.focused_item(), 1);
        assert!(row.handle_key(press(KeyCode::Tab)).is_unhandled());
        assert_eq!(row.focused_item(), 1);
        assert_eq!(row.handle_key(press(KeyCode::BackTab)), KeyOutcome::Consumed);
        assert!(row.handle_key(press(KeyCode::BackTab)).is_unhandled());
    }

    #[test]
    fn test_radio_group_detection() {
        let group = Row::horizontal(vec![
            Control::radio("A", false),
            Control::space(1, 1),
            Control::radio("B", false),
        ]);
        assert!(group.is_radio_group());

        let mixed = Row::horizontal(vec![Control::radio("A", false), Control::checkbox("B", false)]);
        assert!(!mixed.is_radio_group());
        assert!(!Row::horizontal(vec![Control::space(1, 1)]).is_radio_group());
    }

    #[test]
    fn test_radio_mutual_exclusion_via_space() {
        let mut row = Row::horizontal(vec![
            Control::radio("A", true),
            Control::radio("B", false),
            Control::radio("C", false),
        ]);
        row.handle_key(press(KeyCode::Right));
        row.handle_key(char_key(' '));
        assert_eq!(radio_states(&row), vec![false, true, false]);

        row.handle_key(press(KeyCode::Right));
        row.handle_key(char_key(' '));
        assert_eq!(radio_states(&row), vec![false, false, true]);
    }

    #[test]
    fn test_mandatory_radio_group() {
        let mut row = Row::horizontal(vec![
            Control::radio("A", true),
            Control::radio("B", false),
            Control::radio("C", false),
        ])
        .mandatory();

        // Already on: stays on, siblings stay off
        row.handle_key(char_key(' '));
        assert_eq!(radio_states(&row), vec![true, false, false]);

        assert!(row.toggle(1));
        assert_eq!(radio_states(&row), vec![false, true, false]);

        assert!(!row.toggle(1));
        assert_eq!(radio_states(&row), vec![false, true, false]);
    }

    #[test]
    fn test_optional_radio_can_be_cleared() {
        let mut row = Row::horizontal(vec![Control::radio("A", true), Control::radio("B", false)]);
        row.handle_key(char_key(' '));
        assert_eq!(radio_states(&row), vec![false, false]);
        assert_eq!(row.get_value(), Value::Null);
    }

    #[test]
    fn test_radio_value_prefers_bound_object() {
        let row = Row::horizontal(vec![
            Control::radio("Small", false),
            Control::radio("Large", true).bound_to(json!({"size": "L"})),
        ]);
        assert_eq!(row.get_value(), json!({"size": "L"}));

        let plain = Row::horizontal(vec![Control::radio("Small", true)]);
        assert_eq!(plain.get_value(), json!("Small"));
    }

    #[test]
    fn test_shortcut_toggles_without_moving_focus() {
        let mut row = Row::horizontal(vec![
            Control::checkbox("A", false),
            Control::checkbox("B", false).with_shortcut(KeyCode::Char('b')),
        ]);
        assert_eq!(row.handle_key(char_key('b')), KeyOutcome::Consumed);
        assert_eq!(row.focused_item(), 0);
        assert_eq!(row.content()[1].value(), Some(Value::Bool(true)));
    }

    #[test]
    fn test_shortcut_on_bound_toggle_bubbles() {
        let mut row = Row::horizontal(vec![
            Control::checkbox("A", false),
            Control::checkbox("B", false)
                .with_shortcut(KeyCode::Char('b'))
                .bound_to(json!({"Id": 2})),
        ]);
        assert_eq!(row.handle_key(char_key('b')), KeyOutcome::Bubbled(char_key('b')));
        assert_eq!(row.content()[1].value(), Some(Value::Bool(true)));
    }

    #[test]
    fn test_shortcut_activates_button() {
        let mut row = Row::horizontal(vec![
            Control::button(Button::action("OK", "Validate")),
            Control::button(Button::action("Cancel", "Cancel")).with_shortcut(KeyCode::Char('c')),
        ]);
        row.attach(3);
        assert_eq!(
            row.handle_key(char_key('c')),
            KeyOutcome::Activated(ControlId { row: 3, item: 1 })
        );
        assert!(row.handle_key(char_key('z')).is_unhandled());
    }

    #[test]
    fn test_vertical_reroute_seeds_caret() {
        let mut row = Row::vertical(vec![
            Control::text_box(TextBox::new("First", "abcdef")),
            Control::text_box(TextBox::new("Last", "xy")),
        ]);
        row.handle_key(press(KeyCode::Left));
        row.handle_key(press(KeyCode::Left));
        assert_eq!(row.handle_key(press(KeyCode::Down)), KeyOutcome::Consumed);
        let tb = row.focused_control().and_then(|c| c.as_text_box()).unwrap();
        assert_eq!(tb.cursor(), 2);

        assert_eq!(
            row.handle_key(press(KeyCode::Down)),
            KeyOutcome::Reroute {
                direction: Direction::Down,
                column: Some(2)
            }
        );
    }

    #[test]
    fn test_homogeneous_rows() {
        assert!(ok_cancel().is_homogeneous(ControlKind::Button));
        let mixed = Row::horizontal(vec![
            Control::button(Button::placeholder("OK")),
            Control::checkbox("A", false),
        ]);
        assert!(!mixed.is_homogeneous(ControlKind::Button));
        assert!(mixed.contains_kind(ControlKind::Button));
    }

    #[test]
    fn test_horizontal_draw_and_width() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, 40);
        let row = ok_cancel();
        let lines = row.draw(true, &ctx);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].to_string(), "[ OK ] < Cancel >");
        assert_eq!(row.width(), 17);
        assert_eq!(row.height(), 1);
    }

    #[test]
    fn test_row_header_prefix() {
        let theme = Theme::default();
        let ctx = RenderContext::new(&theme, 40);
        let row = Row::horizontal(vec![Control::radio("Yes", true), Control::radio("No", false)])
            .with_header("Agree");
        assert_eq!(row.draw(false, &ctx)[0].to_string(), "Agree : (•) Yes ( ) No");
    }

    #[test]
    fn test_reset_restores_members() {
        let mut row = Row::horizontal(vec![Control::radio("A", true), Control::radio("B", false)]);
        row.toggle(1);
        row.reset();
        assert_eq!(radio_states(&row), vec![true, false]);
    }
}
