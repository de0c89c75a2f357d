//! Single-line text input
//!
//! The cursor is a character index into `text` and is clamped to
//! `0..=len` after every mutation. Validation is memoized on the last text
//! it ran against.

use crate::component::RenderContext;
use crate::error::BuildError;
use crate::keys;
use crate::outcome::{Direction, KeyOutcome};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use regex::Regex;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

/// Minimum number of columns the input area occupies
const MIN_FIELD_WIDTH: usize = 10;

/// Rule a text box's content must satisfy
#[derive(Clone)]
pub enum Validator {
    Regex(Regex),
    Predicate(Rc<dyn Fn(&str) -> bool>),
}

impl Validator {
    fn check(&self, text: &str) -> bool {
        match self {
            Validator::Regex(re) => re.is_match(text),
            Validator::Predicate(f) => f(text),
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Regex(re) => write!(f, "Regex({})", re.as_str()),
            Validator::Predicate(_) => write!(f, "Predicate"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextBox {
    header: String,
    text: String,
    original_text: String,
    cursor: usize,
    validator: Option<Validator>,
    password_char: Option<char>,
    /// Column the ` : ` separator is aligned to
    separator_location: usize,
    field_width: usize,
    /// Overrides for the validation error listing
    error_field: Option<String>,
    error_reason: Option<String>,
    /// (text, valid) of the last validation run
    validation: RefCell<Option<(String, bool)>>,
}

impl TextBox {
    pub fn new(header: impl Into<String>, text: impl Into<String>) -> Self {
        let header = header.into();
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            separator_location: header.width(),
            header,
            original_text: text.clone(),
            text,
            cursor,
            validator: None,
            password_char: None,
            field_width: MIN_FIELD_WIDTH,
            error_field: None,
            error_reason: None,
            validation: RefCell::new(None),
        }
    }

    /// Require the text to match `pattern`
    pub fn with_regex(mut self, pattern: &str) -> Result<Self, BuildError> {
        let re = Regex::new(pattern).map_err(|source| BuildError::InvalidRegex {
            field: self.header.clone(),
            source,
        })?;
        self.validator = Some(Validator::Regex(re));
        Ok(self)
    }

    /// Require the text to satisfy `predicate`
    pub fn with_predicate(mut self, predicate: impl Fn(&str) -> bool + 'static) -> Self {
        self.validator = Some(Validator::Predicate(Rc::new(predicate)));
        self
    }

    pub fn with_password_char(mut self, c: char) -> Self {
        self.password_char = Some(c);
        self
    }

    pub fn with_field_width(mut self, width: usize) -> Self {
        self.field_width = width.max(1);
        self
    }

    /// Name and reason shown in the validation error listing
    pub fn with_error(mut self, field: Option<String>, reason: Option<String>) -> Self {
        self.error_field = field;
        self.error_reason = reason;
        self
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.len();
    }

    pub(crate) fn set_separator_location(&mut self, location: usize) {
        self.separator_location = location;
    }

    /// Place the cursor at `column`, clamped to the text length
    pub fn seed_cursor(&mut self, column: usize) {
        self.cursor = column.min(self.len());
    }

    pub fn reset(&mut self) {
        self.text = self.original_text.clone();
        self.cursor = self.len();
    }

    /// Whether the current text passes the validator
    ///
    /// The validator only runs when the text changed since the previous
    /// call; otherwise the cached verdict is returned.
    pub fn is_valid_text(&self) -> bool {
        let Some(validator) = &self.validator else {
            return true;
        };

        if let Some((text, valid)) = self.validation.borrow().as_ref() {
            if *text == self.text {
                return *valid;
            }
        }

        let valid = validator.check(&self.text);
        *self.validation.borrow_mut() = Some((self.text.clone(), valid));
        valid
    }

    /// Field name used in the error listing
    pub fn error_field(&self) -> &str {
        self.error_field.as_deref().unwrap_or(&self.header)
    }

    /// Reason used in the error listing
    pub fn error_reason(&self) -> String {
        if let Some(reason) = &self.error_reason {
            return reason.clone();
        }
        match &self.validator {
            Some(Validator::Regex(re)) => format!("must match regex `{}`", re.as_str()),
            _ => "is not valid".to_string(),
        }
    }

    fn byte_offset(&self, index: usize) -> usize {
        self.text
            .char_indices()
            .nth(index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
    }

    fn delete(&mut self) {
        if self.cursor >= self.len() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Left => {
                if self.cursor == 0 {
                    return KeyOutcome::Unhandled(key);
                }
                self.cursor -= 1;
            }
            KeyCode::Right => {
                if self.cursor >= self.len() {
                    return KeyOutcome::Unhandled(key);
                }
                self.cursor += 1;
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Up => {
                return KeyOutcome::Reroute {
                    direction: Direction::Up,
                    column: Some(self.cursor),
                }
            }
            KeyCode::Down => {
                return KeyOutcome::Reroute {
                    direction: Direction::Down,
                    column: Some(self.cursor),
                }
            }
            KeyCode::Char(c) if keys::is_printable(&key) => self.insert(c),
            _ => return KeyOutcome::Unhandled(key),
        }
        KeyOutcome::Consumed
    }

    fn display_text(&self) -> String {
        match self.password_char {
            Some(mask) => std::iter::repeat(mask).take(self.len()).collect(),
            None => self.text.clone(),
        }
    }

    fn input_width(&self) -> usize {
        self.field_width.max(self.display_text().width() + 1)
    }

    pub fn width(&self) -> usize {
        self.separator_location + 3 + self.input_width()
    }

    pub fn draw(&self, focused: bool, colors: crate::config::Colors, ctx: &RenderContext) -> Line<'static> {
        let header = format!(
            "{}{} : ",
            self.header,
            " ".repeat(self.separator_location.saturating_sub(self.header.width()))
        );
        let style = colors.style(focused);
        let mut spans = vec![Span::styled(header, ctx.theme.header.style())];

        let shown: Vec<char> = self.display_text().chars().collect();
        let fill = self.input_width().saturating_sub(self.display_text().width());
        if focused {
            let before: String = shown[..self.cursor].iter().collect();
            let at: String = shown
                .get(self.cursor)
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let after: String = shown.iter().skip(self.cursor + 1).collect();
            let pad = if self.cursor < shown.len() { fill } else { fill.saturating_sub(1) };
            spans.push(Span::styled(before, style));
            spans.push(Span::styled(at, style.add_modifier(Modifier::REVERSED)));
            spans.push(Span::styled(format!("{}{}", after, " ".repeat(pad)), style));
        } else {
            let text: String = shown.iter().collect();
            spans.push(Span::styled(format!("{}{}", text, " ".repeat(fill)), style));
        }

        if !self.is_valid_text() {
            spans.push(Span::styled(" !", ctx.theme.error.style()));
        }

        Line::from(spans)
    }
}
