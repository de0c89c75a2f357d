//! Non-interactive controls: free text, labelled properties, spacing and
//! separators

use crate::component::RenderContext;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Free text, possibly spanning several lines
#[derive(Debug, Clone)]
pub struct Text {
    text: String,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> usize {
        self.text.lines().map(|l| l.width()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.text.lines().count().max(1)
    }

    pub fn draw(&self, ctx: &RenderContext) -> Vec<Line<'static>> {
        let style = ctx.theme.text.style();
        if self.text.is_empty() {
            return vec![Line::from("")];
        }
        self.text
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect()
    }
}

/// `header : value` line aligned with the text box headers
#[derive(Debug, Clone)]
pub struct Property {
    header: String,
    value: String,
    separator_location: usize,
}

impl Property {
    pub fn new(header: impl Into<String>, value: impl Into<String>) -> Self {
        let header = header.into();
        Self {
            separator_location: header.width(),
            header,
            value: value.into(),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub(crate) fn set_separator_location(&mut self, location: usize) {
        self.separator_location = location;
    }

    pub fn width(&self) -> usize {
        self.separator_location + 3 + self.value.width()
    }

    pub fn draw(&self, ctx: &RenderContext) -> Line<'static> {
        let pad = self.separator_location.saturating_sub(self.header.width());
        Line::from(vec![
            Span::styled(
                format!("{}{} : ", self.header, " ".repeat(pad)),
                ctx.theme.header.style(),
            ),
            Span::styled(self.value.clone(), ctx.theme.text.style()),
        ])
    }
}

/// Blank block used for layout
#[derive(Debug, Clone, Copy)]
pub struct Space {
    pub width: usize,
    pub height: usize,
}

impl Default for Space {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
        }
    }
}

impl Space {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn draw(&self) -> Vec<Line<'static>> {
        (0..self.height.max(1))
            .map(|_| Line::from(" ".repeat(self.width)))
            .collect()
    }
}

/// Horizontal rule, optionally titled and paginated
///
/// The rule text is computed at draw time from the available width.
#[derive(Debug, Clone)]
pub struct Separator {
    text: Option<String>,
    fill: Option<char>,
    auto_length: bool,
    length: usize,
    page: Option<(usize, usize)>,
}

impl Default for Separator {
    fn default() -> Self {
        Self {
            text: None,
            fill: None,
            auto_length: true,
            length: 0,
            page: None,
        }
    }
}

impl Separator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed-length rule
    pub fn with_length(mut self, length: usize) -> Self {
        self.auto_length = false;
        self.length = length;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_fill(mut self, c: char) -> Self {
        self.fill = Some(c);
        self
    }

    /// Show `current/total` at the right end of the rule
    pub fn with_page(mut self, current: usize, total: usize) -> Self {
        self.page = Some((current, total));
        self
    }

    pub fn is_auto_length(&self) -> bool {
        self.auto_length
    }

    fn decoration_width(&self) -> usize {
        let text = self.text.as_ref().map(|t| t.width() + 3).unwrap_or(0);
        let page = self
            .page
            .map(|(c, t)| format!(" {}/{} ", c, t).width() + 1)
            .unwrap_or(0);
        text + page
    }

    /// Width the separator asks for; auto-length rules take what they get
    pub fn width(&self) -> usize {
        if self.auto_length {
            self.decoration_width()
        } else {
            self.length.max(self.decoration_width())
        }
    }

    /// Compute the rule for a given length
    pub fn render_text(&self, length: usize, default_fill: char) -> String {
        let fill = self.fill.unwrap_or(default_fill);
        let mut out = String::new();
        if let Some(text) = &self.text {
            out.push(fill);
            out.push(' ');
            out.push_str(text);
            out.push(' ');
        }
        let page = self.page.map(|(c, t)| format!(" {}/{} ", c, t));
        let used = out.width() + page.as_ref().map(|p| p.width() + 1).unwrap_or(0);
        out.extend(std::iter::repeat(fill).take(length.saturating_sub(used)));
        if let Some(page) = page {
            out.push_str(&page);
            out.push(fill);
        }
        out
    }

    pub fn draw(&self, ctx: &RenderContext, default_fill: char) -> Line<'static> {
        let length = if self.auto_length { ctx.width } else { self.length };
        Line::from(Span::styled(
            self.render_text(length, default_fill),
            ctx.theme.separator.style(),
        ))
    }
}
