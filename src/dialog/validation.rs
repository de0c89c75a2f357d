//! Form validation: aggregate text box verdicts into a form verdict and an
//! ordered error listing

use super::Dialog;
use crate::controls::TextBox;
use ratatui::text::{Line, Span};
use serde::Serialize;

/// Header line of the validation message
pub const VALIDATION_MESSAGE: &str = "Please correct the following fields:";

/// One invalid field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl Dialog {
    fn text_boxes(&self) -> impl Iterator<Item = &TextBox> {
        self.rows
            .iter()
            .flat_map(|row| row.content())
            .filter_map(|c| c.as_text_box())
    }

    /// Every text box passes its validator
    pub fn is_valid_form(&self) -> bool {
        self.text_boxes().all(TextBox::is_valid_text)
    }

    /// Invalid fields in layout order
    pub fn get_errors(&self) -> Vec<FieldError> {
        self.text_boxes()
            .filter(|tb| !tb.is_valid_text())
            .map(|tb| FieldError {
                field: tb.error_field().to_string(),
                reason: tb.error_reason(),
            })
            .collect()
    }

    /// Lines shown after a rejected validation
    pub fn validation_message(&self) -> Vec<Line<'static>> {
        let style = self.config.theme.error.style();
        let mut lines = vec![Line::from(Span::styled(VALIDATION_MESSAGE, style))];
        if self.show_error_details {
            lines.extend(self.get_errors().into_iter().map(|e| {
                Line::from(Span::styled(format!("  {}: {}", e.field, e.reason), style))
            }));
        }
        lines
    }
}
