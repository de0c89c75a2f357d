//! Render/input loop

use super::Dialog;
use crate::controls::ControlId;
use crate::result::DialogResult;
use crate::screen::Screen;
use anyhow::{Context, Result};

impl Dialog {
    /// Run the input loop until a terminal control fires
    ///
    /// With `keep_values == false` every control is reset first.
    pub fn invoke(&mut self, screen: &mut dyn Screen, keep_values: bool) -> Result<DialogResult> {
        if !keep_values {
            self.reset();
        }
        let width = screen.width();
        log::info!("invoke: {} rows, width {}", self.rows.len(), width);

        screen.draw_static(&self.render_static(width))?;
        let activated = self.read_until_activated(screen, width);
        screen.set_cursor_visible(true)?;
        let activated = activated?;

        let control = self
            .control(activated)
            .with_context(|| format!("activated control {} does not exist", activated))?;
        let result = DialogResult::from_control(control, self.is_valid_form())?;
        log::info!("invoke finished with {}", result.to_json()["type"]);
        Ok(result)
    }

    fn read_until_activated(&mut self, screen: &mut dyn Screen, width: usize) -> Result<ControlId> {
        loop {
            screen.set_cursor_visible(false)?;
            screen.draw_dynamic(&self.render_dynamic(width))?;
            let key = screen.read_key()?;
            if let Some(id) = self.press_key(key) {
                return Ok(id);
            }
        }
    }

    /// Run the input loop until the form is valid or the user cancels
    ///
    /// Each rejected attempt shows the validation message (and waits for a
    /// key when configured) before the loop resumes with the values kept.
    pub fn invoke_validating(&mut self, screen: &mut dyn Screen, keep_values: bool) -> Result<DialogResult> {
        let mut keep_values = keep_values;
        loop {
            let result = self.invoke(screen, keep_values)?;
            if result.is_cancel_or_exit() || self.is_valid_form() {
                screen.show_message(&[])?;
                return Ok(result);
            }

            log::info!("form rejected: {} invalid fields", self.get_errors().len());
            screen.show_message(&self.validation_message())?;
            if self.pause_after_errors {
                screen.pause()?;
            }
            keep_values = true;
        }
    }
}
