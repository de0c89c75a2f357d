//! Component trait - Interface shared by controls and rows
//!
//! Each component encapsulates its own state, key handling and rendering.
//! Rendering produces ratatui lines; the terminal collaborator decides where
//! and how they are written.

use crate::config::Theme;
use crate::outcome::KeyOutcome;
use crossterm::event::KeyEvent;
use ratatui::text::Line;

/// Everything a component needs to know while drawing itself
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    /// Width available to the dialog, used by auto-length separators
    pub width: usize,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme, width: usize) -> Self {
        Self { theme, width }
    }
}

/// Trait for dialog components
///
/// The pattern follows:
/// 1. `handle_key` - apply a key or hand it back as `Unhandled`
/// 2. `draw` - render the current state
/// 3. `width` / `height` - report the layout footprint
pub trait Component {
    /// Handle a key event
    ///
    /// Returns `KeyOutcome::Unhandled` with the original key when the key
    /// does not apply, so the caller can reinterpret it.
    fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome;

    /// Render the component
    ///
    /// This method should be pure rendering - no state changes.
    fn draw(&self, focused: bool, ctx: &RenderContext) -> Vec<Line<'static>>;

    /// Display width in terminal columns
    fn width(&self) -> usize;

    /// Display height in terminal lines
    fn height(&self) -> usize;

    /// Restore construction-time values
    ///
    /// Components without editable state keep the default no-op.
    fn reset(&mut self) {}
}
