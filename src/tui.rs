//! Terminal User Interface management
//!
//! Handles terminal setup and teardown and implements `Screen` on top of
//! ratatui's crossterm backend.

use crate::screen::{Regions, Screen};
use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, text::Line, Terminal};
use std::io::{self, Stdout};

/// Terminal wrapper driving a dialog on the real terminal
pub struct CrosstermScreen {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    regions: Regions,
    entered: bool,
}

impl CrosstermScreen {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            regions: Regions::default(),
            entered: false,
        })
    }

    /// Enter the alternate screen and enable raw mode
    ///
    /// This should be called before the dialog is invoked.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        self.terminal.clear()?;
        self.entered = true;
        Ok(())
    }

    /// Exit the alternate screen and disable raw mode
    ///
    /// Also called automatically on Drop.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        self.entered = false;
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let paragraph = self.regions.paragraph();
        self.terminal.draw(|frame| {
            frame.render_widget(paragraph, frame.area());
        })?;
        Ok(())
    }
}

impl Screen for CrosstermScreen {
    fn width(&self) -> usize {
        terminal::size().map(|(w, _)| w as usize).unwrap_or(80)
    }

    fn draw_static(&mut self, lines: &[Line<'static>]) -> Result<()> {
        self.regions.static_lines = lines.to_vec();
        self.render()
    }

    fn draw_dynamic(&mut self, lines: &[Line<'static>]) -> Result<()> {
        self.regions.dynamic_lines = lines.to_vec();
        self.render()
    }

    fn show_message(&mut self, lines: &[Line<'static>]) -> Result<()> {
        self.regions.message_lines = lines.to_vec();
        self.render()
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            self.terminal.show_cursor()?;
        } else {
            self.terminal.hide_cursor()?;
        }
        Ok(())
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        loop {
            match event::read()? {
                Event::Key(key) if is_typed(&key) => return Ok(key),
                Event::Resize(_, _) => {
                    self.terminal.autoresize()?;
                    self.render()?;
                }
                _ => {}
            }
        }
    }
}

/// Presses and auto-repeats count; release events (Windows) do not
fn is_typed(key: &KeyEvent) -> bool {
    matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
}

impl Drop for CrosstermScreen {
    fn drop(&mut self) {
        // Best effort cleanup on drop
        let _ = self.exit();
    }
}
