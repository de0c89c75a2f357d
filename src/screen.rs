//! Screen trait - The terminal collaborator driven by the input loop
//!
//! A dialog only needs to draw its two regions, show a message, toggle the
//! cursor and block for a key. `ScriptedScreen` is a headless
//! implementation fed from a key queue.

use anyhow::{bail, Result};
use crossterm::event::KeyEvent;
use ratatui::backend::TestBackend;
use ratatui::text::{Line, Text};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use std::collections::VecDeque;

pub trait Screen {
    /// Columns available to the dialog
    fn width(&self) -> usize;

    /// Draw the rows that never change during an invocation
    fn draw_static(&mut self, lines: &[Line<'static>]) -> Result<()>;

    /// Redraw the interactive rows
    fn draw_dynamic(&mut self, lines: &[Line<'static>]) -> Result<()>;

    /// Show a message below the dialog; an empty slice clears it
    fn show_message(&mut self, lines: &[Line<'static>]) -> Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()>;

    /// Block until the next key press
    fn read_key(&mut self) -> Result<KeyEvent>;

    /// Wait for any key
    fn pause(&mut self) -> Result<()> {
        self.read_key().map(|_| ())
    }
}

/// Lines of the three regions, in display order
#[derive(Debug, Default, Clone)]
pub(crate) struct Regions {
    pub static_lines: Vec<Line<'static>>,
    pub dynamic_lines: Vec<Line<'static>>,
    pub message_lines: Vec<Line<'static>>,
}

impl Regions {
    pub fn paragraph(&self) -> Paragraph<'static> {
        let lines: Vec<Line<'static>> = self
            .static_lines
            .iter()
            .chain(&self.dynamic_lines)
            .chain(&self.message_lines)
            .cloned()
            .collect();
        Paragraph::new(Text::from(lines))
    }
}

/// Headless screen replaying a fixed list of keys
pub struct ScriptedScreen {
    keys: VecDeque<KeyEvent>,
    terminal: Terminal<TestBackend>,
    regions: Regions,
    width: u16,
    cursor_visible: bool,
    pub static_draws: usize,
    pub dynamic_draws: usize,
    pub messages_shown: usize,
}

impl ScriptedScreen {
    pub fn new(width: u16, height: u16, keys: impl IntoIterator<Item = KeyEvent>) -> Result<Self> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        Ok(Self {
            keys: keys.into_iter().collect(),
            terminal,
            regions: Regions::default(),
            width,
            cursor_visible: true,
            static_draws: 0,
            dynamic_draws: 0,
            messages_shown: 0,
        })
    }

    pub fn push_keys(&mut self, keys: impl IntoIterator<Item = KeyEvent>) {
        self.keys.extend(keys);
    }

    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Rendered buffer, one string per terminal line, trailing blanks trimmed
    pub fn contents(&self) -> Vec<String> {
        let buffer = self.terminal.backend().buffer();
        let width = buffer.area.width.max(1) as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| {
                let line: String = row.iter().map(|cell| cell.symbol()).collect();
                line.trim_end().to_string()
            })
            .collect()
    }

    /// Text of the last message shown
    pub fn message(&self) -> Vec<String> {
        self.regions
            .message_lines
            .iter()
            .map(|l| l.to_string())
            .collect()
    }

    fn render(&mut self) -> Result<()> {
        let paragraph = self.regions.paragraph();
        self.terminal.draw(|frame| {
            frame.render_widget(paragraph, frame.area());
        })?;
        Ok(())
    }
}

impl Screen for ScriptedScreen {
    fn width(&self) -> usize {
        self.width as usize
    }

    fn draw_static(&mut self, lines: &[Line<'static>]) -> Result<()> {
        self.static_draws += 1;
        self.regions.static_lines = lines.to_vec();
        self.render()
    }

    fn draw_dynamic(&mut self, lines: &[Line<'static>]) -> Result<()> {
        self.dynamic_draws += 1;
        self.regions.dynamic_lines = lines.to_vec();
        self.render()
    }

    fn show_message(&mut self, lines: &[Line<'static>]) -> Result<()> {
        if !lines.is_empty() {
            self.messages_shown += 1;
        }
        self.regions.message_lines = lines.to_vec();
        self.render()
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn read_key(&mut self) -> Result<KeyEvent> {
        match self.keys.pop_front() {
            Some(key) => Ok(key),
            None => bail!("key script exhausted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{char_key, typed};

    #[test]
    fn test_keys_replay_in_order() {
        let mut screen = ScriptedScreen::new(20, 5, typed("ab")).unwrap();
        assert_eq!(screen.read_key().unwrap(), char_key('a'));
        screen.push_keys([char_key('c')]);
        assert_eq!(screen.read_key().unwrap(), char_key('b'));
        assert_eq!(screen.read_key().unwrap(), char_key('c'));
        assert!(screen.read_key().is_err());
    }

    #[test]
    fn test_regions_render_in_order() {
        let mut screen = ScriptedScreen::new(20, 4, []).unwrap();
        screen.draw_static(&[Line::from("title")]).unwrap();
        screen.draw_dynamic(&[Line::from("[ OK ]")]).unwrap();
        screen.show_message(&[Line::from("oops")]).unwrap();

        assert_eq!(screen.contents(), vec!["title", "[ OK ]", "oops", ""]);
        assert_eq!(screen.static_draws, 1);
        assert_eq!(screen.dynamic_draws, 1);
        assert_eq!(screen.messages_shown, 1);
    }

    #[test]
    fn test_pause_consumes_a_key() {
        let mut screen = ScriptedScreen::new(10, 2, typed("x")).unwrap();
        screen.pause().unwrap();
        assert_eq!(screen.remaining_keys(), 0);
        assert!(screen.pause().is_err());
    }
}
