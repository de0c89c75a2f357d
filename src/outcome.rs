//! KeyOutcome enum - What a keystroke did at one level of the hierarchy
//!
//! Every level (Control, Row, Dialog) answers a key with a `KeyOutcome`.
//! `Unhandled` hands the key back to the caller so the next level up can
//! reinterpret it (an arrow at a row edge becomes an inter-row move, Tab at
//! the last item becomes a dialog-level wrap).

use crate::controls::ControlId;
use crossterm::event::KeyEvent;
use std::fmt;

/// Navigation direction carried by a `Reroute`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// +1 for moves towards the end of a sequence, -1 towards the start
    pub fn step(self) -> isize {
        match self {
            Direction::Up | Direction::Left => -1,
            Direction::Down | Direction::Right => 1,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Result of handing one key event to a Control, Row or Dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    // ─────────────────────────────────────────────────────────────────────────
    // Terminal states for this keystroke
    // ─────────────────────────────────────────────────────────────────────────
    /// The key was applied; nothing further to do
    Consumed,
    /// A terminal control fired; the input loop stops and builds a result
    Activated(ControlId),

    // ─────────────────────────────────────────────────────────────────────────
    // Handed back to the caller
    // ─────────────────────────────────────────────────────────────────────────
    /// The key did not apply here; try the next dispatch level
    Unhandled(KeyEvent),
    /// Focus should move; `column` is the caret offset the destination
    /// text box should adopt
    Reroute {
        direction: Direction,
        column: Option<usize>,
    },
    /// A bound toggle was flipped by a row-level shortcut; the raw key is
    /// forwarded so the dialog can observe it
    Bubbled(KeyEvent),
}

impl KeyOutcome {
    pub fn is_unhandled(&self) -> bool {
        matches!(self, KeyOutcome::Unhandled(_))
    }

    pub fn activated(&self) -> Option<ControlId> {
        match self {
            KeyOutcome::Activated(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for KeyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyOutcome::Consumed => write!(f, "Consumed"),
            KeyOutcome::Activated(id) => write!(f, "Activated({})", id),
            KeyOutcome::Unhandled(key) => write!(f, "Unhandled({:?})", key.code),
            KeyOutcome::Reroute { direction, column } => match column {
                Some(col) => write!(f, "Reroute({:?}, col {})", direction, col),
                None => write!(f, "Reroute({:?})", direction),
            },
            KeyOutcome::Bubbled(key) => write!(f, "Bubbled({:?})", key.code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;
    use crossterm::event::KeyCode;

    #[test]
    fn test_direction_step() {
        assert_eq!(Direction::Up.step(), -1);
        assert_eq!(Direction::Right.step(), 1);
        assert!(Direction::Down.is_vertical());
        assert!(!Direction::Left.is_vertical());
    }

    #[test]
    fn test_outcome_display() {
        let id = ControlId { row: 1, item: 2 };
        assert_eq!(KeyOutcome::Activated(id).to_string(), "Activated(1:2)");
        assert_eq!(
            KeyOutcome::Unhandled(keys::press(KeyCode::Tab)).to_string(),
            "Unhandled(Tab)"
        );
        assert_eq!(
            KeyOutcome::Reroute {
                direction: Direction::Down,
                column: Some(3)
            }
            .to_string(),
            "Reroute(Down, col 3)"
        );
    }
}
