//! Inter-row focus movement

use super::Dialog;
use crate::controls::ControlKind;
use crate::outcome::Direction;
use crate::row::Row;

/// Column of the focused button's midpoint, counting button widths only
fn button_midpoint(row: &Row) -> Option<usize> {
    let focused = row.focused_item();
    let mut offset = 0;
    for (pos, width) in row.button_columns() {
        if pos == focused {
            return Some(offset + width / 2);
        }
        offset += width;
    }
    None
}

/// Focus the button of `to` sitting under the focused button of `from`
///
/// Each destination button occupies as many columns as it is wide; the
/// source midpoint picks one of them, clamped to the last button.
pub(crate) fn align_buttons(from: &Row, to: &mut Row) -> bool {
    if !from.contains_kind(ControlKind::Button) || !to.contains_kind(ControlKind::Button) {
        return false;
    }
    let Some(midpoint) = button_midpoint(from) else {
        return false;
    };

    let table: Vec<usize> = to
        .button_columns()
        .into_iter()
        .flat_map(|(pos, width)| std::iter::repeat(pos).take(width))
        .collect();
    let Some(&last) = table.last() else {
        return false;
    };
    let target = table.get(midpoint).copied().unwrap_or(last);
    to.set_focused_item(target);
    log::debug!("aligned buttons: column {} -> item {}", midpoint, target);
    true
}

impl Dialog {
    /// Move to the adjacent focusable row without wrapping
    ///
    /// `column` is the caret offset of the text box that asked for the
    /// move; a text box on the destination row starts there.
    pub(crate) fn move_vertical(&mut self, direction: Direction, column: Option<usize>) -> bool {
        let target = self.focused_row as isize + direction.step();
        if target < 0 || target as usize >= self.objects_index.len() {
            log::debug!("focus stays on row {} ({:?} at edge)", self.focused_row, direction);
            return false;
        }
        let from = self.objects_index[self.focused_row];
        let to = self.objects_index[target as usize];
        self.focused_row = target as usize;

        self.rows[to].focus_first();
        let (source, dest) = pair_mut(&mut self.rows, from, to);
        align_buttons(source, dest);

        if let Some(column) = column {
            if let Some(tb) = self.rows[to]
                .focused_control_mut()
                .and_then(|c| c.as_text_box_mut())
            {
                tb.seed_cursor(column);
            }
        }
        log::debug!("focus row {} -> {}", from, to);
        true
    }

    /// Tab through rows, wrapping at either end
    pub(crate) fn tab(&mut self, forward: bool) {
        let count = self.objects_index.len();
        if count == 0 {
            return;
        }
        self.focused_row = if forward {
            (self.focused_row + 1) % count
        } else {
            (self.focused_row + count - 1) % count
        };
        let row = &mut self.rows[self.objects_index[self.focused_row]];
        if forward {
            row.focus_first();
        } else {
            row.focus_last();
        }
        log::debug!("tab to row {}", self.objects_index[self.focused_row]);
    }
}

/// Shared and mutable borrows of two distinct rows
fn pair_mut(rows: &mut [Row], from: usize, to: usize) -> (&Row, &mut Row) {
    if from < to {
        let (head, tail) = rows.split_at_mut(to);
        (&head[from], &mut tail[0])
    } else {
        let (head, tail) = rows.split_at_mut(from);
        (&tail[0], &mut head[to])
    }
}
