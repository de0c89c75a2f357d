//! termdialog - Keyboard-driven dialogs and forms for the terminal
//!
//! Controls are grouped into rows and rows into a dialog. The dialog owns
//! focus, dispatches keys down the Dialog → Row → Control hierarchy and
//! turns the control that ends the loop into a typed result.

pub mod component;
pub mod config;
pub mod controls;
pub mod descriptor;
pub mod dialog;
pub mod error;
pub mod keys;
pub mod outcome;
pub mod result;
pub mod row;
pub mod screen;
pub mod tui;

pub use component::{Component, RenderContext};
pub use config::{Config, Theme};
pub use controls::{Button, Control, ControlId, ControlKind, Separator, TextBox};
pub use descriptor::DialogDescriptor;
pub use dialog::{Dialog, DialogBuilder, FieldError, Selection};
pub use error::BuildError;
pub use outcome::{Direction, KeyOutcome};
pub use result::{DialogResult, Snapshot};
pub use row::{Orientation, Row};
pub use screen::{ScriptedScreen, Screen};
pub use tui::CrosstermScreen;
