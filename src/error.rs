//! Construction-time errors
//!
//! Shape violations abort dialog construction; everything that happens
//! inside the input loop is a normal state and never surfaces here.

use std::fmt;

#[derive(Debug)]
pub enum BuildError {
    /// A descriptor item carries a `kind` the engine does not know
    UnknownKind(String),
    /// A descriptor item has no `kind` field at all
    MissingKind,
    /// A row was placed inside another row
    NestedRow,
    /// A descriptor item could not be decoded into its kind
    Malformed { kind: String, message: String },
    /// A text box validator pattern failed to compile
    InvalidRegex { field: String, source: regex::Error },
    /// A shortcut name could not be parsed into a key
    InvalidShortcut(String),
    /// An explicit escape/validate/refresh target names no button
    UnknownTarget(String),
    /// The initial focused row is out of range
    InvalidFocus { index: usize, focusable: usize },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::UnknownKind(kind) => write!(f, "unknown control kind: {kind}"),
            BuildError::MissingKind => write!(f, "item has no kind"),
            BuildError::NestedRow => write!(f, "a row cannot contain another row"),
            BuildError::Malformed { kind, message } => {
                write!(f, "malformed {kind} item: {message}")
            }
            BuildError::InvalidRegex { field, source } => {
                write!(f, "invalid regex for field {field}: {source}")
            }
            BuildError::InvalidShortcut(name) => write!(f, "invalid shortcut: {name}"),
            BuildError::UnknownTarget(name) => write!(f, "no button named {name}"),
            BuildError::InvalidFocus { index, focusable } => write!(
                f,
                "focused row {index} out of range ({focusable} focusable rows)"
            ),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::InvalidRegex { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_error_display() {
        assert_eq!(
            BuildError::UnknownKind("slider".to_string()).to_string(),
            "unknown control kind: slider"
        );
        assert_eq!(
            BuildError::InvalidFocus {
                index: 4,
                focusable: 2
            }
            .to_string(),
            "focused row 4 out of range (2 focusable rows)"
        );
    }

    #[test]
    fn test_build_error_downcasts_from_anyhow() {
        let err: anyhow::Error = BuildError::NestedRow.into();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::NestedRow)
        ));
    }
}
