//! Crate-level error types.

use std::fmt;

/// Errors produced by the virtual-cursor crate.
#[derive(Debug)]
pub enum CursorError {
    /// The hovered view cannot produce a camera transform (not yet
    /// initialized, zero-sized, or degenerate). Callers skip the event.
    ViewUnavailable(String),
    /// Scene geometry was constructed from inconsistent data.
    InvalidGeometry(String),
    /// A parameter-node value could not be parsed.
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Offending raw value.
        value: String,
    },
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ViewUnavailable(reason) => {
                write!(f, "view unavailable: {reason}")
            }
            Self::InvalidGeometry(msg) => {
                write!(f, "invalid geometry: {msg}")
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid value {value:?} for parameter '{name}'")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for CursorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CursorError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn display_and_source() {
        let err = CursorError::InvalidParameter {
            name: "Scale".into(),
            value: "big".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value \"big\" for parameter 'Scale'"
        );
        assert!(err.source().is_none());

        let io: CursorError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(io.to_string().starts_with("I/O error"));
        assert!(io.source().is_some());
    }
}
