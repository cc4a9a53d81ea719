#![forbid(unsafe_code)]

//! Construction errors for [`RatingControl`](crate::RatingControl).
//!
//! Only construction can fail. Out-of-range numbers are coerced where they
//! are assigned and never reported.

use crate::host::NodeKind;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RatingError>;

/// Errors raised while building a rating control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The mount point is not an element node.
    InvalidHost { kind: NodeKind },
    /// `tooltipStrings` was present but neither `null` nor an array.
    InvalidTooltips { found: String },
    /// Declarative options were not a JSON object.
    InvalidOptions(String),
}

impl std::fmt::Display for RatingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHost { kind } => {
                write!(
                    f,
                    "invalid host: rating control expects an element, got {}",
                    kind.as_str()
                )
            }
            Self::InvalidTooltips { found } => {
                write!(f, "invalid tooltipStrings: expected an array or null, got {found}")
            }
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
        }
    }
}

impl std::error::Error for RatingError {}
