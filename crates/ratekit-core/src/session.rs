#![forbid(unsafe_code)]

//! Interaction session states.
//!
//! A session is whatever input is currently driving the tentative rating.
//! Pointer and keyboard sessions are mutually exclusive: the enum makes it
//! impossible to hold a pointer capture and a keyboard preview at once.
//!
//! ```text
//!            hover            down             up (over control)
//!   Idle ─────────────▶ Hover ─────▶ Drag ─────────────────────▶ Hover
//!    │  ▲                 │            │ up outside / cancel
//!    │  └──── leave ──────┘            └──────────────▶ Idle
//!    │ focus / key
//!    ▼
//!  Keyboard ── Enter / Tab / Escape / blur ──▶ Idle
//! ```

/// What the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// Star at a 0-based index; previews rating `index + 1`.
    Star(usize),
    /// The area before the first star; previews 0 while dragging.
    LeadingEdge,
    /// Anywhere outside the stars.
    Outside,
}

impl PointerTarget {
    /// Map an optional star index, `None` meaning outside.
    #[must_use]
    pub fn from_star(index: Option<usize>) -> Self {
        index.map_or(Self::Outside, Self::Star)
    }
}

/// The active interaction session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Session {
    /// No preview is open.
    #[default]
    Idle,
    /// Pointer hovering without capture.
    Hover {
        tentative: u32,
        /// The pointer session already produced a `change` (a release on a
        /// new value), so leaving emits nothing.
        committed: bool,
    },
    /// Pointer captured between down and up/cancel.
    Drag { tentative: u32 },
    /// Keyboard preview opened by focus or a navigation key.
    Keyboard { tentative: u32 },
}

impl Session {
    /// Value currently previewed, if any.
    #[must_use]
    pub const fn tentative(self) -> Option<u32> {
        match self {
            Self::Idle => None,
            Self::Hover { tentative, .. }
            | Self::Drag { tentative }
            | Self::Keyboard { tentative } => Some(tentative),
        }
    }

    #[must_use]
    pub const fn kind(self) -> SessionKind {
        match self {
            Self::Idle => SessionKind::Idle,
            Self::Hover { .. } => SessionKind::Hover,
            Self::Drag { .. } => SessionKind::Drag,
            Self::Keyboard { .. } => SessionKind::Keyboard,
        }
    }

    /// True while the pointer is captured.
    #[must_use]
    pub const fn is_captured(self) -> bool {
        matches!(self, Self::Drag { .. })
    }

    /// Same session with its preview clamped into `[min, max]`.
    #[must_use]
    pub fn clamped(self, min: u32, max: u32) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Hover {
                tentative,
                committed,
            } => Self::Hover {
                tentative: tentative.clamp(min, max),
                committed,
            },
            Self::Drag { tentative } => Self::Drag {
                tentative: tentative.clamp(min, max),
            },
            Self::Keyboard { tentative } => Self::Keyboard {
                tentative: tentative.clamp(min, max),
            },
        }
    }
}

/// Payload-free view of [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionKind {
    Idle,
    Hover,
    Drag,
    Keyboard,
}

impl SessionKind {
    /// Returns the stable string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Hover => "hover",
            Self::Drag => "drag",
            Self::Keyboard => "keyboard",
        }
    }
}
