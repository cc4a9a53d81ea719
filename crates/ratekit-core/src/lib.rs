#![forbid(unsafe_code)]

//! Core: the interaction state machine of a star-rating control.
//!
//! # Role in ratekit
//! `ratekit-core` owns the value model (`max_rating`, committed
//! `user_rating`, display-only `average_rating`), the transient preview, and
//! the rules for turning pointer, keyboard, focus, and attribute input into
//! `previewchange`, `change`, and `cancel` events. Nothing here renders.
//!
//! # Primary responsibilities
//! - **RatingControl**: session transitions and event emission.
//! - **RatingOptions**: defaults, declarative JSON options, numeric coercion.
//! - **Key**: DOM key codes to direction-aware intents.
//! - **Listeners**: typed subscribe/unsubscribe.
//! - **HostElement**: the mount point and its ARIA attribute mirror.
//!
//! # How it fits in the system
//! `ratekit-harness` drives a `RatingControl` through scripted input and
//! records what it emits. Any UI layer can do the same: translate its native
//! events into the entry points below and read state back off the control.
//!
//! ```
//! use ratekit_core::{Key, RatingControl, RatingEvent, RatingOptions};
//!
//! let mut control = RatingControl::new(None, RatingOptions::default()).unwrap();
//! control.focus();
//! control.key_down(Key::Right);
//! assert_eq!(
//!     control.key_down(Key::Enter),
//!     Some(RatingEvent::Change { user_rating: 1, previous: 0 })
//! );
//! ```

pub mod control;
pub mod error;
pub mod event;
pub mod host;
pub mod key;
pub mod logging;
pub mod options;
pub mod session;
pub mod tooltip;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

pub use control::{RatingControl, RatingSnapshot};
pub use error::{RatingError, Result};
pub use event::{EventKind, EventKinds, ListenerId, Listeners, RatingEvent};
pub use host::{HostElement, NodeKind};
pub use key::{Key, KeyIntent, LayoutDirection};
pub use options::{DEFAULT_MAX_RATING, RatingOptions};
pub use session::{PointerTarget, Session, SessionKind};
pub use tooltip::Tooltips;
