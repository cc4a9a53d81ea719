#![forbid(unsafe_code)]

//! Logging hooks.
//!
//! With the `tracing` feature the control logs every emitted event at
//! `debug` and every key it handles at `trace`. The macros are re-exported
//! at the crate root so hosts can log alongside the control without naming
//! `tracing` themselves.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
