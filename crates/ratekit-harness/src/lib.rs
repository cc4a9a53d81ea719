#![forbid(unsafe_code)]

//! Test harness for ratekit controls.
//!
//! # Role in ratekit
//! Drives a [`RatingControl`](ratekit_core::RatingControl) through scripted
//! input in a fixed order and records what it emits, so scenario tests read
//! as a list of actions followed by an expected event sequence.
//!
//! # Primary responsibilities
//! - **Sequencer**: ordered, paced delivery with deferred attribute writes.
//! - **EventRecorder**: listener-backed event log with ordering checks.
//! - **Clock**: manual (deterministic) or wall-clock pacing.
//! - **TraceWriter**: JSONL traces with stable timestamps.
//!
//! ```
//! use ratekit_core::{EventKind, Key, RatingControl, RatingOptions};
//! use ratekit_harness::{Action, EventRecorder, Sequencer};
//!
//! let mut control = RatingControl::new(None, RatingOptions::default()).unwrap();
//! let recorder = EventRecorder::attach(&mut control);
//! let mut seq = Sequencer::default();
//! seq.push(Action::Focus).push(Action::KeyDown(Key::Escape));
//! seq.run(&mut control);
//! recorder
//!     .expect_sequence(&[EventKind::PreviewChange, EventKind::Cancel])
//!     .unwrap();
//! ```

pub mod action;
pub mod clock;
pub mod recorder;
pub mod sequencer;
pub mod trace;

pub use action::Action;
pub use clock::{Clock, ManualClock, SystemClock};
pub use recorder::{EventRecorder, ExpectationError};
pub use sequencer::{
    DEFAULT_STEP_MS, RunReport, Sequencer, SequencerConfig, StepKind, StepRecord,
};
pub use trace::{TraceWriter, event_json};
