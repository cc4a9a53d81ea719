#![forbid(unsafe_code)]

//! Ordered, paced delivery of scripted input.
//!
//! A [`Sequencer`] owns a queue of [`Action`]s and plays them against a
//! control one at a time. Between actions it advances its [`Clock`] by the
//! configured step. Attribute writes are held back and flushed on the next
//! tick, which always happens before the following action runs and once
//! more at the end of the run.
//!
//! # Invariants
//!
//! 1. Actions run in queue order; the sequencer never reorders or batches.
//! 2. A deferred write queued at step `n` is applied before step `n + 1`.
//! 3. With a [`ManualClock`] two runs of the same script produce identical
//!    reports.

use std::collections::VecDeque;

use ratekit_core::{RatingControl, RatingEvent};

use crate::action::Action;
use crate::clock::{Clock, ManualClock, SystemClock};

/// Default pause between actions.
pub const DEFAULT_STEP_MS: u64 = 10;

/// Pacing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerConfig {
    /// Use a [`ManualClock`] instead of sleeping.
    pub deterministic: bool,
    /// Time advanced after each action.
    pub step_ms: u64,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            deterministic: true,
            step_ms: DEFAULT_STEP_MS,
        }
    }
}

impl SequencerConfig {
    /// Defaults overridden by `RATEKIT_DETERMINISTIC` and `RATEKIT_STEP_MS`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            deterministic: env_flag("RATEKIT_DETERMINISTIC").unwrap_or(defaults.deterministic),
            step_ms: env_u64("RATEKIT_STEP_MS").unwrap_or(defaults.step_ms),
        }
    }

    #[must_use]
    pub fn with_deterministic(mut self, deterministic: bool) -> Self {
        self.deterministic = deterministic;
        self
    }

    #[must_use]
    pub fn with_step_ms(mut self, step_ms: u64) -> Self {
        self.step_ms = step_ms;
        self
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn env_flag(key: &str) -> Option<bool> {
    match std::env::var(key).ok()?.trim() {
        "1" | "true" | "TRUE" => Some(true),
        "0" | "false" | "FALSE" => Some(false),
        _ => None,
    }
}

/// What the sequencer did at one point in the run.
#[derive(Debug, Clone, PartialEq)]
pub enum StepKind {
    /// An action from the queue.
    Action(Action),
    /// A flush of one deferred attribute write.
    Tick { name: String, value: String },
}

impl StepKind {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Action(action) => action.name(),
            Self::Tick { .. } => "tick",
        }
    }
}

/// One entry in a [`RunReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub index: usize,
    pub at_ms: u64,
    pub kind: StepKind,
    pub event: Option<RatingEvent>,
    pub user_rating: u32,
    pub tentative_rating: Option<u32>,
}

/// Result of [`Sequencer::run`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub steps: Vec<StepRecord>,
}

impl RunReport {
    /// Every event emitted during the run, in order.
    #[must_use]
    pub fn events(&self) -> Vec<RatingEvent> {
        self.steps.iter().filter_map(|step| step.event).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Committed value after the last step, if anything ran.
    #[must_use]
    pub fn final_user_rating(&self) -> Option<u32> {
        self.steps.last().map(|step| step.user_rating)
    }
}

/// Queue of scripted input with a pluggable clock.
pub struct Sequencer {
    config: SequencerConfig,
    clock: Box<dyn Clock>,
    queue: VecDeque<Action>,
    pending: Vec<(String, String)>,
}

impl std::fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("config", &self.config)
            .field("now_ms", &self.clock.now_ms())
            .field("queued", &self.queue.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(SequencerConfig::default())
    }
}

impl Sequencer {
    /// Sequencer with the clock implied by `config.deterministic`.
    #[must_use]
    pub fn new(config: SequencerConfig) -> Self {
        let clock: Box<dyn Clock> = if config.deterministic {
            Box::new(ManualClock::new())
        } else {
            Box::new(SystemClock::new())
        };
        Self::with_clock(config, clock)
    }

    /// Sequencer driven by a caller-supplied clock.
    #[must_use]
    pub fn with_clock(config: SequencerConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            queue: VecDeque::new(),
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> SequencerConfig {
        self.config
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Number of actions still queued.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn push(&mut self, action: Action) -> &mut Self {
        self.queue.push_back(action);
        self
    }

    pub fn extend(&mut self, actions: impl IntoIterator<Item = Action>) -> &mut Self {
        self.queue.extend(actions);
        self
    }

    /// Pointer moves onto star `index` from off the control.
    pub fn hover(&mut self, index: usize) -> &mut Self {
        self.push(Action::PointerEnter {
            from: None,
            to: Some(index),
        })
    }

    /// Pointer moves off the control from star `index`.
    pub fn leave(&mut self, index: usize) -> &mut Self {
        self.push(Action::PointerEnter {
            from: Some(index),
            to: None,
        })
    }

    /// Press and release on the same star.
    pub fn click(&mut self, index: usize) -> &mut Self {
        self.push(Action::PointerDown(index))
            .push(Action::PointerUp(Some(index)))
    }

    /// Press on `from`, scrub star by star to `to`, release on `to`.
    pub fn drag(&mut self, from: usize, to: usize) -> &mut Self {
        self.push(Action::PointerDown(from));
        let mut at = from;
        while at != to {
            let next = if to > at { at + 1 } else { at - 1 };
            self.push(Action::PointerEnter {
                from: Some(at),
                to: Some(next),
            });
            at = next;
        }
        self.push(Action::PointerUp(Some(to)))
    }

    /// Press `key` `times` times.
    pub fn keys(&mut self, key: ratekit_core::Key, times: usize) -> &mut Self {
        for _ in 0..times {
            self.push(Action::KeyDown(key));
        }
        self
    }

    /// Play every queued action against `control`.
    pub fn run(&mut self, control: &mut RatingControl) -> RunReport {
        let mut report = RunReport::default();

        let _span = tracing::debug_span!("sequencer_run", queued = self.queue.len()).entered();

        while let Some(action) = self.queue.pop_front() {
            self.flush(control, &mut report);

            let event = if action.is_deferred() {
                if let Action::WriteAttribute { name, value } = &action {
                    self.pending.push((name.clone(), value.clone()));
                }
                None
            } else {
                action.apply(control)
            };

            tracing::trace!(
                action = action.name(),
                event = ?event.map(|e| e.kind()),
                user_rating = control.user_rating(),
                "sequencer step"
            );

            let pause = match &action {
                Action::Wait(ms) => *ms,
                _ => self.config.step_ms,
            };
            self.record(&mut report, control, StepKind::Action(action), event);
            self.clock.advance(pause);
        }
        self.flush(control, &mut report);

        tracing::debug!(
            steps = report.len(),
            events = report.events().len(),
            "sequencer run finished"
        );
        report
    }

    fn flush(&mut self, control: &mut RatingControl, report: &mut RunReport) {
        for (name, value) in std::mem::take(&mut self.pending) {
            let event = control.write_attribute(&name, &value);
            self.record(report, control, StepKind::Tick { name, value }, event);
        }
    }

    fn record(
        &self,
        report: &mut RunReport,
        control: &RatingControl,
        kind: StepKind,
        event: Option<RatingEvent>,
    ) {
        report.steps.push(StepRecord {
            index: report.steps.len(),
            at_ms: self.clock.now_ms(),
            kind,
            event,
            user_rating: control.user_rating(),
            tentative_rating: control.tentative_rating(),
        });
    }
}
