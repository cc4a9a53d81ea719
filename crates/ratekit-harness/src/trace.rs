#![forbid(unsafe_code)]

//! JSONL traces of sequencer runs.
//!
//! One line per step:
//!
//! ```text
//! {"ts":"T000000","step":0,"at_ms":0,"action":"focus","events":[{"kind":"previewchange","tentative_rating":0}],"user_rating":0,"tentative_rating":0}
//! ```
//!
//! In deterministic mode `ts` is a counter (`T000000`, `T000001`, ...) so
//! traces of the same script are byte-identical.

use std::io::{self, Write};

use ratekit_core::RatingEvent;
use serde_json::{Value, json};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::sequencer::{RunReport, StepRecord};

/// Writes [`StepRecord`]s as JSON lines.
#[derive(Debug)]
pub struct TraceWriter<W: Write> {
    out: W,
    deterministic: bool,
    lines: u64,
}

impl<W: Write> TraceWriter<W> {
    #[must_use]
    pub fn new(out: W, deterministic: bool) -> Self {
        Self {
            out,
            deterministic,
            lines: 0,
        }
    }

    /// Lines written so far.
    #[must_use]
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn write_step(&mut self, step: &StepRecord) -> io::Result<()> {
        let events = step
            .event
            .iter()
            .map(event_json)
            .collect::<serde_json::Result<Vec<Value>>>()
            .map_err(io::Error::other)?;
        let line = json!({
            "ts": self.timestamp(),
            "step": step.index,
            "at_ms": step.at_ms,
            "action": step.kind.name(),
            "events": events,
            "user_rating": step.user_rating,
            "tentative_rating": step.tentative_rating,
        });
        writeln!(self.out, "{line}")?;
        self.lines += 1;
        Ok(())
    }

    pub fn write_report(&mut self, report: &RunReport) -> io::Result<()> {
        for step in &report.steps {
            self.write_step(step)?;
        }
        self.out.flush()
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn timestamp(&self) -> String {
        if self.deterministic {
            format!("T{:06}", self.lines)
        } else {
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            format!("{}.{:03}", now.as_secs(), now.subsec_millis())
        }
    }
}

/// JSON form of one event, tagged by `kind`.
pub fn event_json(event: &RatingEvent) -> serde_json::Result<Value> {
    serde_json::to_value(event)
}
