#![forbid(unsafe_code)]

//! Event recorder and ordering assertions.
//!
//! An [`EventRecorder`] subscribes to every event kind on a control and
//! keeps them in emission order. Expectation helpers return a
//! [`ExpectationError`] describing the first divergence instead of
//! panicking, so callers can attach their own context.

use std::cell::RefCell;
use std::rc::Rc;

use ratekit_core::{EventKind, EventKinds, ListenerId, RatingControl, RatingEvent};

/// First point where recorded events diverged from an expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectationError {
    pub index: usize,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl std::fmt::Display for ExpectationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "<nothing>".to_string());
        write!(
            f,
            "event #{} mismatch: expected {}, got {}",
            self.index,
            show(&self.expected),
            show(&self.actual)
        )
    }
}

impl std::error::Error for ExpectationError {}

/// Records events emitted by one control.
#[derive(Debug)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<RatingEvent>>>,
    listener: ListenerId,
}

impl EventRecorder {
    /// Subscribe to all event kinds on `control`.
    pub fn attach(control: &mut RatingControl) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let listener = control.add_listener(EventKinds::all(), move |event| {
            sink.borrow_mut().push(*event);
        });
        Self { events, listener }
    }

    /// Unsubscribe; recorded events are kept.
    pub fn detach(&self, control: &mut RatingControl) -> bool {
        control.remove_listener(self.listener)
    }

    #[must_use]
    pub fn events(&self) -> Vec<RatingEvent> {
        self.events.borrow().clone()
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.borrow().iter().map(RatingEvent::kind).collect()
    }

    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.kind() == kind)
            .count()
    }

    /// Tentative values carried by recorded preview events.
    #[must_use]
    pub fn tentative_sequence(&self) -> Vec<u32> {
        self.events
            .borrow()
            .iter()
            .filter_map(RatingEvent::tentative_rating)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<RatingEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Check the recorded kinds against `expected`, in order.
    pub fn expect_sequence(&self, expected: &[EventKind]) -> Result<(), ExpectationError> {
        let actual = self.kinds();
        compare(expected, &actual, |k| k.as_str().to_string())
    }

    /// Check the recorded events against `expected`, payloads included.
    pub fn expect_events(&self, expected: &[RatingEvent]) -> Result<(), ExpectationError> {
        let actual = self.events();
        compare(expected, &actual, |e| format!("{e:?}"))
    }
}

fn compare<T: PartialEq>(
    expected: &[T],
    actual: &[T],
    describe: impl Fn(&T) -> String,
) -> Result<(), ExpectationError> {
    let len = expected.len().max(actual.len());
    for index in 0..len {
        let (e, a) = (expected.get(index), actual.get(index));
        if e != a {
            return Err(ExpectationError {
                index,
                expected: e.map(&describe),
                actual: a.map(&describe),
            });
        }
    }
    Ok(())
}
