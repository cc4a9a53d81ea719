#![forbid(unsafe_code)]

//! Typed rating events and the listener registry.
//!
//! # Design
//!
//! Events are a closed enum with typed payloads; listeners subscribe to a set
//! of [`EventKinds`] and receive matching events in registration order.
//!
//! # Invariants
//!
//! 1. `PreviewChange` fires only when the tentative rating takes a new
//!    non-null value.
//! 2. `Change` fires only when the committed rating actually changes.
//! 3. `Cancel` fires only when a session ends without a `Change`.
//! 4. Removing a listener never affects delivery to other listeners.

use bitflags::bitflags;

/// Discriminant of a [`RatingEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    PreviewChange,
    Change,
    Cancel,
}

impl EventKind {
    /// DOM-style event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreviewChange => "previewchange",
            Self::Change => "change",
            Self::Cancel => "cancel",
        }
    }
}

bitflags! {
    /// Set of event kinds a listener is interested in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventKinds: u8 {
        const PREVIEW_CHANGE = 1 << 0;
        const CHANGE = 1 << 1;
        const CANCEL = 1 << 2;
    }
}

impl From<EventKind> for EventKinds {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::PreviewChange => Self::PREVIEW_CHANGE,
            EventKind::Change => Self::CHANGE,
            EventKind::Cancel => Self::CANCEL,
        }
    }
}

/// An event emitted by a rating control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum RatingEvent {
    /// The tentative rating moved to a new value.
    PreviewChange { tentative_rating: u32 },
    /// The committed rating changed.
    Change { user_rating: u32, previous: u32 },
    /// An interaction session ended without a commit.
    Cancel,
}

impl RatingEvent {
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::PreviewChange { .. } => EventKind::PreviewChange,
            Self::Change { .. } => EventKind::Change,
            Self::Cancel => EventKind::Cancel,
        }
    }

    /// Tentative rating carried by a preview event.
    #[must_use]
    pub const fn tentative_rating(&self) -> Option<u32> {
        match self {
            Self::PreviewChange { tentative_rating } => Some(*tentative_rating),
            _ => None,
        }
    }
}

/// Handle returned by [`Listeners::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&RatingEvent)>;

struct Entry {
    id: ListenerId,
    kinds: EventKinds,
    callback: Callback,
}

/// Registry of event callbacks.
#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    entries: Vec<Entry>,
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Listeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for the given kinds.
    pub fn add(
        &mut self,
        kinds: impl Into<EventKinds>,
        callback: impl FnMut(&RatingEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            kinds: kinds.into(),
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a callback. Returns false if the id was unknown.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver an event to every interested callback, in registration order.
    pub fn dispatch(&mut self, event: &RatingEvent) {
        let kind = EventKinds::from(event.kind());
        for entry in &mut self.entries {
            if entry.kinds.intersects(kind) {
                (entry.callback)(event);
            }
        }
    }
}
