#![forbid(unsafe_code)]

//! Scripted input actions.
//!
//! Each variant mirrors one entry point of [`RatingControl`]. Attribute
//! writes are the exception: they are deferred to the next sequencer tick,
//! the way a DOM mutation observer delivers them on the next microtask.

use ratekit_core::host::aria;
use ratekit_core::{Key, PointerTarget, RatingControl, RatingEvent};

/// One step of scripted input.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Focus,
    Blur,
    /// Pointer crossed from one star to another; `None` is off the stars.
    PointerEnter {
        from: Option<usize>,
        to: Option<usize>,
    },
    /// Pointer moved onto an arbitrary target (e.g. the leading edge).
    PointerOver(PointerTarget),
    PointerDown(usize),
    /// Release over a star, or outside when `None`.
    PointerUp(Option<usize>),
    PointerCancel,
    KeyDown(Key),
    /// Deferred attribute write on the host.
    WriteAttribute { name: String, value: String },
    SetDisabled(bool),
    /// Let time pass without input.
    Wait(u64),
}

impl Action {
    /// Deferred write of `aria-valuenow`.
    #[must_use]
    pub fn write_value_now(value: impl ToString) -> Self {
        Self::WriteAttribute {
            name: aria::VALUE_NOW.to_string(),
            value: value.to_string(),
        }
    }

    /// Key press from a DOM key code.
    #[must_use]
    pub fn key_code(code: u32) -> Self {
        Self::KeyDown(Key::from_key_code(code))
    }

    /// Short name used in traces.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::PointerEnter { .. } => "pointer_enter",
            Self::PointerOver(_) => "pointer_over",
            Self::PointerDown(_) => "pointer_down",
            Self::PointerUp(_) => "pointer_up",
            Self::PointerCancel => "pointer_cancel",
            Self::KeyDown(_) => "key_down",
            Self::WriteAttribute { .. } => "write_attribute",
            Self::SetDisabled(_) => "set_disabled",
            Self::Wait(_) => "wait",
        }
    }

    /// True for actions whose effect lands on the next tick.
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::WriteAttribute { .. })
    }

    /// Deliver a synchronous action to the control.
    ///
    /// Deferred actions and waits do nothing here.
    pub fn apply(&self, control: &mut RatingControl) -> Option<RatingEvent> {
        match self {
            Self::Focus => control.focus(),
            Self::Blur => control.blur(),
            Self::PointerEnter { from, to } => control.pointer_enter(*from, *to),
            Self::PointerOver(target) => control.pointer_over(*target),
            Self::PointerDown(index) => control.pointer_down(PointerTarget::Star(*index)),
            Self::PointerUp(index) => control.pointer_up(PointerTarget::from_star(*index)),
            Self::PointerCancel => control.pointer_cancel(),
            Self::KeyDown(key) => control.key_down(*key),
            Self::SetDisabled(disabled) => {
                control.set_disabled(*disabled);
                None
            }
            Self::WriteAttribute { .. } | Self::Wait(_) => None,
        }
    }
}
