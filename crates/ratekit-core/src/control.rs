#![forbid(unsafe_code)]

//! The rating control: value model, session transitions, and event emission.
//!
//! # Invariants
//!
//! 1. `0 <= user_rating <= max_rating` and `0 <= average_rating <= max_rating`.
//! 2. An open preview is always within `[min_rating, max_rating]`, where
//!    `min_rating` is 0 with clear enabled and 1 otherwise.
//! 3. Each input call mutates state at most once and returns (and dispatches)
//!    at most one event.
//! 4. While `disabled`, interaction inputs are ignored and no event is ever
//!    dispatched. Direct value writes still apply.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Non-element host | Text/comment/document node passed | `RatingError::InvalidHost` |
//! | Bad tooltip list | Declarative `tooltipStrings` not an array | `RatingError::InvalidTooltips` |
//! | Out-of-range number | Negative, NaN, fractional, above max | Coerced at assignment |

use crate::error::{RatingError, Result};
use crate::event::{EventKinds, ListenerId, Listeners, RatingEvent};
use crate::host::{HostElement, OPTIONS_ATTRIBUTE, aria};
use crate::key::{Key, KeyIntent, LayoutDirection};
use crate::options::{
    RatingOptions, coerce_average_rating, coerce_max_rating, coerce_user_rating,
};
use crate::session::{PointerTarget, Session, SessionKind};
use crate::tooltip::Tooltips;

/// Point-in-time view of every field, for diagnostics and traces.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatingSnapshot {
    pub max_rating: u32,
    pub user_rating: u32,
    pub average_rating: f64,
    pub disabled: bool,
    pub enable_clear: bool,
    pub tentative_rating: Option<u32>,
    pub pointer_captured: bool,
    pub focused: bool,
    pub session: SessionKind,
}

/// Interaction core of a star-rating widget.
#[derive(Debug)]
pub struct RatingControl {
    host: HostElement,
    max_rating: u32,
    user_rating: u32,
    average_rating: f64,
    disabled: bool,
    enable_clear: bool,
    direction: LayoutDirection,
    tooltip_strings: Option<Vec<String>>,
    tooltips: Tooltips,
    session: Session,
    focused: bool,
    listeners: Listeners,
}

impl RatingControl {
    /// Mount a control on `host` (a fresh `<div>` when `None`).
    pub fn new(host: Option<HostElement>, options: RatingOptions) -> Result<Self> {
        let host = host.unwrap_or_default();
        if !host.kind().is_mountable() {
            return Err(RatingError::InvalidHost { kind: host.kind() });
        }

        let options = options.normalized();
        let tooltips = Tooltips::new(options.max_rating, options.tooltip_strings.as_deref());
        let mut control = Self {
            host,
            max_rating: options.max_rating,
            user_rating: options.user_rating,
            average_rating: options.average_rating,
            disabled: options.disabled,
            enable_clear: options.enable_clear,
            direction: options.direction,
            tooltip_strings: options.tooltip_strings,
            tooltips,
            session: Session::Idle,
            focused: false,
            listeners: Listeners::new(),
        };
        control.reflect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            max_rating = control.max_rating,
            user_rating = control.user_rating,
            disabled = control.disabled,
            enable_clear = control.enable_clear,
            "rating control mounted"
        );

        Ok(control)
    }

    /// Mount on `host`, reading options from its `data-rating-options`
    /// attribute when present.
    pub fn from_host(host: HostElement) -> Result<Self> {
        if !host.kind().is_mountable() {
            return Err(RatingError::InvalidHost { kind: host.kind() });
        }
        let options = match host.attribute(OPTIONS_ATTRIBUTE) {
            Some(source) => RatingOptions::parse(source)?,
            None => RatingOptions::default(),
        };
        Self::new(Some(host), options)
    }

    // --- Properties -------------------------------------------------------

    #[must_use]
    pub fn max_rating(&self) -> u32 {
        self.max_rating
    }

    #[must_use]
    pub fn user_rating(&self) -> u32 {
        self.user_rating
    }

    #[must_use]
    pub fn average_rating(&self) -> f64 {
        self.average_rating
    }

    #[must_use]
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn enable_clear(&self) -> bool {
        self.enable_clear
    }

    #[must_use]
    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    /// Value being previewed, `None` when no session is open.
    #[must_use]
    pub fn tentative_rating(&self) -> Option<u32> {
        self.session.tentative()
    }

    #[must_use]
    pub fn session(&self) -> Session {
        self.session
    }

    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub fn is_pointer_captured(&self) -> bool {
        self.session.is_captured()
    }

    #[must_use]
    pub fn tooltips(&self) -> &Tooltips {
        &self.tooltips
    }

    #[must_use]
    pub fn host(&self) -> &HostElement {
        &self.host
    }

    /// Lowest value an interaction can reach.
    #[must_use]
    pub fn min_rating(&self) -> u32 {
        if self.enable_clear { 0 } else { 1 }
    }

    #[must_use]
    pub fn snapshot(&self) -> RatingSnapshot {
        RatingSnapshot {
            max_rating: self.max_rating,
            user_rating: self.user_rating,
            average_rating: self.average_rating,
            disabled: self.disabled,
            enable_clear: self.enable_clear,
            tentative_rating: self.session.tentative(),
            pointer_captured: self.session.is_captured(),
            focused: self.focused,
            session: self.session.kind(),
        }
    }

    /// Assign `maxRating`; committed and average values clamp downward.
    pub fn set_max_rating(&mut self, value: f64) {
        let max = coerce_max_rating(value, self.max_rating);
        if max == self.max_rating {
            return;
        }
        self.max_rating = max;
        self.user_rating = self.user_rating.min(max);
        self.average_rating = self.average_rating.min(f64::from(max));
        self.session = self.session.clamped(self.min_rating(), max);
        self.tooltips = Tooltips::new(max, self.tooltip_strings.as_deref());
        self.reflect();
    }

    /// Host-driven assignment of the committed value. Never emits.
    pub fn set_user_rating(&mut self, value: f64) {
        self.user_rating = coerce_user_rating(value, self.user_rating, self.max_rating);
        self.reflect();
    }

    pub fn set_average_rating(&mut self, value: f64) {
        self.average_rating = coerce_average_rating(value, self.average_rating, self.max_rating);
    }

    /// Disabling ends any open session without emitting.
    pub fn set_disabled(&mut self, disabled: bool) {
        if self.disabled == disabled {
            return;
        }
        self.disabled = disabled;
        if disabled {
            self.session = Session::Idle;
        }
        self.reflect();
    }

    pub fn set_enable_clear(&mut self, enable_clear: bool) {
        self.enable_clear = enable_clear;
        self.session = self.session.clamped(self.min_rating(), self.max_rating);
        self.reflect();
    }

    pub fn set_direction(&mut self, direction: LayoutDirection) {
        self.direction = direction;
    }

    pub fn set_tooltip_strings(&mut self, strings: Option<Vec<String>>) {
        self.tooltips = Tooltips::new(self.max_rating, strings.as_deref());
        self.tooltip_strings = strings;
    }

    // --- Listeners --------------------------------------------------------

    /// Subscribe to one or more event kinds.
    pub fn add_listener(
        &mut self,
        kinds: impl Into<EventKinds>,
        callback: impl FnMut(&RatingEvent) + 'static,
    ) -> ListenerId {
        self.listeners.add(kinds, callback)
    }

    /// Unsubscribe. Other listeners keep receiving events.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // --- Focus ------------------------------------------------------------

    /// Keyboard focus arrived. Opens a keyboard preview at the committed
    /// value unless a pointer session is already running.
    pub fn focus(&mut self) -> Option<RatingEvent> {
        if self.focused {
            return None;
        }
        self.focused = true;
        if self.disabled || self.session != Session::Idle {
            return None;
        }
        let start = self.clamp_to_range(self.user_rating);
        self.preview(Session::Keyboard { tentative: start })
    }

    /// Focus left. An open keyboard preview is cancelled.
    pub fn blur(&mut self) -> Option<RatingEvent> {
        if !self.focused {
            return None;
        }
        self.focused = false;
        if self.disabled {
            return None;
        }
        match self.session {
            Session::Keyboard { .. } => self.cancel_session(),
            _ => None,
        }
    }

    // --- Pointer ----------------------------------------------------------

    /// Pointer moved from one star to another; `None` means off the stars.
    pub fn pointer_enter(&mut self, from: Option<usize>, to: Option<usize>) -> Option<RatingEvent> {
        if from.is_some() && from == to {
            return None;
        }
        self.pointer_over(PointerTarget::from_star(to))
    }

    /// Pointer is now over `target`.
    ///
    /// Without capture this previews the hovered star, and leaving the stars
    /// ends the hover. While captured the preview scrubs, and moving off the
    /// stars keeps the last value.
    pub fn pointer_over(&mut self, target: PointerTarget) -> Option<RatingEvent> {
        if self.disabled {
            return None;
        }
        match (self.session, target) {
            (Session::Keyboard { .. }, _) => None,
            (Session::Drag { .. }, _) => {
                let next = self.pointer_rating(target)?;
                self.preview(Session::Drag { tentative: next })
            }
            (Session::Hover { tentative, .. }, PointerTarget::Star(_))
                if self.pointer_rating(target) == Some(tentative) =>
            {
                None
            }
            (_, PointerTarget::Star(_)) => {
                let next = self.pointer_rating(target)?;
                self.preview(Session::Hover {
                    tentative: next,
                    committed: false,
                })
            }
            (Session::Hover { committed, .. }, _) => {
                if committed {
                    self.session = Session::Idle;
                    self.reflect();
                    None
                } else {
                    self.cancel_session()
                }
            }
            (Session::Idle, _) => None,
        }
    }

    /// Pointer pressed. Captures the pointer; the preview only moves if the
    /// pressed star differs from what was already previewed.
    pub fn pointer_down(&mut self, target: PointerTarget) -> Option<RatingEvent> {
        if self.disabled || self.session.is_captured() {
            return None;
        }
        if !matches!(target, PointerTarget::Star(_)) {
            return None;
        }
        let next = self.pointer_rating(target)?;
        self.preview(Session::Drag { tentative: next })
    }

    /// Pointer released. Over the control this commits the preview;
    /// outside it cancels.
    pub fn pointer_up(&mut self, target: PointerTarget) -> Option<RatingEvent> {
        if self.disabled {
            return None;
        }
        let Session::Drag { tentative } = self.session else {
            return None;
        };
        if target == PointerTarget::Outside {
            return self.cancel_session();
        }

        let previous = self.user_rating;
        self.user_rating = tentative;
        self.session = Session::Hover {
            tentative,
            committed: tentative != previous,
        };
        self.reflect();
        self.change_from(previous)
    }

    /// Pointer interrupted. The committed value is never touched.
    pub fn pointer_cancel(&mut self) -> Option<RatingEvent> {
        if self.disabled || !self.session.is_captured() {
            return None;
        }
        self.cancel_session()
    }

    // --- Keyboard ---------------------------------------------------------

    /// Handle a key press while focused.
    pub fn key_down(&mut self, key: Key) -> Option<RatingEvent> {
        if self.disabled || !self.focused || self.session.is_captured() {
            return None;
        }
        let intent = key.intent(self.direction);

        #[cfg(feature = "tracing")]
        tracing::trace!(?key, ?intent, session = self.session.kind().as_str(), "rating key");

        let (min, max) = (self.min_rating(), self.max_rating);
        let current = self
            .session
            .tentative()
            .unwrap_or_else(|| self.clamp_to_range(self.user_rating));
        if !intent.is_navigation() {
            return match intent {
                KeyIntent::Commit | KeyIntent::CommitAndLeave => self.commit_keyboard(),
                KeyIntent::Cancel => self.cancel_preview(),
                _ => None,
            };
        }
        let next = match intent {
            KeyIntent::Increment => current.saturating_add(1).min(max),
            KeyIntent::Decrement => current.saturating_sub(1).max(min),
            KeyIntent::First => min,
            KeyIntent::Last => max,
            KeyIntent::Set(digit) => u32::from(digit).clamp(min, max),
            _ => return None,
        };
        self.preview(Session::Keyboard { tentative: next })
    }

    /// Convenience for hosts that deliver DOM key codes.
    pub fn key_code(&mut self, code: u32) -> Option<RatingEvent> {
        self.key_down(Key::from_key_code(code))
    }

    // --- Direct value writes ----------------------------------------------

    /// Direct assignment mirroring an external `aria-valuenow` write.
    /// Applies immediately, even mid-session and while disabled.
    pub fn set_value_now(&mut self, value: f64) -> Option<RatingEvent> {
        let previous = self.user_rating;
        self.user_rating = coerce_user_rating(value, previous, self.max_rating);
        self.reflect();
        self.change_from(previous)
    }

    /// External attribute write on the host.
    ///
    /// `aria-valuenow` is routed to [`set_value_now`](Self::set_value_now);
    /// unparsable values are ignored and the reflected value restored.
    pub fn write_attribute(&mut self, name: &str, value: &str) -> Option<RatingEvent> {
        if name == aria::VALUE_NOW {
            let parsed = value.trim().parse::<f64>().unwrap_or(f64::NAN);
            return self.set_value_now(parsed);
        }
        self.host.set_attribute(name, value);
        None
    }

    // --- Internals --------------------------------------------------------

    fn clamp_to_range(&self, value: u32) -> u32 {
        value.clamp(self.min_rating(), self.max_rating)
    }

    fn pointer_rating(&self, target: PointerTarget) -> Option<u32> {
        let raw = match target {
            PointerTarget::Star(index) => {
                u32::try_from(index).unwrap_or(u32::MAX).saturating_add(1)
            }
            PointerTarget::LeadingEdge => 0,
            PointerTarget::Outside => return None,
        };
        Some(self.clamp_to_range(raw))
    }

    /// Move to `next`, emitting a preview if the tentative value changed.
    fn preview(&mut self, next: Session) -> Option<RatingEvent> {
        let previous = self.session.tentative();
        self.session = next;
        self.reflect();
        match next.tentative() {
            Some(tentative) if previous != Some(tentative) => {
                self.emit(RatingEvent::PreviewChange {
                    tentative_rating: tentative,
                })
            }
            _ => None,
        }
    }

    fn commit_keyboard(&mut self) -> Option<RatingEvent> {
        let Session::Keyboard { tentative } = self.session else {
            return None;
        };
        let previous = self.user_rating;
        self.user_rating = tentative;
        self.session = Session::Idle;
        self.reflect();
        self.change_from(previous)
    }

    /// Escape: drop an uncaptured preview. A hover that already committed
    /// closes silently.
    fn cancel_preview(&mut self) -> Option<RatingEvent> {
        match self.session {
            Session::Keyboard { .. } | Session::Hover { committed: false, .. } => {
                self.cancel_session()
            }
            Session::Hover { committed: true, .. } => {
                self.session = Session::Idle;
                self.reflect();
                None
            }
            Session::Idle | Session::Drag { .. } => None,
        }
    }

    fn cancel_session(&mut self) -> Option<RatingEvent> {
        self.session = Session::Idle;
        self.reflect();
        self.emit(RatingEvent::Cancel)
    }

    fn change_from(&mut self, previous: u32) -> Option<RatingEvent> {
        if self.user_rating == previous {
            return None;
        }
        self.emit(RatingEvent::Change {
            user_rating: self.user_rating,
            previous,
        })
    }

    fn emit(&mut self, event: RatingEvent) -> Option<RatingEvent> {
        if self.disabled {
            return None;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            event = event.kind().as_str(),
            user_rating = self.user_rating,
            tentative = ?self.session.tentative(),
            session = self.session.kind().as_str(),
            "rating event"
        );

        self.listeners.dispatch(&event);
        Some(event)
    }

    /// Mirror state onto the host's ARIA attributes.
    fn reflect(&mut self) {
        let now = self.session.tentative().unwrap_or(self.user_rating);
        let min = self.min_rating();
        let host = &mut self.host;
        host.set_attribute(aria::ROLE, aria::SLIDER_ROLE);
        host.set_attribute(aria::VALUE_MIN, min.to_string());
        host.set_attribute(aria::VALUE_MAX, self.max_rating.to_string());
        host.set_attribute(aria::VALUE_NOW, now.to_string());
        host.set_attribute(aria::DISABLED, self.disabled.to_string());
        host.set_attribute(aria::READONLY, self.disabled.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn control(options: RatingOptions) -> RatingControl {
        RatingControl::new(None, options).unwrap()
    }

    fn preview(v: u32) -> Option<RatingEvent> {
        Some(RatingEvent::PreviewChange {
            tentative_rating: v,
        })
    }

    fn change(user_rating: u32, previous: u32) -> Option<RatingEvent> {
        Some(RatingEvent::Change {
            user_rating,
            previous,
        })
    }

    // === Construction ===

    #[test]
    fn defaults_apply() {
        let c = control(RatingOptions::default());
        assert_eq!(c.max_rating(), 5);
        assert_eq!(c.user_rating(), 0);
        assert_eq!(c.average_rating(), 0.0);
        assert!(!c.disabled());
        assert!(c.enable_clear());
        assert_eq!(c.tentative_rating(), None);
        assert_eq!(c.tooltips().len(), 6);
    }

    #[test]
    fn rejects_non_element_host() {
        let err = RatingControl::new(Some(HostElement::text()), RatingOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            RatingError::InvalidHost {
                kind: crate::host::NodeKind::Text
            }
        );
    }

    #[test]
    fn from_host_reads_declarative_options() {
        let host = HostElement::element("div")
            .with_attribute(OPTIONS_ATTRIBUTE, r#"{"maxRating": 7, "userRating": 3}"#);
        let c = RatingControl::from_host(host).unwrap();
        assert_eq!(c.max_rating(), 7);
        assert_eq!(c.user_rating(), 3);
    }

    #[test]
    fn from_host_rejects_bad_tooltips() {
        let host = HostElement::element("div")
            .with_attribute(OPTIONS_ATTRIBUTE, r#"{"tooltipStrings": 4}"#);
        assert!(matches!(
            RatingControl::from_host(host),
            Err(RatingError::InvalidTooltips { .. })
        ));
    }

    #[test]
    fn host_reflects_aria_state() {
        let c = control(RatingOptions::new().with_user_rating(2));
        let host = c.host();
        assert_eq!(host.attribute(aria::ROLE), Some("slider"));
        assert_eq!(host.attribute(aria::VALUE_NOW), Some("2"));
        assert_eq!(host.attribute(aria::VALUE_MAX), Some("5"));
        assert_eq!(host.attribute(aria::VALUE_MIN), Some("0"));
        assert_eq!(host.attribute(aria::DISABLED), Some("false"));
    }

    // === Properties ===

    #[test]
    fn lowering_max_clamps_user_and_average() {
        let mut c = control(
            RatingOptions::new()
                .with_user_rating(5)
                .with_average_rating(4.5),
        );
        c.set_max_rating(3.0);
        assert_eq!(c.max_rating(), 3);
        assert_eq!(c.user_rating(), 3);
        assert_eq!(c.average_rating(), 3.0);
        assert_eq!(c.tooltips().max_rating(), 3);
    }

    #[test]
    fn property_setters_coerce_silently() {
        let mut c = control(RatingOptions::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        c.add_listener(EventKinds::all(), move |e| sink.borrow_mut().push(*e));

        c.set_user_rating(3.9);
        assert_eq!(c.user_rating(), 3);
        c.set_user_rating(-2.0);
        assert_eq!(c.user_rating(), 0);
        c.set_user_rating(f64::NAN);
        assert_eq!(c.user_rating(), 0);
        c.set_average_rating(0.7);
        assert_eq!(c.average_rating(), 0.0);
        c.set_max_rating(0.0);
        assert_eq!(c.max_rating(), 5);
        assert!(log.borrow().is_empty());
    }

    // === Focus and keyboard ===

    #[test]
    fn focus_previews_committed_value() {
        let mut c = control(RatingOptions::new().with_user_rating(3));
        assert_eq!(c.focus(), preview(3));
        assert_eq!(c.tentative_rating(), Some(3));
        assert_eq!(c.host().attribute(aria::VALUE_NOW), Some("3"));
        assert_eq!(c.focus(), None);
    }

    #[test]
    fn focus_then_blur_cancels() {
        let mut c = control(RatingOptions::default());
        assert_eq!(c.focus(), preview(0));
        assert_eq!(c.blur(), Some(RatingEvent::Cancel));
        assert_eq!(c.user_rating(), 0);
        assert_eq!(c.tentative_rating(), None);
    }

    #[test]
    fn arrows_then_enter_commit() {
        let mut c = control(RatingOptions::default());
        c.focus();
        assert_eq!(c.key_down(Key::Right), preview(1));
        assert_eq!(c.key_down(Key::Right), preview(2));
        assert_eq!(c.key_down(Key::Up), preview(3));
        assert_eq!(c.key_down(Key::Enter), change(3, 0));
        assert_eq!(c.user_rating(), 3);
        assert_eq!(c.tentative_rating(), None);
        assert!(c.is_focused());
        assert_eq!(c.blur(), None);
    }

    #[test]
    fn arrows_saturate_at_bounds() {
        let mut c = control(RatingOptions::new().with_user_rating(5));
        c.focus();
        assert_eq!(c.key_down(Key::Right), None);
        assert_eq!(c.key_down(Key::Home), preview(0));
        assert_eq!(c.key_down(Key::Left), None);
        assert_eq!(c.key_down(Key::Down), None);
        assert_eq!(c.key_down(Key::End), preview(5));
    }

    #[test]
    fn rtl_flips_horizontal_arrows() {
        let mut c = control(
            RatingOptions::new()
                .with_user_rating(2)
                .with_direction(LayoutDirection::Rtl),
        );
        c.focus();
        assert_eq!(c.key_down(Key::Right), preview(1));
        assert_eq!(c.key_down(Key::Left), preview(2));
        assert_eq!(c.key_down(Key::Up), preview(3));
        assert_eq!(c.key_down(Key::Down), preview(2));
    }

    #[test]
    fn digits_clamp_and_do_not_repeat() {
        let mut c = control(RatingOptions::default());
        c.focus();
        assert_eq!(c.key_down(Key::Digit(4)), preview(4));
        assert_eq!(c.key_down(Key::Numpad(4)), None);
        assert_eq!(c.key_down(Key::Digit(9)), preview(5));
        assert_eq!(c.key_down(Key::Digit(0)), preview(0));
    }

    #[test]
    fn digit_zero_without_clear_is_one() {
        let mut c = control(
            RatingOptions::new()
                .with_user_rating(3)
                .with_enable_clear(false),
        );
        c.focus();
        assert_eq!(c.key_down(Key::Digit(0)), preview(1));
        assert_eq!(c.key_down(Key::Home), None);
        assert_eq!(c.key_down(Key::Left), None);
    }

    #[test]
    fn escape_cancels_and_keeps_value() {
        let mut c = control(RatingOptions::new().with_user_rating(3));
        c.focus();
        assert_eq!(c.key_down(Key::Right), preview(4));
        assert_eq!(c.key_down(Key::Escape), Some(RatingEvent::Cancel));
        assert_eq!(c.user_rating(), 3);
        assert_eq!(c.key_down(Key::Escape), None);
        assert_eq!(c.blur(), None);
    }

    #[test]
    fn enter_on_unchanged_preview_is_silent() {
        let mut c = control(RatingOptions::new().with_user_rating(2));
        c.focus();
        assert_eq!(c.key_down(Key::Enter), None);
        assert_eq!(c.tentative_rating(), None);
        assert_eq!(c.blur(), None);
    }

    #[test]
    fn tab_commits_then_blur_is_silent() {
        let mut c = control(RatingOptions::default());
        c.focus();
        c.key_down(Key::Digit(2));
        assert_eq!(c.key_down(Key::Tab), change(2, 0));
        assert_eq!(c.blur(), None);
    }

    #[test]
    fn keys_after_commit_start_from_committed_value() {
        let mut c = control(RatingOptions::default());
        c.focus();
        c.key_down(Key::Digit(3));
        c.key_down(Key::Enter);
        assert_eq!(c.key_down(Key::Right), preview(4));
    }

    #[test]
    fn keys_ignored_without_focus() {
        let mut c = control(RatingOptions::default());
        assert_eq!(c.key_down(Key::Right), None);
        assert_eq!(c.tentative_rating(), None);
    }

    #[test]
    fn unrecognized_keys_do_nothing() {
        let mut c = control(RatingOptions::default());
        c.focus();
        assert_eq!(c.key_down(Key::Space), None);
        assert_eq!(c.key_code(65), None);
        assert_eq!(c.tentative_rating(), Some(0));
    }

    // === Pointer ===

    #[test]
    fn hover_then_leave_cancels() {
        let mut c = control(RatingOptions::default());
        assert_eq!(c.pointer_enter(None, Some(0)), preview(1));
        assert_eq!(c.pointer_enter(Some(0), Some(0)), None);
        assert_eq!(c.pointer_enter(Some(0), None), Some(RatingEvent::Cancel));
        assert_eq!(c.user_rating(), 0);
    }

    #[test]
    fn hovering_same_star_twice_is_silent() {
        let mut c = control(RatingOptions::default());
        assert_eq!(c.pointer_over(PointerTarget::Star(2)), preview(3));
        assert_eq!(c.pointer_over(PointerTarget::Star(2)), None);
        assert_eq!(c.pointer_over(PointerTarget::Star(3)), preview(4));
    }

    #[test]
    fn drag_and_release_commits() {
        let mut c = control(RatingOptions::default());
        assert_eq!(c.pointer_over(PointerTarget::Star(1)), preview(2));
        assert_eq!(c.pointer_down(PointerTarget::Star(1)), None);
        assert!(c.is_pointer_captured());
        assert_eq!(c.pointer_over(PointerTarget::Star(3)), preview(4));
        assert_eq!(c.pointer_up(PointerTarget::Star(3)), change(4, 0));
        assert!(!c.is_pointer_captured());
        assert_eq!(c.user_rating(), 4);
        // Leaving after a committed release reports nothing further.
        assert_eq!(c.pointer_over(PointerTarget::Outside), None);
    }

    #[test]
    fn release_on_committed_star_defers_cancel_to_leave() {
        let mut c = control(RatingOptions::new().with_user_rating(3));
        c.pointer_over(PointerTarget::Star(2));
        c.pointer_down(PointerTarget::Star(2));
        assert_eq!(c.pointer_up(PointerTarget::Star(2)), None);
        assert_eq!(c.pointer_over(PointerTarget::Outside), Some(RatingEvent::Cancel));
    }

    #[test]
    fn pointer_down_without_hover_previews() {
        let mut c = control(RatingOptions::default());
        assert_eq!(c.pointer_down(PointerTarget::Star(1)), preview(2));
        assert_eq!(c.pointer_down(PointerTarget::Star(4)), None);
    }

    #[test]
    fn drag_scrubs_to_leading_edge() {
        let mut c = control(RatingOptions::new().with_user_rating(3));
        c.pointer_over(PointerTarget::Star(2));
        c.pointer_down(PointerTarget::Star(2));
        assert_eq!(c.pointer_over(PointerTarget::LeadingEdge), preview(0));
        assert_eq!(c.pointer_over(PointerTarget::Outside), None);
        assert_eq!(c.tentative_rating(), Some(0));
        assert_eq!(c.pointer_up(PointerTarget::LeadingEdge), change(0, 3));
    }

    #[test]
    fn leading_edge_without_clear_clamps_to_one() {
        let mut c = control(RatingOptions::new().with_enable_clear(false));
        c.pointer_over(PointerTarget::Star(2));
        c.pointer_down(PointerTarget::Star(2));
        assert_eq!(c.pointer_over(PointerTarget::LeadingEdge), preview(1));
        assert_eq!(c.pointer_over(PointerTarget::LeadingEdge), None);
    }

    #[test]
    fn pointer_cancel_restores_value() {
        let mut c = control(RatingOptions::new().with_user_rating(2));
        c.pointer_over(PointerTarget::Star(0));
        c.pointer_down(PointerTarget::Star(0));
        c.pointer_over(PointerTarget::Star(4));
        assert_eq!(c.pointer_cancel(), Some(RatingEvent::Cancel));
        assert_eq!(c.user_rating(), 2);
        assert_eq!(c.tentative_rating(), None);
        assert_eq!(c.pointer_cancel(), None);
    }

    #[test]
    fn pointer_up_outside_cancels() {
        let mut c = control(RatingOptions::new().with_user_rating(1));
        c.pointer_down(PointerTarget::Star(3));
        assert_eq!(c.pointer_up(PointerTarget::Outside), Some(RatingEvent::Cancel));
        assert_eq!(c.user_rating(), 1);
    }

    #[test]
    fn keyboard_and_pointer_are_exclusive() {
        let mut c = control(RatingOptions::default());
        c.focus();
        c.key_down(Key::Digit(2));
        assert_eq!(c.pointer_over(PointerTarget::Star(4)), None);
        assert_eq!(c.tentative_rating(), Some(2));

        // Pressing converts the keyboard preview into a drag.
        assert_eq!(c.pointer_down(PointerTarget::Star(3)), preview(4));
        assert_eq!(c.session(), Session::Drag { tentative: 4 });
        assert_eq!(c.key_down(Key::Right), None);
    }

    #[test]
    fn focus_during_hover_only_marks_focus() {
        let mut c = control(RatingOptions::default());
        c.pointer_over(PointerTarget::Star(1));
        assert_eq!(c.focus(), None);
        assert!(c.is_focused());
        assert_eq!(c.session().kind(), SessionKind::Hover);
    }

    #[test]
    fn escape_cancels_focused_hover_preview() {
        let mut c = control(RatingOptions::new().with_user_rating(2));
        assert_eq!(c.pointer_over(PointerTarget::Star(3)), preview(4));
        c.focus();
        assert_eq!(c.key_down(Key::Escape), Some(RatingEvent::Cancel));
        assert_eq!(c.tentative_rating(), None);
        assert_eq!(c.user_rating(), 2);
        assert_eq!(c.pointer_over(PointerTarget::Outside), None);
    }

    #[test]
    fn escape_after_committing_click_is_silent() {
        let mut c = control(RatingOptions::default());
        c.pointer_over(PointerTarget::Star(2));
        c.pointer_down(PointerTarget::Star(2));
        assert_eq!(c.pointer_up(PointerTarget::Star(2)), change(3, 0));
        c.focus();
        assert_eq!(c.key_down(Key::Escape), None);
        assert_eq!(c.tentative_rating(), None);
        assert_eq!(c.user_rating(), 3);
    }

    #[test]
    fn large_max_rating_is_kept() {
        let mut c = control(RatingOptions::new().with_max_rating(2000));
        assert_eq!(c.max_rating(), 2000);
        c.set_max_rating(1500.0);
        assert_eq!(c.max_rating(), 1500);
        assert_eq!(c.tooltips().for_rating(1500).as_deref(), Some("1500"));
        c.focus();
        assert_eq!(c.key_down(Key::End), preview(1500));
    }

    // === Direct writes ===

    #[test]
    fn attribute_write_changes_value_once() {
        let mut c = control(RatingOptions::new().with_user_rating(4));
        assert_eq!(c.write_attribute(aria::VALUE_NOW, "2"), change(2, 4));
        assert_eq!(c.write_attribute(aria::VALUE_NOW, "2"), None);
        assert_eq!(c.write_attribute(aria::VALUE_NOW, "bogus"), None);
        assert_eq!(c.host().attribute(aria::VALUE_NOW), Some("2"));
        assert_eq!(c.write_attribute("title", "stars"), None);
        assert_eq!(c.host().attribute("title"), Some("stars"));
    }

    #[test]
    fn direct_write_clamps() {
        let mut c = control(RatingOptions::new().with_user_rating(1));
        assert_eq!(c.set_value_now(42.0), change(5, 1));
        assert_eq!(c.set_value_now(-3.0), change(0, 5));
    }

    #[test]
    fn direct_write_during_keyboard_session() {
        let mut c = control(RatingOptions::default());
        c.focus();
        c.key_down(Key::Digit(3));
        assert_eq!(c.set_value_now(1.0), change(1, 0));
        assert_eq!(c.tentative_rating(), Some(3));
    }

    // === Disabled ===

    #[test]
    fn disabled_suppresses_everything() {
        let mut c = control(RatingOptions::new().with_user_rating(2).with_disabled(true));
        let count = Rc::new(RefCell::new(0u32));
        let sink = Rc::clone(&count);
        c.add_listener(EventKinds::all(), move |_| *sink.borrow_mut() += 1);

        assert_eq!(c.focus(), None);
        assert_eq!(c.key_down(Key::Right), None);
        assert_eq!(c.pointer_over(PointerTarget::Star(4)), None);
        assert_eq!(c.pointer_down(PointerTarget::Star(4)), None);
        assert_eq!(c.pointer_up(PointerTarget::Star(4)), None);
        assert_eq!(c.blur(), None);
        assert_eq!(c.user_rating(), 2);

        // Direct writes still land, silently.
        assert_eq!(c.set_value_now(4.0), None);
        assert_eq!(c.user_rating(), 4);
        assert_eq!(*count.borrow(), 0);
        assert_eq!(c.host().attribute(aria::DISABLED), Some("true"));
    }

    #[test]
    fn disabling_mid_session_ends_it_silently() {
        let mut c = control(RatingOptions::default());
        c.pointer_over(PointerTarget::Star(2));
        c.pointer_down(PointerTarget::Star(2));
        c.set_disabled(true);
        assert_eq!(c.session(), Session::Idle);
        c.set_disabled(false);
        assert_eq!(c.pointer_up(PointerTarget::Star(2)), None);
    }

    #[test]
    fn turning_clear_off_clamps_open_preview() {
        let mut c = control(RatingOptions::default());
        c.focus();
        assert_eq!(c.tentative_rating(), Some(0));
        c.set_enable_clear(false);
        assert_eq!(c.tentative_rating(), Some(1));
    }

    // === Listeners ===

    #[test]
    fn listeners_receive_in_order_and_can_be_removed() {
        let mut c = control(RatingOptions::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = Rc::clone(&log);
        let b = Rc::clone(&log);
        let id = c.add_listener(EventKind::PreviewChange, move |_| a.borrow_mut().push("a"));
        c.add_listener(EventKinds::all(), move |_| b.borrow_mut().push("b"));

        c.focus();
        assert!(c.remove_listener(id));
        c.blur();
        assert_eq!(*log.borrow(), vec!["a", "b", "b"]);
        assert_eq!(c.listener_count(), 1);
    }

    #[test]
    fn snapshot_reports_session() {
        let mut c = control(RatingOptions::default());
        c.pointer_down(PointerTarget::Star(0));
        let snap = c.snapshot();
        assert!(snap.pointer_captured);
        assert_eq!(snap.session, SessionKind::Drag);
        assert_eq!(snap.tentative_rating, Some(1));
    }
}
