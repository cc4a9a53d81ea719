#![forbid(unsafe_code)]

//! Per-star tooltip table.
//!
//! The table always has `max_rating + 1` entries. Entry `i` (for
//! `i < max_rating`) describes rating `i + 1`; the final entry is the tooltip
//! shown for clearing the rating. Only custom strings are stored; default
//! entries are produced on lookup, so the table stays small for any
//! `max_rating`.

use std::borrow::Cow;

/// Tooltip used for the clear position when no custom string is given.
pub const DEFAULT_CLEAR_TOOLTIP: &str = "Clear your rating";

/// Resolved tooltip strings for one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltips {
    max_rating: u32,
    custom: Vec<String>,
}

impl Tooltips {
    /// Build the table for `max_rating` stars.
    ///
    /// Custom strings override defaults index by index; entries beyond
    /// `max_rating` are ignored.
    #[must_use]
    pub fn new(max_rating: u32, custom: Option<&[String]>) -> Self {
        let keep = (max_rating as usize).saturating_add(1);
        let custom = custom
            .unwrap_or_default()
            .iter()
            .take(keep)
            .cloned()
            .collect();
        Self { max_rating, custom }
    }

    /// Entry at `index`, `0..=max_rating`.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<Cow<'_, str>> {
        let count = self.max_rating as usize;
        if index > count {
            return None;
        }
        Some(match self.custom.get(index) {
            Some(text) => Cow::Borrowed(text.as_str()),
            None if index == count => Cow::Borrowed(DEFAULT_CLEAR_TOOLTIP),
            None => Cow::Owned((index + 1).to_string()),
        })
    }

    /// Tooltip for a rating value: 0 maps to the clear tooltip.
    #[must_use]
    pub fn for_rating(&self, rating: u32) -> Option<Cow<'_, str>> {
        match rating {
            0 => Some(Cow::Borrowed(self.clear())),
            r if r <= self.max_rating => self.entry(r as usize - 1),
            _ => None,
        }
    }

    /// The clear-rating tooltip.
    #[must_use]
    pub fn clear(&self) -> &str {
        self.custom
            .get(self.max_rating as usize)
            .map_or(DEFAULT_CLEAR_TOOLTIP, String::as_str)
    }

    /// Number of stars this table was built for.
    #[must_use]
    pub fn max_rating(&self) -> u32 {
        self.max_rating
    }

    /// Number of entries, stars plus the clear entry.
    #[must_use]
    pub fn len(&self) -> usize {
        (self.max_rating as usize).saturating_add(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}
