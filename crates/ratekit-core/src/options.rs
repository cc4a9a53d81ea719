#![forbid(unsafe_code)]

//! Construction options and numeric coercion.
//!
//! All coercion happens synchronously where a value is assigned:
//!
//! | Option          | NaN          | Too small      | Too large        | Fractional |
//! |-----------------|--------------|----------------|------------------|------------|
//! | `maxRating`     | ignored      | `< 1` ignored  | kept             | floored    |
//! | `userRating`    | ignored      | `< 0` → 0      | → `maxRating`    | floored    |
//! | `averageRating` | ignored      | `< 1` → 0      | → `maxRating`    | kept       |
//!
//! "Ignored" keeps the previous value (the default during construction).

use serde_json::Value;

use crate::error::{RatingError, Result};
use crate::key::LayoutDirection;

pub const DEFAULT_MAX_RATING: u32 = 5;

/// Options accepted when building a [`RatingControl`](crate::RatingControl).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatingOptions {
    pub max_rating: u32,
    pub user_rating: u32,
    pub average_rating: f64,
    pub disabled: bool,
    pub enable_clear: bool,
    /// `None` selects numeric tooltips plus the clear tooltip.
    pub tooltip_strings: Option<Vec<String>>,
    pub direction: LayoutDirection,
}

impl Default for RatingOptions {
    fn default() -> Self {
        Self {
            max_rating: DEFAULT_MAX_RATING,
            user_rating: 0,
            average_rating: 0.0,
            disabled: false,
            enable_clear: true,
            tooltip_strings: None,
            direction: LayoutDirection::Ltr,
        }
    }
}

impl RatingOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_rating(mut self, max_rating: u32) -> Self {
        self.max_rating = max_rating;
        self
    }

    #[must_use]
    pub fn with_user_rating(mut self, user_rating: u32) -> Self {
        self.user_rating = user_rating;
        self
    }

    #[must_use]
    pub fn with_average_rating(mut self, average_rating: f64) -> Self {
        self.average_rating = average_rating;
        self
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn with_enable_clear(mut self, enable_clear: bool) -> Self {
        self.enable_clear = enable_clear;
        self
    }

    #[must_use]
    pub fn with_tooltip_strings(mut self, tooltips: Vec<String>) -> Self {
        self.tooltip_strings = Some(tooltips);
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Apply the coercion rules to every numeric field.
    ///
    /// `max_rating` is resolved first so the other fields clamp against it.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.max_rating = coerce_max_rating(f64::from(self.max_rating), DEFAULT_MAX_RATING);
        self.user_rating = coerce_user_rating(f64::from(self.user_rating), 0, self.max_rating);
        self.average_rating = coerce_average_rating(self.average_rating, 0.0, self.max_rating);
        self
    }

    /// Parse a declarative option object such as
    /// `{"maxRating": 7, "userRating": 2, "tooltipStrings": ["a", "b"]}`.
    pub fn parse(source: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(source)
            .map_err(|err| RatingError::InvalidOptions(err.to_string()))?;
        Self::from_json(&value)
    }

    /// Build options from a JSON object with camelCase keys.
    ///
    /// Unknown keys are ignored. Numbers may be given as JSON numbers or
    /// numeric strings; anything else counts as NaN.
    pub fn from_json(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(RatingError::InvalidOptions(format!(
                "expected an object, got {}",
                json_type_name(value)
            )));
        };

        let mut options = Self::default();
        if let Some(v) = map.get("maxRating").and_then(json_number) {
            options.max_rating = coerce_max_rating(v, options.max_rating);
        }
        if let Some(v) = map.get("userRating").and_then(json_number) {
            options.user_rating = coerce_user_rating(v, options.user_rating, options.max_rating);
        }
        if let Some(v) = map.get("averageRating").and_then(json_number) {
            options.average_rating =
                coerce_average_rating(v, options.average_rating, options.max_rating);
        }
        if let Some(v) = map.get("disabled") {
            options.disabled = json_truthy(v);
        }
        if let Some(v) = map.get("enableClear") {
            options.enable_clear = json_truthy(v);
        }
        if let Some(v) = map.get("direction").and_then(Value::as_str) {
            options.direction = if v.eq_ignore_ascii_case("rtl") {
                LayoutDirection::Rtl
            } else {
                LayoutDirection::Ltr
            };
        }
        options.tooltip_strings = match map.get("tooltipStrings") {
            None | Some(Value::Null) => None,
            Some(Value::Array(items)) => Some(items.iter().map(json_display).collect()),
            Some(other) => {
                return Err(RatingError::InvalidTooltips {
                    found: json_type_name(other).to_string(),
                });
            }
        };
        Ok(options)
    }
}

/// Coerce a requested `maxRating`.
#[must_use]
pub fn coerce_max_rating(value: f64, current: u32) -> u32 {
    if value.is_nan() || value < 1.0 {
        return current;
    }
    // `as` saturates at u32::MAX.
    value.floor() as u32
}

/// Coerce a requested `userRating` against `max_rating`.
#[must_use]
pub fn coerce_user_rating(value: f64, current: u32, max_rating: u32) -> u32 {
    if value.is_nan() {
        return current;
    }
    if value <= 0.0 {
        return 0;
    }
    (value.floor() as u32).min(max_rating)
}

/// Coerce a requested `averageRating` against `max_rating`.
#[must_use]
pub fn coerce_average_rating(value: f64, current: f64, max_rating: u32) -> f64 {
    if value.is_nan() {
        return current;
    }
    if value < 1.0 {
        return 0.0;
    }
    value.min(f64::from(max_rating))
}

/// Numeric view of a JSON value; `null` means "not given".
fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => Some(s.trim().parse().unwrap_or(f64::NAN)),
        _ => Some(f64::NAN),
    }
}

fn json_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty() && s != "false",
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
