//! Validated percentage scalars and the strict text rule used for in-progress edits.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// At most two integer digits, optional fraction, no sign or exponent, at least one digit.
static PERCENTAGE_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]{1,2}(?:\.[0-9]+)?|\.[0-9]+)$").expect("Invalid percentage regex")
});

/// A value in `[0, 100]`, never NaN.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Percentage(f64);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0.0);
    pub const HUNDRED: Percentage = Percentage(100.0);

    /// Returns `None` for NaN or anything outside `[0, 100]`; values are never clamped.
    pub fn new(value: f64) -> Option<Self> {
        if is_percentage(value) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Parses text typed into a field. Both the lexical rule and the range check must pass.
    pub fn parse(raw: &str) -> Option<Self> {
        if !is_percentage_text(raw) {
            return None;
        }
        raw.parse::<f64>().ok().and_then(Self::new)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Percentage> for f64 {
    fn from(p: Percentage) -> f64 {
        p.0
    }
}

impl TryFrom<f64> for Percentage {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("{} is not a percentage in [0, 100]", value))
    }
}

pub fn is_percentage(value: f64) -> bool {
    !value.is_nan() && (0.0..=100.0).contains(&value)
}

pub fn is_percentage_text(raw: &str) -> bool {
    PERCENTAGE_TEXT.is_match(raw)
}

/// Flattens an absent percentage into NaN for arithmetic slots.
pub fn or_nan(value: Option<Percentage>) -> f64 {
    value.map(Percentage::get).unwrap_or(f64::NAN)
}
