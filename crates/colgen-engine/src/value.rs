//! Generated value representation.

use chrono::NaiveDateTime;

/// One generated value of a column stream.
///
/// Time-valued behaviours produce `Timestamp`; template-label
/// behaviours produce `Label`. `Na` is the suppressed-value outcome:
/// whether a position is suppressed is governed by the descriptor's
/// `na_prob` and decided by the external rendering stage, not by the
/// engines in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedValue {
    /// A naive local timestamp.
    Timestamp(NaiveDateTime),

    /// A label resolved by the external template engine.
    Label(String),

    /// Not available.
    Na,
}

impl GeneratedValue {
    /// Check if this value is NA.
    pub fn is_na(&self) -> bool {
        matches!(self, Self::Na)
    }

    /// Try to get this value as a timestamp.
    pub fn as_timestamp(&self) -> Option<&NaiveDateTime> {
        match self {
            Self::Timestamp(dt) => Some(dt),
            _ => None,
        }
    }

    /// Try to get this value as a label.
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Label(s) => Some(s),
            _ => None,
        }
    }
}
