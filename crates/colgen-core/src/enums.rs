//! Closed enumerations with stable string wire tags.
//!
//! Tags are the load/dump representation; an unknown tag is a validation
//! failure, never coerced to a default.

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

/// Column-kind discriminator for the higher polymorphic layer.
///
/// Only time-valued columns exist in this crate; the tag distinguishes
/// them from other kinds owned by sibling descriptor models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    #[serde(rename = "COL_TIME")]
    ColTime,
}

impl ColumnKind {
    /// Wire tag for this kind.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::ColTime => "COL_TIME",
        }
    }

    /// Resolve a wire tag, `None` for unknown tags.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "COL_TIME" => Some(Self::ColTime),
            _ => None,
        }
    }
}

/// Whether a column appears in the rendered output.
///
/// Enforcement happens in an external rendering stage; the descriptor
/// only carries the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnVisibility {
    Visible,
    Hidden,
}

impl ColumnVisibility {
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Visible => "VISIBLE",
            Self::Hidden => "HIDDEN",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "VISIBLE" => Some(Self::Visible),
            "HIDDEN" => Some(Self::Hidden),
            _ => None,
        }
    }
}

/// Granularity generated timestamps are rounded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimePrecision {
    Second,
    Minute,
    Hour,
    Day,
}

impl TimePrecision {
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Second => "SECOND",
            Self::Minute => "MINUTE",
            Self::Hour => "HOUR",
            Self::Day => "DAY",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "SECOND" => Some(Self::Second),
            "MINUTE" => Some(Self::Minute),
            "HOUR" => Some(Self::Hour),
            "DAY" => Some(Self::Day),
            _ => None,
        }
    }

    /// Truncate a timestamp down to this granularity.
    pub fn truncate(&self, dt: NaiveDateTime) -> NaiveDateTime {
        match self {
            Self::Second => dt.with_nanosecond(0).unwrap_or(dt),
            Self::Minute => dt
                .date()
                .and_hms_opt(dt.hour(), dt.minute(), 0)
                .unwrap_or(dt),
            Self::Hour => dt.date().and_hms_opt(dt.hour(), 0, 0).unwrap_or(dt),
            Self::Day => dt.date().and_hms_opt(0, 0, 0).unwrap_or(dt),
        }
    }
}
