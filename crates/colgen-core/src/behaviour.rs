//! Generation behaviours for time-valued columns.
//!
//! A behaviour is one of five mutually exclusive generation strategies,
//! modeled as a closed sum type discriminated by the `behaviour_type`
//! wire field. Each behaviour maps to a canonical type identifier used
//! for string-keyed engine dispatch; template behaviours carry a second
//! segment naming the semantic kind of the produced value.

use crate::error::Violations;
use crate::timestamp;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

/// One `(timestamp, weight)` row of a weighted sampling table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightEntry {
    #[serde(serialize_with = "timestamp::serialize")]
    pub key: NaiveDateTime,
    pub value: f64,
}

/// The generation strategy attached to a time-column descriptor.
///
/// Exactly one variant is present per descriptor. The discriminator and
/// the structural shape always agree; the loader rejects payloads that
/// mix fields across variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "behaviour_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeBehaviour {
    /// Arithmetic sequence: `value(n) = start + n * step` seconds.
    Increment {
        #[serde(serialize_with = "timestamp::serialize")]
        start: NaiveDateTime,
        step: i64,
    },

    /// Uniform random draw in `[min, max]`. Boundary equality is
    /// permitted and degenerates to a constant.
    UniformDistribution {
        #[serde(serialize_with = "timestamp::serialize")]
        min: NaiveDateTime,
        #[serde(serialize_with = "timestamp::serialize")]
        max: NaiveDateTime,
    },

    /// Discrete weighted sampling over the keys. Entry order is
    /// preserved; downstream cumulative-weight sampling depends on it.
    WeightsTable { weights_table: Vec<WeightEntry> },

    /// Value resolved by an external template engine, keyed by template
    /// name and filters. Produces a label, not a time value.
    TemplateLabel {
        template: String,
        template_filters: BTreeMap<String, Vec<i64>>,
    },

    /// Templated resolution constrained to a `[start, end]` time window.
    TemplateTimestamp {
        template: String,
        #[serde(serialize_with = "timestamp::serialize")]
        start: NaiveDateTime,
        #[serde(serialize_with = "timestamp::serialize")]
        end: NaiveDateTime,
        template_filters: BTreeMap<String, Vec<i64>>,
    },
}

impl TimeBehaviour {
    /// The raw wire discriminator for this variant.
    pub fn behaviour_type(&self) -> &'static str {
        match self {
            Self::Increment { .. } => "INCREMENT",
            Self::UniformDistribution { .. } => "UNIFORM_DISTRIBUTION",
            Self::WeightsTable { .. } => "WEIGHTS_TABLE",
            Self::TemplateLabel { .. } => "TEMPLATE_LABEL",
            Self::TemplateTimestamp { .. } => "TEMPLATE_TIMESTAMP",
        }
    }

    /// Canonical type identifier for engine dispatch.
    ///
    /// Template variants carry a second segment naming the kind of the
    /// produced value; the suffix must be preserved exactly, downstream
    /// dispatch tables key on the full string. Pure and total: depends
    /// on the variant alone, never on field values.
    pub fn type_id(&self) -> &'static str {
        match self {
            Self::Increment { .. } => "INCREMENT",
            Self::UniformDistribution { .. } => "UNIFORM_DISTRIBUTION",
            Self::WeightsTable { .. } => "WEIGHTS_TABLE",
            Self::TemplateLabel { .. } => "TEMPLATE_LABEL.LABEL",
            Self::TemplateTimestamp { .. } => "TEMPLATE_TIMESTAMP.TIMESTAMP",
        }
    }

    /// Check variant-specific invariants, recording every violation
    /// under `path`.
    ///
    /// Duplicate `weights_table` keys are legal: entries are independent
    /// ordered rows of the cumulative table, so duplicates stack weight
    /// on the same timestamp.
    pub(crate) fn check(&self, path: &str, violations: &mut Violations) {
        match self {
            Self::Increment { .. } => {}

            Self::UniformDistribution { min, max } => {
                if min > max {
                    violations.push(format!("{path}.min"), "must not be later than max");
                }
            }

            Self::WeightsTable { weights_table } => {
                if weights_table.is_empty() {
                    violations.push(
                        format!("{path}.weights_table"),
                        "must contain at least one entry",
                    );
                }
                for (i, entry) in weights_table.iter().enumerate() {
                    if !entry.value.is_finite() || entry.value < 0.0 {
                        violations.push(
                            format!("{path}.weights_table[{i}].value"),
                            "must be a non-negative number",
                        );
                    }
                }
            }

            Self::TemplateLabel { .. } => {}

            Self::TemplateTimestamp { start, end, .. } => {
                if start > end {
                    violations.push(format!("{path}.start"), "must not be later than end");
                }
            }
        }
    }
}
