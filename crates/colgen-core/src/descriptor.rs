//! The time-column descriptor: identity and visibility metadata plus
//! exactly one generation behaviour.

use crate::behaviour::TimeBehaviour;
use crate::enums::{ColumnKind, ColumnVisibility, TimePrecision};
use crate::error::{SchemaValidationError, Violations};
use serde::Serialize;

/// A validated, immutable specification of how to generate one
/// time-valued column's values.
///
/// Fields are private and there is no mutating API: once constructed
/// (programmatically via [`ColumnDescriptorTime::new`] or from a
/// document via the loader), a descriptor never changes. Generation
/// workers hold shared read-only references to the same instance; no
/// locking is needed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptorTime {
    descriptor_type: ColumnKind,
    id: String,
    seed: i64,
    name: String,
    visibility_type: ColumnVisibility,
    na_prob: f64,
    precision: TimePrecision,
    behaviour: TimeBehaviour,
}

impl ColumnDescriptorTime {
    /// Programmatic construction path.
    ///
    /// The same field invariants as the loader apply, checked eagerly:
    /// `na_prob` must lie in `[0.0, 1.0]` and the behaviour's own
    /// invariants must hold. All violations are aggregated into one
    /// error; a partially valid descriptor is never returned.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        seed: i64,
        name: impl Into<String>,
        visibility_type: ColumnVisibility,
        na_prob: f64,
        precision: TimePrecision,
        behaviour: TimeBehaviour,
    ) -> Result<Self, SchemaValidationError> {
        let mut violations = Violations::default();
        check_na_prob(na_prob, "na_prob", &mut violations);
        behaviour.check("behaviour", &mut violations);
        violations.into_result()?;

        Ok(Self {
            descriptor_type: ColumnKind::ColTime,
            id: id.into(),
            seed,
            name: name.into(),
            visibility_type,
            na_prob,
            precision,
            behaviour,
        })
    }

    /// Assembly from loader-validated parts. The loader has already
    /// checked every invariant.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: String,
        seed: i64,
        name: String,
        visibility_type: ColumnVisibility,
        na_prob: f64,
        precision: TimePrecision,
        behaviour: TimeBehaviour,
    ) -> Self {
        Self {
            descriptor_type: ColumnKind::ColTime,
            id,
            seed,
            name,
            visibility_type,
            na_prob,
            precision,
            behaviour,
        }
    }

    /// Canonical descriptor type identifier,
    /// `"COL_TIME.<BEHAVIOUR>[.<SUBKIND>]"`.
    ///
    /// This is the stable key the engine registry dispatches on. Pure
    /// and total: a function of the column kind and the behaviour
    /// variant alone.
    pub fn get_descriptor_type(&self) -> String {
        format!(
            "{}.{}",
            self.descriptor_type.as_tag(),
            self.behaviour.type_id()
        )
    }

    /// Column-kind discriminator, always [`ColumnKind::ColTime`] here.
    pub fn descriptor_type(&self) -> ColumnKind {
        self.descriptor_type
    }

    /// Identifier, unique within a column set (uniqueness owned by the
    /// set, not by this descriptor).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Deterministic seed driving this column's value stream.
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Human-readable column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn visibility_type(&self) -> ColumnVisibility {
        self.visibility_type
    }

    /// Probability in `[0.0, 1.0]` that a generated value is suppressed
    /// to NA. Applied by an external rendering stage.
    pub fn na_prob(&self) -> f64 {
        self.na_prob
    }

    /// Granularity the value engine rounds generated timestamps to.
    pub fn precision(&self) -> TimePrecision {
        self.precision
    }

    pub fn behaviour(&self) -> &TimeBehaviour {
        &self.behaviour
    }
}

pub(crate) fn check_na_prob(na_prob: f64, path: &str, violations: &mut Violations) {
    if !na_prob.is_finite() || !(0.0..=1.0).contains(&na_prob) {
        violations.push(path, "must be within [0.0, 1.0]");
    }
}
