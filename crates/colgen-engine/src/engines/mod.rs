//! Individual value engines, one per generation behaviour.

pub mod increment;
pub mod template;
pub mod uniform;
pub mod weights;

use crate::value::GeneratedValue;
use colgen_core::ColumnDescriptorTime;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Error type for engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Engine invoked with a descriptor carrying a different behaviour.
    /// The registry keys engines by descriptor type, so this only
    /// happens when an engine is registered under the wrong key.
    #[error("behaviour mismatch: engine for {expected} invoked with {actual}")]
    BehaviourMismatch {
        expected: &'static str,
        actual: String,
    },

    /// The external template engine could not resolve a template.
    #[error("template '{template}' failed to resolve")]
    TemplateResolution { template: String },

    /// The value at this position falls outside the representable
    /// timestamp range.
    #[error("position {position} overflows the generated timestamp range")]
    PositionOutOfRange { position: u64 },
}

impl EngineError {
    pub(crate) fn mismatch(expected: &'static str, descriptor: &ColumnDescriptorTime) -> Self {
        Self::BehaviourMismatch {
            expected,
            actual: descriptor.get_descriptor_type(),
        }
    }
}

/// A value engine produces one generated value for a descriptor at a
/// stream position.
///
/// Implementations must be deterministic: the same descriptor, seed and
/// position always yield the same value.
pub trait ValueEngine: Send + Sync {
    fn generate(
        &self,
        descriptor: &ColumnDescriptorTime,
        seed: u64,
        position: u64,
    ) -> Result<GeneratedValue, EngineError>;
}

/// Derive an RNG for one stream position.
///
/// Each position gets its own state mixed from the base seed, so any
/// position can be generated without advancing through the ones before
/// it.
pub(crate) fn position_rng(seed: u64, position: u64) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(position.wrapping_mul(0x9E3779B97F4A7C15)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use colgen_core::{ColumnDescriptorTime, ColumnVisibility, TimeBehaviour, TimePrecision};

    pub fn descriptor(behaviour: TimeBehaviour) -> ColumnDescriptorTime {
        descriptor_with_precision(behaviour, TimePrecision::Second)
    }

    pub fn descriptor_with_precision(
        behaviour: TimeBehaviour,
        precision: TimePrecision,
    ) -> ColumnDescriptorTime {
        ColumnDescriptorTime::new(
            "1",
            1,
            "column1",
            ColumnVisibility::Visible,
            0.0,
            precision,
            behaviour,
        )
        .unwrap()
    }

    pub fn ts(s: &str) -> chrono::NaiveDateTime {
        chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_position_rng_is_deterministic() {
        let a: u64 = position_rng(42, 7).gen();
        let b: u64 = position_rng(42, 7).gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_position_rng_varies_by_position() {
        let a: u64 = position_rng(42, 7).gen();
        let b: u64 = position_rng(42, 8).gen();
        assert_ne!(a, b);
    }
}
