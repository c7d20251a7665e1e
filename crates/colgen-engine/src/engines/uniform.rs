//! Uniform-random range engine: one draw in `[min, max]` per position.

use super::{position_rng, EngineError, ValueEngine};
use crate::value::GeneratedValue;
use chrono::DateTime;
use colgen_core::{ColumnDescriptorTime, TimeBehaviour};
use rand::Rng;

pub struct UniformDistributionEngine;

impl ValueEngine for UniformDistributionEngine {
    fn generate(
        &self,
        descriptor: &ColumnDescriptorTime,
        seed: u64,
        position: u64,
    ) -> Result<GeneratedValue, EngineError> {
        let TimeBehaviour::UniformDistribution { min, max } = descriptor.behaviour() else {
            return Err(EngineError::mismatch(
                "COL_TIME.UNIFORM_DISTRIBUTION",
                descriptor,
            ));
        };

        let lo = min.and_utc().timestamp();
        let hi = max.and_utc().timestamp();

        let drawn = if lo >= hi {
            // min == max degenerates to a constant; the descriptor
            // guarantees min <= max.
            lo
        } else {
            position_rng(seed, position).gen_range(lo..=hi)
        };

        let dt = DateTime::from_timestamp(drawn, 0)
            .map(|dt| dt.naive_utc())
            .unwrap_or(*min);

        Ok(GeneratedValue::Timestamp(
            descriptor.precision().truncate(dt),
        ))
    }
}
