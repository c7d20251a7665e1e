//! Arithmetic increment engine: `value(n) = start + n * step` seconds.

use super::{EngineError, ValueEngine};
use crate::value::GeneratedValue;
use chrono::Duration;
use colgen_core::{ColumnDescriptorTime, TimeBehaviour};

pub struct IncrementEngine;

impl ValueEngine for IncrementEngine {
    fn generate(
        &self,
        descriptor: &ColumnDescriptorTime,
        _seed: u64,
        position: u64,
    ) -> Result<GeneratedValue, EngineError> {
        let TimeBehaviour::Increment { start, step } = descriptor.behaviour() else {
            return Err(EngineError::mismatch("COL_TIME.INCREMENT", descriptor));
        };

        let dt = i64::try_from(position)
            .ok()
            .and_then(|n| step.checked_mul(n))
            .and_then(Duration::try_seconds)
            .and_then(|d| start.checked_add_signed(d))
            .ok_or(EngineError::PositionOutOfRange { position })?;

        Ok(GeneratedValue::Timestamp(
            descriptor.precision().truncate(dt),
        ))
    }
}
