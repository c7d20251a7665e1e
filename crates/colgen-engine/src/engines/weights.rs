//! Weighted discrete sampling engine.
//!
//! Draws over the cumulative weights of the table, in entry order.
//! Duplicate keys are independent rows, so they stack weight on the
//! same timestamp.

use super::{position_rng, EngineError, ValueEngine};
use crate::value::GeneratedValue;
use colgen_core::{ColumnDescriptorTime, TimeBehaviour};
use rand::Rng;

pub struct WeightsTableEngine;

impl ValueEngine for WeightsTableEngine {
    fn generate(
        &self,
        descriptor: &ColumnDescriptorTime,
        seed: u64,
        position: u64,
    ) -> Result<GeneratedValue, EngineError> {
        let TimeBehaviour::WeightsTable { weights_table } = descriptor.behaviour() else {
            return Err(EngineError::mismatch("COL_TIME.WEIGHTS_TABLE", descriptor));
        };

        // The descriptor guarantees a non-empty table with non-negative
        // weights. An all-zero table degenerates to the first entry.
        let total: f64 = weights_table.iter().map(|e| e.value).sum();
        let key = if total <= 0.0 {
            weights_table.first().map(|e| e.key)
        } else {
            let drawn = position_rng(seed, position).gen_range(0.0..total);
            let mut cumulative = 0.0;
            let mut selected = None;
            for entry in weights_table {
                cumulative += entry.value;
                if drawn < cumulative {
                    selected = Some(entry.key);
                    break;
                }
            }
            // Float accumulation can land the draw past the last bound.
            selected.or_else(|| weights_table.last().map(|e| e.key))
        };

        match key {
            Some(dt) => Ok(GeneratedValue::Timestamp(
                descriptor.precision().truncate(dt),
            )),
            None => Err(EngineError::mismatch("COL_TIME.WEIGHTS_TABLE", descriptor)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::test_support::{descriptor, ts};
    use colgen_core::WeightEntry;

    fn table(entries: &[(&str, f64)]) -> TimeBehaviour {
        TimeBehaviour::WeightsTable {
            weights_table: entries
                .iter()
                .map(|(key, value)| WeightEntry {
                    key: ts(key),
                    value: *value,
                })
                .collect(),
        }
    }

    #[test]
    fn test_samples_only_table_keys() {
        let d = descriptor(table(&[
            ("2020-01-01T01:10:33", 0.5),
            ("2020-01-01T01:20:33", 0.5),
        ]));
        let engine = WeightsTableEngine;

        for position in 0..100 {
            let value = engine.generate(&d, 42, position).unwrap();
            let dt = *value.as_timestamp().unwrap();
            assert!(dt == ts("2020-01-01T01:10:33") || dt == ts("2020-01-01T01:20:33"));
        }
    }

    #[test]
    fn test_both_keys_are_reachable() {
        let d = descriptor(table(&[
            ("2020-01-01T01:10:33", 0.5),
            ("2020-01-01T01:20:33", 0.5),
        ]));
        let engine = WeightsTableEngine;

        let values: Vec<_> = (0..100)
            .map(|p| engine.generate(&d, 42, p).unwrap())
            .collect();
        assert!(values.contains(&GeneratedValue::Timestamp(ts("2020-01-01T01:10:33"))));
        assert!(values.contains(&GeneratedValue::Timestamp(ts("2020-01-01T01:20:33"))));
    }

    #[test]
    fn test_zero_weight_entry_never_drawn() {
        let d = descriptor(table(&[
            ("2020-01-01T01:10:33", 1.0),
            ("2020-01-01T01:20:33", 0.0),
        ]));
        let engine = WeightsTableEngine;

        for position in 0..100 {
            assert_eq!(
                engine.generate(&d, 42, position).unwrap(),
                GeneratedValue::Timestamp(ts("2020-01-01T01:10:33"))
            );
        }
    }

    #[test]
    fn test_single_entry_is_constant() {
        let d = descriptor(table(&[("2020-01-01T01:10:33", 0.25)]));
        let engine = WeightsTableEngine;

        for position in 0..10 {
            assert_eq!(
                engine.generate(&d, 42, position).unwrap(),
                GeneratedValue::Timestamp(ts("2020-01-01T01:10:33"))
            );
        }
    }

    #[test]
    fn test_duplicate_keys_stack_weight() {
        let d = descriptor(table(&[
            ("2020-01-01T01:10:33", 0.5),
            ("2020-01-01T01:10:33", 0.5),
        ]));
        let engine = WeightsTableEngine;

        for position in 0..50 {
            assert_eq!(
                engine.generate(&d, 42, position).unwrap(),
                GeneratedValue::Timestamp(ts("2020-01-01T01:10:33"))
            );
        }
    }

    #[test]
    fn test_deterministic_per_position() {
        let d = descriptor(table(&[
            ("2020-01-01T01:10:33", 0.3),
            ("2020-01-01T01:20:33", 0.7),
        ]));
        let engine = WeightsTableEngine;

        for position in 0..20 {
            assert_eq!(
                engine.generate(&d, 42, position).unwrap(),
                engine.generate(&d, 42, position).unwrap()
            );
        }
    }
}
