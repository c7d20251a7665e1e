//! Column descriptor model for the colgen synthetic data generator.
//!
//! A *descriptor* is a validated, immutable specification of how to
//! generate one column's values. It combines identity and visibility
//! metadata with exactly one generation *behaviour* (an arithmetic
//! increment, a uniform-random range, a weighted discrete table, or an
//! externally templated value) and derives a stable, hierarchical type
//! identifier used for downstream engine dispatch.
//!
//! # Architecture
//!
//! ```text
//! descriptor document (YAML/JSON)
//!          │
//!          ▼
//! ┌──────────────────────┐
//! │  loader              │  resolves behaviour_type, validates every
//! │  (load.rs)           │  field, aggregates all violations
//! └──────────┬───────────┘
//!            ▼
//!   ColumnDescriptorTime ──── get_descriptor_type() ──▶ "COL_TIME.<BEHAVIOUR>"
//!            │
//!            ▼
//!   colgen-engine registry (selects a ValueEngine by that key)
//! ```
//!
//! # Example
//!
//! ```rust
//! use colgen_core::ColumnDescriptorTime;
//!
//! let descriptor = ColumnDescriptorTime::from_yaml(r#"
//! descriptor_type: COL_TIME
//! id: "1"
//! seed: 1
//! name: column1
//! visibility_type: VISIBLE
//! na_prob: 0.5
//! precision: MINUTE
//! behaviour:
//!   behaviour_type: INCREMENT
//!   start: "2020-01-01T01:10:33"
//!   step: 60
//! "#).unwrap();
//!
//! assert_eq!(descriptor.get_descriptor_type(), "COL_TIME.INCREMENT");
//! ```
//!
//! Validation either succeeds or fails at construction time with a
//! [`SchemaValidationError`] naming every offending field; a partially
//! valid descriptor is never exposed.

pub mod behaviour;
pub mod descriptor;
pub mod enums;
pub mod error;
pub mod load;
pub mod timestamp;

// Re-exports for convenience
pub use behaviour::{TimeBehaviour, WeightEntry};
pub use descriptor::ColumnDescriptorTime;
pub use enums::{ColumnKind, ColumnVisibility, TimePrecision};
pub use error::{SchemaValidationError, Violation};
