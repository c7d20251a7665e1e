//! Value engines for the colgen synthetic data generator.
//!
//! This crate turns a validated [`ColumnDescriptorTime`] into a stream
//! of generated values. Dispatch is string-keyed: the registry resolves
//! the descriptor's canonical type identifier (for example
//! `"COL_TIME.INCREMENT"`) to the matching engine.
//!
//! # Architecture
//!
//! ```text
//! ColumnDescriptorTime
//!        │ get_descriptor_type()
//!        ▼
//! ┌──────────────────┐
//! │  EngineRegistry  │── unknown key ──▶ UnregisteredBehaviourError
//! └────────┬─────────┘
//!          ▼
//!   ValueEngine::generate(descriptor, seed, position)
//!          ▼
//!   GeneratedValue::{Timestamp, Label, Na}
//! ```
//!
//! Generation is deterministic: the same descriptor, seed and position
//! always produce the same value. Positions are independent: each one
//! derives its own RNG state from the seed, so workers can generate
//! disjoint slices of a column's stream concurrently from a shared
//! read-only descriptor.
//!
//! # Example
//!
//! ```rust
//! use colgen_core::{ColumnDescriptorTime, ColumnVisibility, TimeBehaviour, TimePrecision};
//! use colgen_engine::EngineRegistry;
//! use chrono::NaiveDate;
//!
//! let descriptor = ColumnDescriptorTime::new(
//!     "1",
//!     42,
//!     "created_at",
//!     ColumnVisibility::Visible,
//!     0.0,
//!     TimePrecision::Minute,
//!     TimeBehaviour::Increment {
//!         start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
//!         step: 60,
//!     },
//! ).unwrap();
//!
//! let registry = EngineRegistry::with_builtin_engines();
//! let value = registry.generate(&descriptor, 3).unwrap();
//! assert_eq!(
//!     value.as_timestamp().map(|dt| dt.to_string()),
//!     Some("2020-01-01 00:03:00".to_string()),
//! );
//! ```

pub mod engines;
pub mod registry;
pub mod value;

// Re-exports for convenience
pub use engines::template::TemplateEngine;
pub use engines::{EngineError, ValueEngine};
pub use registry::{DispatchError, EngineRegistry, UnregisteredBehaviourError};
pub use value::GeneratedValue;
