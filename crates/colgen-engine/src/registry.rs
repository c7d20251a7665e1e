//! String-keyed engine dispatch.
//!
//! The registry maps the stable identifier returned by
//! `get_descriptor_type()` to a value engine. The key set is the fixed
//! one the descriptor model derives; an unknown key surfaces as an
//! [`UnregisteredBehaviourError`], distinct from schema validation
//! failures.

use crate::engines::increment::IncrementEngine;
use crate::engines::template::{TemplateEngine, TemplateLabelEngine, TemplateTimestampEngine};
use crate::engines::uniform::UniformDistributionEngine;
use crate::engines::weights::WeightsTableEngine;
use crate::engines::{EngineError, ValueEngine};
use crate::value::GeneratedValue;
use colgen_core::ColumnDescriptorTime;
use std::collections::HashMap;
use std::sync::Arc;

/// No engine is registered under a descriptor's type identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no value engine registered for descriptor type '{descriptor_type}'")]
pub struct UnregisteredBehaviourError {
    pub descriptor_type: String,
}

/// Error type for registry-driven generation.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Unregistered(#[from] UnregisteredBehaviourError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Lookup from descriptor type identifier to value engine.
#[derive(Default)]
pub struct EngineRegistry {
    engines: HashMap<String, Box<dyn ValueEngine>>,
}

impl EngineRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the three self-contained time engines
    /// (`COL_TIME.INCREMENT`, `COL_TIME.UNIFORM_DISTRIBUTION`,
    /// `COL_TIME.WEIGHTS_TABLE`). Template engines need an external
    /// catalog; see [`Self::register_template_engines`].
    pub fn with_builtin_engines() -> Self {
        let mut registry = Self::new();
        registry.register("COL_TIME.INCREMENT", Box::new(IncrementEngine));
        registry.register(
            "COL_TIME.UNIFORM_DISTRIBUTION",
            Box::new(UniformDistributionEngine),
        );
        registry.register("COL_TIME.WEIGHTS_TABLE", Box::new(WeightsTableEngine));
        registry
    }

    /// Register the two template-backed engines
    /// (`COL_TIME.TEMPLATE_LABEL.LABEL`,
    /// `COL_TIME.TEMPLATE_TIMESTAMP.TIMESTAMP`) sharing one catalog.
    pub fn register_template_engines(&mut self, templates: Arc<dyn TemplateEngine>) {
        self.register(
            "COL_TIME.TEMPLATE_LABEL.LABEL",
            Box::new(TemplateLabelEngine::new(Arc::clone(&templates))),
        );
        self.register(
            "COL_TIME.TEMPLATE_TIMESTAMP.TIMESTAMP",
            Box::new(TemplateTimestampEngine::new(templates)),
        );
    }

    /// Register an engine under a descriptor type identifier,
    /// replacing any previous entry for that key.
    pub fn register(&mut self, descriptor_type: impl Into<String>, engine: Box<dyn ValueEngine>) {
        let key = descriptor_type.into();
        tracing::debug!(descriptor_type = %key, "registering value engine");
        self.engines.insert(key, engine);
    }

    /// Resolve the engine for a descriptor.
    pub fn resolve(
        &self,
        descriptor: &ColumnDescriptorTime,
    ) -> Result<&dyn ValueEngine, UnregisteredBehaviourError> {
        let key = descriptor.get_descriptor_type();
        match self.engines.get(&key) {
            Some(engine) => Ok(engine.as_ref()),
            None => {
                tracing::debug!(descriptor_type = %key, "no engine for descriptor type");
                Err(UnregisteredBehaviourError {
                    descriptor_type: key,
                })
            }
        }
    }

    /// Generate the value at one stream position, using the
    /// descriptor's own seed.
    pub fn generate(
        &self,
        descriptor: &ColumnDescriptorTime,
        position: u64,
    ) -> Result<GeneratedValue, DispatchError> {
        self.generate_seeded(descriptor, descriptor.seed() as u64, position)
    }

    /// Generate the value at one stream position with an explicit seed.
    pub fn generate_seeded(
        &self,
        descriptor: &ColumnDescriptorTime,
        seed: u64,
        position: u64,
    ) -> Result<GeneratedValue, DispatchError> {
        let engine = self.resolve(descriptor)?;
        tracing::debug!(
            column = descriptor.id(),
            position,
            "generating column value"
        );
        Ok(engine.generate(descriptor, seed, position)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::test_support::{descriptor, ts};
    use chrono::NaiveDateTime;
    use colgen_core::TimeBehaviour;
    use std::collections::BTreeMap;

    struct StubCatalog;

    impl TemplateEngine for StubCatalog {
        fn resolve_label(
            &self,
            _template: &str,
            _filters: &BTreeMap<String, Vec<i64>>,
            _seed: u64,
            position: u64,
        ) -> Option<String> {
            Some(format!("label_{position}"))
        }

        fn resolve_timestamp(
            &self,
            _template: &str,
            start: NaiveDateTime,
            _end: NaiveDateTime,
            _filters: &BTreeMap<String, Vec<i64>>,
            _seed: u64,
            _position: u64,
        ) -> Option<NaiveDateTime> {
            Some(start)
        }
    }

    fn full_registry() -> EngineRegistry {
        let mut registry = EngineRegistry::with_builtin_engines();
        registry.register_template_engines(Arc::new(StubCatalog));
        registry
    }

    fn all_behaviours() -> Vec<TimeBehaviour> {
        let filters = BTreeMap::from([("filter1".to_string(), vec![1, 2, 3])]);
        vec![
            TimeBehaviour::Increment {
                start: ts("2020-01-01T01:10:33"),
                step: 60,
            },
            TimeBehaviour::UniformDistribution {
                min: ts("2020-01-01T01:10:33"),
                max: ts("2020-01-01T01:20:33"),
            },
            TimeBehaviour::WeightsTable {
                weights_table: vec![colgen_core::WeightEntry {
                    key: ts("2020-01-01T01:10:33"),
                    value: 0.5,
                }],
            },
            TimeBehaviour::TemplateLabel {
                template: "template1".to_string(),
                template_filters: filters.clone(),
            },
            TimeBehaviour::TemplateTimestamp {
                template: "template1".to_string(),
                start: ts("2020-01-01T01:10:33"),
                end: ts("2020-01-01T01:20:33"),
                template_filters: filters,
            },
        ]
    }

    #[test]
    fn test_every_builtin_key_resolves() {
        let registry = full_registry();

        for behaviour in all_behaviours() {
            let d = descriptor(behaviour);
            assert!(
                registry.resolve(&d).is_ok(),
                "no engine for {}",
                d.get_descriptor_type()
            );
            assert!(registry.generate(&d, 0).is_ok());
        }
    }

    #[test]
    fn test_unregistered_key_is_distinct_error() {
        let registry = EngineRegistry::with_builtin_engines();

        // No template catalog registered.
        let d = descriptor(TimeBehaviour::TemplateLabel {
            template: "template1".to_string(),
            template_filters: BTreeMap::new(),
        });

        let Err(err) = registry.resolve(&d) else {
            panic!("expected an unregistered behaviour error");
        };
        assert_eq!(err.descriptor_type, "COL_TIME.TEMPLATE_LABEL.LABEL");

        assert!(matches!(
            registry.generate(&d, 0),
            Err(DispatchError::Unregistered(_))
        ));
    }

    #[test]
    fn test_generate_uses_descriptor_seed() {
        let registry = full_registry();
        let d = descriptor(TimeBehaviour::UniformDistribution {
            min: ts("2020-01-01T01:10:33"),
            max: ts("2020-01-01T01:20:33"),
        });

        assert_eq!(
            registry.generate(&d, 7).unwrap(),
            registry
                .generate_seeded(&d, d.seed() as u64, 7)
                .unwrap()
        );
    }

    #[test]
    fn test_generate_from_loaded_descriptor() {
        let descriptor = ColumnDescriptorTime::from_yaml(
            r#"
descriptor_type: COL_TIME
id: "1"
seed: 1
name: column1
visibility_type: VISIBLE
na_prob: 0.0
precision: SECOND
behaviour:
  behaviour_type: INCREMENT
  start: "2020-01-01T01:10:33"
  step: 60
"#,
        )
        .unwrap();

        let registry = full_registry();
        assert_eq!(
            registry.generate(&descriptor, 1).unwrap(),
            GeneratedValue::Timestamp(ts("2020-01-01T01:11:33"))
        );
    }

    #[test]
    fn test_shared_descriptor_across_workers() {
        // Workers generating disjoint position slices from the same
        // shared descriptor see one consistent stream.
        let registry = Arc::new(full_registry());
        let d = Arc::new(descriptor(TimeBehaviour::UniformDistribution {
            min: ts("2020-01-01T01:10:33"),
            max: ts("2020-01-01T01:20:33"),
        }));

        let sequential: Vec<_> = (0..40)
            .map(|p| registry.generate(&d, p).unwrap())
            .collect();

        let handles: Vec<_> = (0..4)
            .map(|w| {
                let registry = Arc::clone(&registry);
                let d = Arc::clone(&d);
                std::thread::spawn(move || {
                    (w * 10..(w + 1) * 10)
                        .map(|p| registry.generate(&d, p).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let parallel: Vec<_> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(parallel, sequential);
    }
}
