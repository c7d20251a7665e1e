//! The descriptor loader and behaviour resolver.
//!
//! Descriptor documents are nested mappings (YAML or JSON). The loader
//! walks the tree once: it checks every field against the data model,
//! resolves the `behaviour_type` discriminator to the matching variant
//! shape, rejects fields leaked across variant shapes, and aggregates
//! every violation into a single [`SchemaValidationError`]. A partially
//! valid descriptor is never exposed.
//!
//! The dump side is the exact inverse: same shape, same field names,
//! timestamps rendered in the identical wire format used on load.

use crate::behaviour::{TimeBehaviour, WeightEntry};
use crate::descriptor::{check_na_prob, ColumnDescriptorTime};
use crate::enums::{ColumnKind, ColumnVisibility, TimePrecision};
use crate::error::{SchemaValidationError, Violations};
use crate::timestamp;
use chrono::NaiveDateTime;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

impl ColumnDescriptorTime {
    /// Load a descriptor from a YAML document.
    pub fn from_yaml(document: &str) -> Result<Self, SchemaValidationError> {
        let value: Value = serde_yaml::from_str(document)
            .map_err(|e| SchemaValidationError::single("", format!("invalid YAML document: {e}")))?;
        Self::from_value(&value)
    }

    /// Load a descriptor from a JSON document.
    pub fn from_json(document: &str) -> Result<Self, SchemaValidationError> {
        let json: serde_json::Value = serde_json::from_str(document)
            .map_err(|e| SchemaValidationError::single("", format!("invalid JSON document: {e}")))?;
        let value = serde_yaml::to_value(&json)
            .map_err(|e| SchemaValidationError::single("", format!("invalid JSON document: {e}")))?;
        Self::from_value(&value)
    }

    /// Load a descriptor from an already-parsed document tree.
    pub fn from_value(value: &Value) -> Result<Self, SchemaValidationError> {
        let Some(map) = value.as_mapping() else {
            return Err(SchemaValidationError::single("", "expected a mapping"));
        };

        let mut violations = Violations::default();
        let mut fields = Fields::new(map, "");

        if let Some(tag) = fields.require_str("descriptor_type", &mut violations) {
            if ColumnKind::from_tag(&tag).is_none() {
                violations.push(
                    "descriptor_type",
                    format!("unknown column kind '{tag}', expected COL_TIME"),
                );
            }
        }

        let id = fields.require_str("id", &mut violations);
        let seed = fields.require_i64("seed", &mut violations);
        let name = fields.require_str("name", &mut violations);

        let visibility = match fields.require_str("visibility_type", &mut violations) {
            Some(tag) => match ColumnVisibility::from_tag(&tag) {
                Some(v) => Some(v),
                None => {
                    violations.push(
                        "visibility_type",
                        format!("unknown visibility '{tag}', expected VISIBLE or HIDDEN"),
                    );
                    None
                }
            },
            None => None,
        };

        let na_prob = match fields.require_f64("na_prob", &mut violations) {
            Some(p) => {
                check_na_prob(p, "na_prob", &mut violations);
                Some(p)
            }
            None => None,
        };

        let precision = match fields.require_str("precision", &mut violations) {
            Some(tag) => match TimePrecision::from_tag(&tag) {
                Some(p) => Some(p),
                None => {
                    violations.push(
                        "precision",
                        format!("unknown precision '{tag}', expected SECOND, MINUTE, HOUR or DAY"),
                    );
                    None
                }
            },
            None => None,
        };

        let behaviour = match fields.take("behaviour") {
            Some(v) => TimeBehaviour::from_value(v, "behaviour", &mut violations),
            None => {
                violations.push("behaviour", "missing required field");
                None
            }
        };

        fields.reject_unknown(&mut violations);

        match (id, seed, name, visibility, na_prob, precision, behaviour) {
            (
                Some(id),
                Some(seed),
                Some(name),
                Some(visibility_type),
                Some(na_prob),
                Some(precision),
                Some(behaviour),
            ) if violations.is_empty() => Ok(Self::from_parts(
                id,
                seed,
                name,
                visibility_type,
                na_prob,
                precision,
                behaviour,
            )),
            _ => Err(violations.into_error()),
        }
    }

    /// Dump to a document tree, the inverse of [`Self::from_value`].
    pub fn to_value(&self) -> Result<Value, serde_yaml::Error> {
        serde_yaml::to_value(self)
    }

    /// Dump to a YAML document, the inverse of [`Self::from_yaml`].
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Dump to a JSON document, the inverse of [`Self::from_json`].
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl TimeBehaviour {
    /// Resolve a behaviour payload: discriminate on `behaviour_type`,
    /// validate the payload against the selected shape, reject unknown
    /// fields.
    ///
    /// Invariant violations are recorded in the collector even when a
    /// structurally complete variant is returned; callers must not
    /// expose the result unless the collector is empty.
    pub(crate) fn from_value(
        value: &Value,
        path: &str,
        violations: &mut Violations,
    ) -> Option<Self> {
        let Some(map) = value.as_mapping() else {
            violations.push(path, "expected a mapping");
            return None;
        };

        let mut fields = Fields::new(map, path);
        let tag = fields.require_str("behaviour_type", violations)?;

        let behaviour = match tag.as_str() {
            "INCREMENT" => {
                let start = fields.require_timestamp("start", violations);
                let step = fields.require_i64("step", violations);
                fields.reject_unknown(violations);
                Some(Self::Increment {
                    start: start?,
                    step: step?,
                })
            }

            "UNIFORM_DISTRIBUTION" => {
                let min = fields.require_timestamp("min", violations);
                let max = fields.require_timestamp("max", violations);
                fields.reject_unknown(violations);
                Some(Self::UniformDistribution {
                    min: min?,
                    max: max?,
                })
            }

            "WEIGHTS_TABLE" => {
                let entries = match fields.require("weights_table", violations) {
                    Some(Value::Sequence(seq)) => {
                        let base = fields.child("weights_table");
                        let mut entries = Vec::with_capacity(seq.len());
                        let mut complete = true;
                        for (i, item) in seq.iter().enumerate() {
                            match weight_entry_from_value(item, &format!("{base}[{i}]"), violations)
                            {
                                Some(entry) => entries.push(entry),
                                None => complete = false,
                            }
                        }
                        complete.then_some(entries)
                    }
                    Some(_) => {
                        violations.push(fields.child("weights_table"), "expected a sequence");
                        None
                    }
                    None => None,
                };
                fields.reject_unknown(violations);
                Some(Self::WeightsTable {
                    weights_table: entries?,
                })
            }

            "TEMPLATE_LABEL" => {
                let template = fields.require_str("template", violations);
                let filters = fields.require_template_filters(violations);
                fields.reject_unknown(violations);
                Some(Self::TemplateLabel {
                    template: template?,
                    template_filters: filters?,
                })
            }

            "TEMPLATE_TIMESTAMP" => {
                let template = fields.require_str("template", violations);
                let start = fields.require_timestamp("start", violations);
                let end = fields.require_timestamp("end", violations);
                let filters = fields.require_template_filters(violations);
                fields.reject_unknown(violations);
                Some(Self::TemplateTimestamp {
                    template: template?,
                    start: start?,
                    end: end?,
                    template_filters: filters?,
                })
            }

            other => {
                violations.push(
                    fields.child("behaviour_type"),
                    format!(
                        "unknown behaviour type '{other}', expected one of INCREMENT, \
                         UNIFORM_DISTRIBUTION, WEIGHTS_TABLE, TEMPLATE_LABEL, TEMPLATE_TIMESTAMP"
                    ),
                );
                None
            }
        };

        let behaviour = behaviour?;
        behaviour.check(path, violations);
        Some(behaviour)
    }
}

fn weight_entry_from_value(
    value: &Value,
    path: &str,
    violations: &mut Violations,
) -> Option<WeightEntry> {
    let Some(map) = value.as_mapping() else {
        violations.push(path, "expected a mapping");
        return None;
    };

    let mut fields = Fields::new(map, path);
    let key = fields.require_timestamp("key", violations);
    let weight = fields.require_f64("value", violations);
    fields.reject_unknown(violations);

    Some(WeightEntry {
        key: key?,
        value: weight?,
    })
}

/// Field extraction over one mapping level: tracks which keys the
/// selected shape consumed so leftovers can be rejected, and builds
/// dotted field paths for violations.
struct Fields<'a> {
    map: &'a Mapping,
    path: &'a str,
    seen: Vec<&'static str>,
}

impl<'a> Fields<'a> {
    fn new(map: &'a Mapping, path: &'a str) -> Self {
        Self {
            map,
            path,
            seen: Vec::new(),
        }
    }

    fn child(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    /// Mark a key as consumed and fetch it, without requiring presence.
    fn take(&mut self, key: &'static str) -> Option<&'a Value> {
        self.seen.push(key);
        self.map.get(key)
    }

    fn require(&mut self, key: &'static str, violations: &mut Violations) -> Option<&'a Value> {
        match self.take(key) {
            Some(value) => Some(value),
            None => {
                violations.push(self.child(key), "missing required field");
                None
            }
        }
    }

    fn require_str(&mut self, key: &'static str, violations: &mut Violations) -> Option<String> {
        let value = self.require(key, violations)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                violations.push(self.child(key), "expected a string");
                None
            }
        }
    }

    fn require_i64(&mut self, key: &'static str, violations: &mut Violations) -> Option<i64> {
        let value = self.require(key, violations)?;
        match value.as_i64() {
            Some(n) => Some(n),
            None => {
                violations.push(self.child(key), "expected an integer");
                None
            }
        }
    }

    fn require_f64(&mut self, key: &'static str, violations: &mut Violations) -> Option<f64> {
        let value = self.require(key, violations)?;
        match value.as_f64() {
            Some(n) => Some(n),
            None => {
                violations.push(self.child(key), "expected a number");
                None
            }
        }
    }

    fn require_timestamp(
        &mut self,
        key: &'static str,
        violations: &mut Violations,
    ) -> Option<NaiveDateTime> {
        let value = self.require(key, violations)?;
        let parsed = value.as_str().and_then(|s| timestamp::parse(s).ok());
        if parsed.is_none() {
            violations.push(
                self.child(key),
                "expected a timestamp formatted as YYYY-MM-DDTHH:MM:SS",
            );
        }
        parsed
    }

    fn require_template_filters(
        &mut self,
        violations: &mut Violations,
    ) -> Option<BTreeMap<String, Vec<i64>>> {
        let path = self.child("template_filters");
        let value = self.require("template_filters", violations)?;
        let Some(map) = value.as_mapping() else {
            violations.push(path, "expected a mapping");
            return None;
        };

        let mut filters = BTreeMap::new();
        let mut complete = true;
        for (key, item) in map {
            let Some(name) = key.as_str() else {
                violations.push(path.clone(), "filter names must be strings");
                complete = false;
                continue;
            };
            let entry_path = format!("{path}.{name}");
            match item.as_sequence() {
                Some(seq) => {
                    let mut ids = Vec::with_capacity(seq.len());
                    let mut ok = true;
                    for (i, v) in seq.iter().enumerate() {
                        match v.as_i64() {
                            Some(n) => ids.push(n),
                            None => {
                                violations.push(format!("{entry_path}[{i}]"), "expected an integer");
                                ok = false;
                            }
                        }
                    }
                    if ok {
                        filters.insert(name.to_string(), ids);
                    } else {
                        complete = false;
                    }
                }
                None => {
                    violations.push(entry_path, "expected a sequence of integers");
                    complete = false;
                }
            }
        }
        complete.then_some(filters)
    }

    /// Reject keys the selected shape did not consume. This is what
    /// keeps variant payloads from leaking fields across shapes.
    fn reject_unknown(&self, violations: &mut Violations) {
        for key in self.map.keys() {
            match key.as_str() {
                Some(k) if self.seen.iter().any(|s| *s == k) => {}
                Some(k) => violations.push(self.child(k), "unknown field"),
                None => violations.push(self.path, "mapping keys must be strings"),
            }
        }
    }
}
