//! Validation errors for descriptor loading and construction.

/// A single violated field: where in the document, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path to the offending field, e.g. `behaviour.weights_table[0].value`.
    pub path: String,

    /// Human-readable reason for the rejection.
    pub reason: String,
}

/// Error raised when loaded or constructed descriptor data violates the
/// data model.
///
/// Carries every offending field, not just the first one encountered.
/// The error is a deterministic function of the input: the same document
/// produces the same violations in the same order on every load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("schema validation failed: {}", render(.violations))]
pub struct SchemaValidationError {
    /// All violated fields, in document order.
    pub violations: Vec<Violation>,
}

impl SchemaValidationError {
    /// Build an error from a single violation.
    pub fn single(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation {
                path: path.into(),
                reason: reason.into(),
            }],
        }
    }

    /// Check whether any violation names the given field path.
    pub fn names(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| {
            if v.path.is_empty() {
                v.reason.clone()
            } else {
                format!("{}: {}", v.path, v.reason)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collector threaded through validation so every violated field is
/// recorded before the load is rejected.
#[derive(Debug, Default)]
pub struct Violations {
    entries: Vec<Violation>,
}

impl Violations {
    /// Record one violation.
    pub fn push(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.entries.push(Violation {
            path: path.into(),
            reason: reason.into(),
        });
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded violations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Convert the collected violations into an error.
    pub fn into_error(self) -> SchemaValidationError {
        SchemaValidationError {
            violations: self.entries,
        }
    }

    /// Succeed if nothing was recorded, otherwise fail with everything
    /// that was.
    pub fn into_result(self) -> Result<(), SchemaValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collector_is_ok() {
        let violations = Violations::default();
        assert!(violations.is_empty());
        assert!(violations.into_result().is_ok());
    }

    #[test]
    fn test_collector_aggregates_in_order() {
        let mut violations = Violations::default();
        violations.push("na_prob", "must be within [0.0, 1.0]");
        violations.push("behaviour.step", "expected an integer");

        let err = violations.into_result().unwrap_err();
        assert_eq!(err.violations.len(), 2);
        assert_eq!(err.violations[0].path, "na_prob");
        assert_eq!(err.violations[1].path, "behaviour.step");
        assert!(err.names("na_prob"));
        assert!(!err.names("seed"));
    }

    #[test]
    fn test_display_lists_every_field() {
        let mut violations = Violations::default();
        violations.push("na_prob", "must be within [0.0, 1.0]");
        violations.push("behaviour.min", "must not be later than max");

        let message = violations.into_error().to_string();
        assert!(message.contains("na_prob"));
        assert!(message.contains("behaviour.min"));
    }
}
