//! Template-backed engines.
//!
//! Templates and their filters are opaque to this crate; resolution is
//! delegated to an external [`TemplateEngine`] collaborator keyed by
//! template name. The engines here only enforce the descriptor's value
//! kind (label vs timestamp) and, for timestamps, the time window and
//! precision.

use super::{EngineError, ValueEngine};
use crate::value::GeneratedValue;
use chrono::NaiveDateTime;
use colgen_core::{ColumnDescriptorTime, TimeBehaviour};
use std::collections::BTreeMap;
use std::sync::Arc;

/// External templating contract.
///
/// `None` means the template (or a referenced filter) is unknown to the
/// catalog; the engines surface that as an [`EngineError`].
/// Implementations must be deterministic in `(seed, position)`.
pub trait TemplateEngine: Send + Sync {
    /// Resolve one label value.
    fn resolve_label(
        &self,
        template: &str,
        filters: &BTreeMap<String, Vec<i64>>,
        seed: u64,
        position: u64,
    ) -> Option<String>;

    /// Resolve one timestamp value within `[start, end]`.
    fn resolve_timestamp(
        &self,
        template: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        filters: &BTreeMap<String, Vec<i64>>,
        seed: u64,
        position: u64,
    ) -> Option<NaiveDateTime>;
}

pub struct TemplateLabelEngine {
    templates: Arc<dyn TemplateEngine>,
}

impl TemplateLabelEngine {
    pub fn new(templates: Arc<dyn TemplateEngine>) -> Self {
        Self { templates }
    }
}

impl ValueEngine for TemplateLabelEngine {
    fn generate(
        &self,
        descriptor: &ColumnDescriptorTime,
        seed: u64,
        position: u64,
    ) -> Result<GeneratedValue, EngineError> {
        let TimeBehaviour::TemplateLabel {
            template,
            template_filters,
        } = descriptor.behaviour()
        else {
            return Err(EngineError::mismatch(
                "COL_TIME.TEMPLATE_LABEL.LABEL",
                descriptor,
            ));
        };

        self.templates
            .resolve_label(template, template_filters, seed, position)
            .map(GeneratedValue::Label)
            .ok_or_else(|| EngineError::TemplateResolution {
                template: template.clone(),
            })
    }
}

pub struct TemplateTimestampEngine {
    templates: Arc<dyn TemplateEngine>,
}

impl TemplateTimestampEngine {
    pub fn new(templates: Arc<dyn TemplateEngine>) -> Self {
        Self { templates }
    }
}

impl ValueEngine for TemplateTimestampEngine {
    fn generate(
        &self,
        descriptor: &ColumnDescriptorTime,
        seed: u64,
        position: u64,
    ) -> Result<GeneratedValue, EngineError> {
        let TimeBehaviour::TemplateTimestamp {
            template,
            start,
            end,
            template_filters,
        } = descriptor.behaviour()
        else {
            return Err(EngineError::mismatch(
                "COL_TIME.TEMPLATE_TIMESTAMP.TIMESTAMP",
                descriptor,
            ));
        };

        let resolved = self
            .templates
            .resolve_timestamp(template, *start, *end, template_filters, seed, position)
            .ok_or_else(|| EngineError::TemplateResolution {
                template: template.clone(),
            })?;

        // The window is a hard constraint on the output even if the
        // collaborator ignores it.
        let clamped = resolved.clamp(*start, *end);
        Ok(GeneratedValue::Timestamp(
            descriptor.precision().truncate(clamped),
        ))
    }
}
