//! Submission validation pipeline
//!
//! Turns a raw form submission into the full mapping to persist for one
//! options store. Every declared field starts from its stored value, so fields
//! that were not part of this form keep what they had.

use super::registry::FieldTypeRegistry;
use super::store::{OptionsMap, OptionsStore};
use crate::contract::FieldSpec;
use serde_json::Value;

/// Result of validating one submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedSubmission {
    /// Values that went through validation, keyed by field id
    pub filtered_input: OptionsMap,
    /// Mapping to persist, one entry per declared field
    pub output: OptionsMap,
}

/// Validate `input` against the declared `specs`
///
/// For each spec with a type and id:
/// 1. the stored value is taken as the baseline output
/// 2. a submitted, non-null value is staged
/// 3. otherwise the type's unset value is staged; types without one keep the
///    baseline and are not validated
/// 4. staged values are validated through the registry; a rejected value is
///    stored as null
pub fn validate_submission(
    specs: &[FieldSpec],
    store: &OptionsStore,
    registry: &FieldTypeRegistry,
    input: &OptionsMap,
) -> ValidatedSubmission {
    let mut result = ValidatedSubmission::default();

    for spec in specs {
        if spec.field_type.is_empty() || spec.id.is_empty() {
            tracing::debug!(field_id = %spec.id, "Skipping field spec without type or id");
            continue;
        }
        let id = spec.id.as_str();

        result
            .output
            .insert(id.to_string(), store.get(id).unwrap_or(Value::Null));

        let staged = match input.get(id) {
            Some(value) if !value.is_null() => value.clone(),
            _ => match registry.unset_value(&spec.field_type) {
                Some(unset) => unset,
                None => continue,
            },
        };

        let validated = registry.validate(spec, &staged);
        if validated.is_none() {
            tracing::debug!(
                option = %store.name(),
                field_id = %id,
                field_type = %spec.field_type,
                "Submitted value rejected"
            );
        }

        result.filtered_input.insert(id.to_string(), staged);
        result
            .output
            .insert(id.to_string(), validated.unwrap_or(Value::Null));
    }

    result
}
