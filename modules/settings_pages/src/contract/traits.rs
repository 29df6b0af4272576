//! Extension seams for field types and live option sets

use super::model::FieldSpec;
use serde_json::Value;

/// A constructed settings field, alive for one page build
pub trait Field: Send + Sync {
    /// Form element id
    fn id(&self) -> &str;

    /// Display order inside the section
    fn order(&self) -> i64;

    /// Current value, falling back to the field default
    fn data(&self) -> Value;

    /// Escaped label text
    fn label(&self) -> String;

    /// Markup fragment for the form control
    fn render_body(&self) -> String;
}

/// A field type registered under a type name
///
/// `unset_value` and `validate` only need the spec, never a constructed field,
/// so the pipeline can query them for any declared field.
pub trait FieldType: Send + Sync {
    /// Build a field from its spec, `None` when the spec is unusable
    fn create(&self, spec: &FieldSpec) -> Option<Box<dyn Field>>;

    /// Value substituted when the field is absent from a submission
    fn unset_value(&self) -> Option<Value> {
        None
    }

    /// Validate a raw submitted value, `None` rejects it
    fn validate(&self, input: &Value, spec: &FieldSpec) -> Option<Value>;
}

/// Live set of ids a dropdown may store
///
/// Queried on every validation so ids removed since the form was rendered
/// are rejected.
pub trait OptionSource: Send + Sync {
    fn allowed_ids(&self) -> Vec<Value>;
}

impl<F> OptionSource for F
where
    F: Fn() -> Vec<Value> + Send + Sync,
{
    fn allowed_ids(&self) -> Vec<Value> {
        self()
    }
}

/// Fixed id set, mostly for tests and configs without a live source
#[derive(Debug, Clone, Default)]
pub struct StaticOptionSource {
    ids: Vec<Value>,
}

impl StaticOptionSource {
    pub fn new(ids: impl IntoIterator<Item = Value>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }
}

impl OptionSource for StaticOptionSource {
    fn allowed_ids(&self) -> Vec<Value> {
        self.ids.clone()
    }
}
