use super::{escape_html, BaseField};
use crate::contract::{Field, FieldSpec, FieldType, RenderCallback};
use serde_json::Value;

/// Field whose body is produced by a caller supplied render function
pub struct CallbackField {
    base: BaseField,
    callback: Option<RenderCallback>,
}

impl CallbackField {
    pub fn from_spec(spec: &FieldSpec) -> Option<Self> {
        BaseField::from_spec(spec).map(|base| Self {
            base,
            callback: spec.callback.clone(),
        })
    }
}

impl Field for CallbackField {
    fn id(&self) -> &str {
        &self.base.id
    }

    fn order(&self) -> i64 {
        self.base.order
    }

    fn data(&self) -> Value {
        self.base.data_or_default()
    }

    fn label(&self) -> String {
        escape_html(&self.base.label)
    }

    fn render_body(&self) -> String {
        self.callback.as_ref().map(|render| render()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CallbackType;

impl FieldType for CallbackType {
    fn create(&self, spec: &FieldSpec) -> Option<Box<dyn Field>> {
        CallbackField::from_spec(spec).map(|f| Box::new(f) as Box<dyn Field>)
    }

    fn validate(&self, input: &Value, _spec: &FieldSpec) -> Option<Value> {
        Some(input.clone())
    }
}
