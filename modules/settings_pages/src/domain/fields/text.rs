use super::{display_value, escape_attr, escape_html, BaseField};
use crate::contract::{Field, FieldSpec, FieldType};
use crate::domain::validation::{sanitize_html, value_to_string};
use serde_json::Value;

/// Single line text input, stored as restricted HTML
#[derive(Debug, Clone)]
pub struct TextField {
    base: BaseField,
}

impl TextField {
    pub fn from_spec(spec: &FieldSpec) -> Option<Self> {
        BaseField::from_spec(spec).map(|base| Self { base })
    }
}

impl Field for TextField {
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
        format!(
            "<input id=\"{}\" type=\"text\" name=\"{}\" value=\"{}\" />",
            escape_attr(&self.base.id),
            self.base.input_name(),
            escape_html(&display_value(&self.data())),
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextType;

impl FieldType for TextType {
    fn create(&self, spec: &FieldSpec) -> Option<Box<dyn Field>> {
        TextField::from_spec(spec).map(|f| Box::new(f) as Box<dyn Field>)
    }

    fn validate(&self, input: &Value, _spec: &FieldSpec) -> Option<Value> {
        Some(Value::String(sanitize_html(&value_to_string(input))))
    }
}
