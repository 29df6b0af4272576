use super::{display_value, escape_attr, escape_html, BaseField};
use crate::contract::{Field, FieldSpec, FieldType, OptionSource};
use crate::domain::validation::{loose_eq, value_to_string};
use serde_json::Value;
use std::sync::Arc;

/// Select list built from the spec's `data_list` (id -> display text)
#[derive(Debug, Clone)]
pub struct DropdownField {
    base: BaseField,
    data_list: Vec<(String, String)>,
}

/// Read `data_list` as ordered (id, text) pairs
///
/// An object maps ids to text; an array uses positions as ids.
fn parse_data_list(spec: &FieldSpec) -> Vec<(String, String)> {
    match spec.attr("data_list") {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(id, text)| (id.clone(), display_value(text)))
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, text)| (i.to_string(), display_value(text)))
            .collect(),
        _ => Vec::new(),
    }
}

impl DropdownField {
    pub fn from_spec(spec: &FieldSpec) -> Option<Self> {
        BaseField::from_spec(spec).map(|base| Self {
            base,
            data_list: parse_data_list(spec),
        })
    }

    pub fn data_list(&self) -> &[(String, String)] {
        &self.data_list
    }
}

impl Field for DropdownField {
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
        if self.data_list.is_empty() {
            return String::new();
        }

        let current = self.data();
        let options: String = self
            .data_list
            .iter()
            .map(|(id, text)| {
                let selected = if loose_eq(&current, &Value::String(id.clone())) {
                    " selected=\"selected\""
                } else {
                    ""
                };
                format!(
                    "<option value=\"{}\"{}>{}</option>",
                    escape_attr(id),
                    selected,
                    escape_html(text)
                )
            })
            .collect();

        format!(
            "<select id=\"{}\" name=\"{}\">{}</select>",
            escape_attr(&self.base.id),
            self.base.input_name(),
            options
        )
    }
}

/// Dropdown type bound to a live [`OptionSource`]
///
/// Validation asks the source for the allowed ids each time instead of using
/// the spec's `data_list`.
#[derive(Clone)]
pub struct DropdownType {
    source: Arc<dyn OptionSource>,
}

impl DropdownType {
    pub fn new(source: Arc<dyn OptionSource>) -> Self {
        Self { source }
    }
}

impl FieldType for DropdownType {
    fn create(&self, spec: &FieldSpec) -> Option<Box<dyn Field>> {
        DropdownField::from_spec(spec).map(|f| Box::new(f) as Box<dyn Field>)
    }

    fn validate(&self, input: &Value, spec: &FieldSpec) -> Option<Value> {
        let allowed = self.source.allowed_ids();
        let matched = allowed.into_iter().find(|id| loose_eq(id, input));
        if matched.is_none() {
            tracing::debug!(
                field_id = %spec.id,
                value = %value_to_string(input),
                "Dropdown value not in allowed set"
            );
        }
        matched
    }
}
