//! Built-in field types
//!
//! Each type is a small descriptor implementing [`FieldType`]; the fields it
//! creates share [`BaseField`] for the attributes every spec carries.

mod boolean;
mod callback;
mod dropdown;
mod number;
mod text;

pub use boolean::{BooleanField, BooleanType};
pub use callback::{CallbackField, CallbackType};
pub use dropdown::{DropdownField, DropdownType};
pub use number::{NumberConstraints, NumberField, NumberType};
pub use text::{TextField, TextType};

use crate::contract::FieldSpec;
use crate::domain::validation::is_empty_value;
use serde_json::Value;

/// Attributes common to every field
#[derive(Debug, Clone)]
pub struct BaseField {
    pub id: String,
    pub field_type: String,
    pub label: String,
    pub option: String,
    pub order: i64,
    pub data: Option<Value>,
    pub default: Value,
}

impl BaseField {
    /// Read the common attributes, `None` when the spec has no id
    pub fn from_spec(spec: &FieldSpec) -> Option<Self> {
        if spec.id.trim().is_empty() {
            tracing::debug!(field_type = %spec.field_type, "Field spec without id rejected");
            return None;
        }

        let default = match &spec.default {
            Some(value) if !is_empty_value(value) => value.clone(),
            _ => Value::String(String::new()),
        };

        Some(Self {
            id: spec.id.clone(),
            field_type: spec.field_type.clone(),
            label: spec.label.clone(),
            option: spec.option.clone(),
            order: spec.order,
            data: spec.data.clone().filter(|v| !v.is_null()),
            default,
        })
    }

    /// Stored value, else the default
    pub fn data_or_default(&self) -> Value {
        self.data.clone().unwrap_or_else(|| self.default.clone())
    }

    /// `name` attribute of the form control: `option[id]`
    pub fn input_name(&self) -> String {
        format!("{}[{}]", escape_attr(&self.option), escape_attr(&self.id))
    }
}

/// Escape text for an HTML body
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for a quoted attribute value
pub fn escape_attr(raw: &str) -> String {
    escape_html(raw)
}

/// Display form of a stored value inside markup
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
