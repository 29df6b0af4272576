//! Settings section - titled group of fields on a page

use super::fields::escape_html;
use super::registry::FieldTypeRegistry;
use crate::contract::{Field, FieldSpec};

pub struct SettingsSection {
    key: String,
    title: String,
    description: String,
    fields: Vec<Box<dyn Field>>,
}

impl SettingsSection {
    pub fn new(key: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            description: description.into(),
            fields: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Create a field through the registry and append it
    ///
    /// Returns false when the type is unregistered or the spec is rejected.
    pub fn add_field(&mut self, registry: &FieldTypeRegistry, spec: &FieldSpec) -> bool {
        match registry.create(&spec.field_type, spec) {
            Some(field) => {
                tracing::debug!(section = %self.key, field_id = %spec.id, "Added field");
                self.fields.push(field);
                true
            }
            None => {
                tracing::debug!(
                    section = %self.key,
                    field_id = %spec.id,
                    field_type = %spec.field_type,
                    "Field not created"
                );
                false
            }
        }
    }

    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields sorted by `order`; equal orders keep insertion order
    pub fn fields(&self) -> Vec<&dyn Field> {
        let mut fields: Vec<&dyn Field> = self.fields.iter().map(|f| f.as_ref()).collect();
        fields.sort_by_key(|f| f.order());
        fields
    }

    /// Labels and control bodies of every field, in display order
    pub fn body(&self) -> String {
        self.fields()
            .into_iter()
            .map(|field| {
                format!(
                    "<label class=\"field\"><span class=\"field-title\">{}</span>\n\
                     <span class=\"field-control\">{}</span></label>\n",
                    field.label(),
                    field.render_body()
                )
            })
            .collect()
    }

    /// Title for the section picker, a placeholder when untitled
    pub fn display_title(&self) -> String {
        if self.title.is_empty() {
            format!("<Section {}>", self.key)
        } else {
            self.title.clone()
        }
    }

    /// Escaped description text
    pub fn description_html(&self) -> String {
        escape_html(&self.description)
    }
}
