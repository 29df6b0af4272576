//! Contract models for settings pages
//!
//! Field specs are plain attribute mappings: a handful of common keys plus
//! type-specific attributes kept in `extra`. They deserialize from config so
//! whole sections can be declared in YAML.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Render function used by callback fields to produce their markup body
pub type RenderCallback = Arc<dyn Fn() -> String + Send + Sync>;

/// Declarative description of one settings form field
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Registered field type name (text, boolean, callback, dropdown, number)
    #[serde(rename = "type", default)]
    pub field_type: String,
    /// Form element id, also the key inside the options mapping
    #[serde(default)]
    pub id: String,
    /// Human readable label
    #[serde(default)]
    pub label: String,
    /// Name of the options mapping this field is stored in
    #[serde(default)]
    pub option: String,
    /// Current stored value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Value used when nothing is stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Display order inside the section, ascending
    #[serde(default)]
    pub order: i64,
    /// Free text shown next to checkbox controls
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Render function for callback fields
    #[serde(skip)]
    pub callback: Option<RenderCallback>,
    /// Type-specific attributes (min, max, step, data_list, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldSpec {
    pub fn new(field_type: impl Into<String>, id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            id: id.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.option = option.into();
        self
    }

    pub fn with_data(mut self, data: Option<Value>) -> Self {
        self.data = data;
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set a type-specific attribute such as `min` or `data_list`
    pub fn with_attr(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Look up a type-specific attribute
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("field_type", &self.field_type)
            .field("id", &self.id)
            .field("label", &self.label)
            .field("option", &self.option)
            .field("data", &self.data)
            .field("default", &self.default)
            .field("order", &self.order)
            .field("description", &self.description)
            .field("callback", &self.callback.as_ref().map(|_| "<fn>"))
            .field("extra", &self.extra)
            .finish()
    }
}

/// Required parameters every feature module supplies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Section title shown on the page
    pub admin_title: String,
    /// Description rendered before the section fields
    pub admin_description: String,
    /// Section key, unique per page
    pub section_key: String,
    /// Storage name of the module's options mapping
    pub options_handle: String,
    /// Base name of the field and validation hooks, hooks are skipped when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_filter: Option<String>,
}

/// Arguments used to build a settings page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageArgs {
    /// Page title
    pub page_title: String,
    /// Menu title
    pub menu_title: String,
    /// Option group the page form submits to
    pub option_group: String,
    /// Menu position, 61 when unset
    pub position: Option<i64>,
}

impl PageArgs {
    pub fn new(
        page_title: impl Into<String>,
        menu_title: impl Into<String>,
        option_group: impl Into<String>,
    ) -> Self {
        Self {
            page_title: page_title.into(),
            menu_title: menu_title.into(),
            option_group: option_group.into(),
            position: None,
        }
    }

    pub fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }
}
