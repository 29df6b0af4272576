//! Field type registry
//!
//! Maps sanitized type names to [`FieldType`] descriptors. Sections create
//! fields through it and the submission pipeline validates through it, so a
//! new type only needs registering.

use crate::contract::{Field, FieldSpec, FieldType, OptionSource, StaticOptionSource};
use crate::domain::fields::{BooleanType, CallbackType, DropdownType, NumberType, TextType};
use crate::domain::validation::sanitize_key;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of field types keyed by sanitized name
#[derive(Default)]
pub struct FieldTypeRegistry {
    types: RwLock<HashMap<String, Arc<dyn FieldType>>>,
}

impl FieldTypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with text, boolean, callback, dropdown and number
    ///
    /// Dropdown validation asks `source` for the allowed ids.
    pub fn with_builtin_types(source: Arc<dyn OptionSource>) -> Self {
        let registry = Self::new();
        registry.register("text", Arc::new(TextType));
        registry.register("boolean", Arc::new(BooleanType));
        registry.register("callback", Arc::new(CallbackType));
        registry.register("dropdown", Arc::new(DropdownType::new(source)));
        registry.register("number", Arc::new(NumberType));
        registry
    }

    /// Register a type; existing names are never overwritten
    pub fn register(&self, type_name: &str, field_type: Arc<dyn FieldType>) -> bool {
        let key = sanitize_key(type_name);
        if key.is_empty() {
            tracing::warn!(
                target: "settings_pages::misconfig",
                type_name = %type_name,
                "Field type name is empty after sanitizing"
            );
            return false;
        }

        let mut types = self.types.write();
        if types.contains_key(&key) {
            tracing::debug!(type_name = %key, "Field type already registered");
            return false;
        }
        types.insert(key.clone(), field_type);
        tracing::debug!(type_name = %key, "Registered field type");
        true
    }

    pub fn is_registered(&self, type_name: &str) -> bool {
        let key = sanitize_key(type_name);
        !key.is_empty() && self.types.read().contains_key(&key)
    }

    /// Registered type names, sorted
    pub fn registered_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Construct a field of the given type from its spec
    pub fn create(&self, type_name: &str, spec: &FieldSpec) -> Option<Box<dyn Field>> {
        self.lookup(type_name)?.create(spec)
    }

    /// Value to stage for a field of this type that was not submitted
    pub fn unset_value(&self, type_name: &str) -> Option<Value> {
        self.lookup(type_name)?.unset_value()
    }

    /// Validate a raw value using the type named by `spec.field_type`
    pub fn validate(&self, spec: &FieldSpec, input: &Value) -> Option<Value> {
        if spec.field_type.is_empty() {
            return None;
        }
        self.lookup(&spec.field_type)?.validate(input, spec)
    }

    fn lookup(&self, type_name: &str) -> Option<Arc<dyn FieldType>> {
        let key = sanitize_key(type_name);
        if key.is_empty() {
            return None;
        }
        self.types.read().get(&key).cloned()
    }
}

static DEFAULT_REGISTRY: Lazy<Arc<FieldTypeRegistry>> = Lazy::new(|| {
    Arc::new(FieldTypeRegistry::with_builtin_types(Arc::new(
        StaticOptionSource::default(),
    )))
});

/// Process-wide registry with the built-in types
///
/// Its dropdown type has no live option source and rejects every id; build a
/// registry with [`FieldTypeRegistry::with_builtin_types`] to supply one.
pub fn default_registry() -> Arc<FieldTypeRegistry> {
    Arc::clone(&DEFAULT_REGISTRY)
}
