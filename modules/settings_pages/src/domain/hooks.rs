//! Named filters feature modules expose to outside code
//!
//! - fields filter `{name}`: runs over a module's field specs (with its store)
//!   before they are added to the section, so fields can be added or removed
//! - validation filter `{name}_validation`: runs over the staged input and the
//!   validated output before the output is persisted
//!
//! Filters registered under one name run in registration order.

use super::store::{OptionsMap, OptionsStore};
use crate::contract::FieldSpec;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub type FieldsFilter = Arc<dyn Fn(Vec<FieldSpec>, &OptionsStore) -> Vec<FieldSpec> + Send + Sync>;
pub type ValidationFilter = Arc<dyn Fn(&OptionsMap, OptionsMap) -> OptionsMap + Send + Sync>;

/// Registry of named filters
#[derive(Default)]
pub struct Hooks {
    fields: RwLock<HashMap<String, Vec<FieldsFilter>>>,
    validation: RwLock<HashMap<String, Vec<ValidationFilter>>>,
}

/// Name of the validation filter paired with a fields filter name
pub fn validation_filter_name(options_filter: &str) -> String {
    format!("{}_validation", options_filter)
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_fields_filter<F>(&self, name: &str, filter: F)
    where
        F: Fn(Vec<FieldSpec>, &OptionsStore) -> Vec<FieldSpec> + Send + Sync + 'static,
    {
        self.fields
            .write()
            .entry(name.to_string())
            .or_default()
            .push(Arc::new(filter));
    }

    pub fn add_validation_filter<F>(&self, name: &str, filter: F)
    where
        F: Fn(&OptionsMap, OptionsMap) -> OptionsMap + Send + Sync + 'static,
    {
        self.validation
            .write()
            .entry(name.to_string())
            .or_default()
            .push(Arc::new(filter));
    }

    pub fn apply_fields_filters(
        &self,
        name: &str,
        specs: Vec<FieldSpec>,
        store: &OptionsStore,
    ) -> Vec<FieldSpec> {
        // Clone out so filters may register further hooks
        let filters = self.fields.read().get(name).cloned().unwrap_or_default();
        filters.iter().fold(specs, |specs, filter| filter(specs, store))
    }

    pub fn apply_validation_filters(
        &self,
        name: &str,
        filtered_input: &OptionsMap,
        output: OptionsMap,
    ) -> OptionsMap {
        let filters = self.validation.read().get(name).cloned().unwrap_or_default();
        filters
            .iter()
            .fold(output, |output, filter| filter(filtered_input, output))
    }
}
