//! Feature module wiring
//!
//! A [`SettingsModule`] owns one options store and contributes one section to
//! a settings page. Its fields come from a [`FieldProvider`] and every
//! submission for its store is validated against those fields.

use crate::config::Config;
use crate::contract::{FieldSpec, ModuleConfig, SettingsError};
use crate::domain::validation::{as_number, is_empty_value, sanitize_html, sanitize_key, value_to_string};
use crate::domain::{
    validate_submission, validation_filter_name, FieldTypeRegistry, Hooks, OptionsBackend,
    OptionsMap, OptionsStore, SettingsPage, SettingsPages, SubmissionHandler,
};
use serde_json::Value;
use std::sync::Arc;

/// Supplies a module's field specs, built against its current store
pub trait FieldProvider: Send + Sync {
    fn field_specs(&self, store: &OptionsStore) -> Vec<FieldSpec>;
}

impl<F> FieldProvider for F
where
    F: Fn(&OptionsStore) -> Vec<FieldSpec> + Send + Sync,
{
    fn field_specs(&self, store: &OptionsStore) -> Vec<FieldSpec> {
        self(store)
    }
}

/// Fixed field specs, typically declared in config
///
/// Each spec's `option` defaults to the store name and its `data` to the
/// stored value for its id.
#[derive(Debug, Clone, Default)]
pub struct StaticFields {
    fields: Vec<FieldSpec>,
}

impl StaticFields {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }
}

impl FieldProvider for StaticFields {
    fn field_specs(&self, store: &OptionsStore) -> Vec<FieldSpec> {
        self.fields
            .iter()
            .map(|spec| {
                let mut spec = spec.clone();
                if spec.option.is_empty() {
                    spec.option = store.name().to_string();
                }
                if spec.data.is_none() {
                    spec.data = store.get(&spec.id);
                }
                spec
            })
            .collect()
    }
}

/// A feature module registered on a settings page
pub struct SettingsModule {
    config: ModuleConfig,
    section_key: String,
    store: OptionsStore,
    provider: Arc<dyn FieldProvider>,
    registry: Arc<FieldTypeRegistry>,
    hooks: Arc<Hooks>,
}

fn missing(parameter: &str) -> SettingsError {
    tracing::warn!(
        target: "settings_pages::misconfig",
        parameter = %parameter,
        "Register a valid module parameter"
    );
    SettingsError::MissingParameter {
        parameter: parameter.to_string(),
    }
}

impl SettingsModule {
    /// Validate the module parameters and open its options store
    pub fn new(
        config: ModuleConfig,
        backend: Arc<dyn OptionsBackend>,
        provider: Arc<dyn FieldProvider>,
        registry: Arc<FieldTypeRegistry>,
        hooks: Arc<Hooks>,
    ) -> Result<Self, SettingsError> {
        for (parameter, value) in [
            ("admin_title", &config.admin_title),
            ("admin_description", &config.admin_description),
            ("section_key", &config.section_key),
            ("options_handle", &config.options_handle),
        ] {
            if value.trim().is_empty() {
                return Err(missing(parameter));
            }
        }

        let section_key = sanitize_key(&config.section_key);
        if section_key.is_empty() {
            return Err(missing("section_key"));
        }

        let store = OptionsStore::new(&config.options_handle, OptionsMap::new(), backend);
        if store.is_inert() {
            return Err(SettingsError::InvalidOptionsName {
                name: config.options_handle.clone(),
            });
        }

        tracing::debug!(section = %section_key, option = %store.name(), "Created settings module");
        Ok(Self {
            config,
            section_key,
            store,
            provider,
            registry,
            hooks,
        })
    }

    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    /// Sanitized section key
    pub fn section_key(&self) -> &str {
        &self.section_key
    }

    pub fn store(&self) -> &OptionsStore {
        &self.store
    }

    /// Current field specs: provider output passed through the fields filter
    pub fn field_specs(&self) -> Vec<FieldSpec> {
        let specs = self.provider.field_specs(&self.store);
        match &self.config.options_filter {
            Some(filter) => self.hooks.apply_fields_filters(filter, specs, &self.store),
            None => specs,
        }
    }

    /// Add this module's section, options handler and fields to `page`
    ///
    /// Returns false, leaving the page untouched, when it already has the
    /// section key or the options name. Fields the registry cannot create are
    /// skipped.
    pub fn add_options_section(self: &Arc<Self>, page: &SettingsPage) -> bool {
        if page.has_options(self.store.name()) {
            tracing::warn!(
                target: "settings_pages::misconfig",
                page = %page.slug(),
                option = %self.store.name(),
                "Options name is already handled on this page"
            );
            return false;
        }

        if !page.add_section(
            &self.section_key,
            &self.config.admin_title,
            &self.config.admin_description,
        ) {
            tracing::warn!(
                target: "settings_pages::misconfig",
                page = %page.slug(),
                section = %self.section_key,
                "Section key is already in use on this page"
            );
            return false;
        }

        let handler: Arc<dyn SubmissionHandler> = Arc::clone(self) as Arc<dyn SubmissionHandler>;
        if !page.add_options(self.store.name(), handler) {
            tracing::warn!(
                target: "settings_pages::misconfig",
                page = %page.slug(),
                option = %self.store.name(),
                "Options name is already handled on this page"
            );
            return false;
        }

        let specs = self.field_specs();
        let added = specs
            .iter()
            .filter(|spec| page.add_setting(&self.section_key, spec))
            .count();
        tracing::debug!(
            page = %page.slug(),
            section = %self.section_key,
            added,
            declared = specs.len(),
            "Added options section"
        );
        true
    }

    /// Validate a raw submission into the full mapping to persist
    pub fn validate_options(&self, input: &OptionsMap) -> OptionsMap {
        let specs = self.field_specs();
        let validated = validate_submission(&specs, &self.store, &self.registry, input);
        match &self.config.options_filter {
            Some(filter) => self.hooks.apply_validation_filters(
                &validation_filter_name(filter),
                &validated.filtered_input,
                validated.output,
            ),
            None => validated.output,
        }
    }

    fn stored(&self, name: &str) -> Option<Value> {
        self.store.get(&sanitize_key(name))
    }

    /// Stored checkbox state; `default` when missing or empty
    pub fn boolean_value(&self, name: &str, default: bool) -> bool {
        match self.stored(name) {
            Some(value) if !is_empty_value(&value) => value.as_str() == Some("on"),
            _ => default,
        }
    }

    /// Stored markup sanitized down to post-content tags, `None` when unset
    pub fn html_value(&self, name: &str) -> Option<String> {
        self.stored(name)
            .filter(|value| !value.is_null())
            .map(|value| sanitize_html(&value_to_string(&value)))
    }

    /// Stored value as an unsanitized string, `default` when unset
    pub fn string_value(&self, name: &str, default: &str) -> String {
        match self.stored(name) {
            Some(value) if !value.is_null() => value_to_string(&value),
            _ => default.to_string(),
        }
    }

    /// Stored integer value
    ///
    /// With `positive`, negative defaults become 0 and negative stored values
    /// fall back to the default. Returns `None` for an empty name.
    pub fn integer_value(&self, name: &str, default: i64, positive: bool) -> Option<i64> {
        if name.is_empty() {
            return None;
        }
        let default = if positive && default < 0 { 0 } else { default };

        let number = self.stored(name).as_ref().and_then(as_number);
        Some(match number {
            Some(n) => {
                let value = n.trunc() as i64;
                if positive && value < 0 {
                    default
                } else {
                    value
                }
            }
            None => default,
        })
    }
}

impl SubmissionHandler for SettingsModule {
    fn sanitize(&self, input: &OptionsMap) -> OptionsMap {
        self.validate_options(input)
    }

    fn commit(&self, values: OptionsMap) -> bool {
        self.store.set_all(values)
    }
}

/// Build every configured page and declared module
///
/// Modules use the page factory's registry and the shared `backend` and
/// `hooks`. Returns the modules in declaration order.
pub fn install(
    config: &Config,
    pages: &SettingsPages,
    backend: Arc<dyn OptionsBackend>,
    hooks: Arc<Hooks>,
) -> Result<Vec<Arc<SettingsModule>>, SettingsError> {
    for page in &config.pages {
        if pages.build_page(&page.slug, page.args()).is_none() {
            return Err(SettingsError::InvalidPage {
                slug: page.slug.clone(),
                details: "page was rejected by the page factory".to_string(),
            });
        }
    }

    let mut modules = Vec::with_capacity(config.modules.len());
    for declared in &config.modules {
        let page = pages
            .get(&declared.page)
            .ok_or_else(|| SettingsError::PageNotFound {
                slug: declared.page.clone(),
            })?;

        let module = Arc::new(SettingsModule::new(
            declared.module_config(),
            Arc::clone(&backend),
            Arc::new(StaticFields::new(declared.fields.clone())),
            Arc::clone(pages.registry()),
            Arc::clone(&hooks),
        )?);

        if !module.add_options_section(&page) {
            return Err(SettingsError::SectionRejected {
                key: module.section_key().to_string(),
            });
        }
        modules.push(module);
    }

    tracing::info!(
        pages = config.pages.len(),
        modules = modules.len(),
        "Settings pages installed"
    );
    Ok(modules)
}
