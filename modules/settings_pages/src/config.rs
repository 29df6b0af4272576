//! Configuration for settings pages
//!
//! Pages and fully declared modules can be described in YAML. Values from
//! `SETTINGS_PAGES_`-prefixed environment variables override the file.

use crate::contract::{FieldSpec, ModuleConfig, PageArgs};
use crate::domain::OptionsBackend;
use crate::infra::storage::{JsonFileBackend, MemoryBackend};
use anyhow::{Context, Result};
use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const ENV_PREFIX: &str = "SETTINGS_PAGES_";

/// Settings pages configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// JSON document holding every options mapping, kept in memory when unset
    #[serde(default)]
    pub options_file: Option<PathBuf>,

    /// Pages to build
    #[serde(default)]
    pub pages: Vec<PageConfig>,

    /// Modules declared entirely in config
    #[serde(default)]
    pub modules: Vec<DeclaredModule>,
}

/// One settings page
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    pub slug: String,
    pub page_title: String,
    pub menu_title: String,
    pub option_group: String,

    #[serde(default = "default_position")]
    pub position: i64,
}

impl PageConfig {
    pub fn args(&self) -> PageArgs {
        PageArgs::new(&self.page_title, &self.menu_title, &self.option_group)
            .with_position(self.position)
    }
}

/// A module whose section and fields are declared in config
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclaredModule {
    /// Slug of the page the section is added to
    pub page: String,
    pub admin_title: String,
    #[serde(default)]
    pub admin_description: String,
    pub section_key: String,
    pub options_handle: String,
    #[serde(default)]
    pub options_filter: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

impl DeclaredModule {
    pub fn module_config(&self) -> ModuleConfig {
        ModuleConfig {
            admin_title: self.admin_title.clone(),
            admin_description: self.admin_description.clone(),
            section_key: self.section_key.clone(),
            options_handle: self.options_handle.clone(),
            options_filter: self.options_filter.clone(),
        }
    }
}

fn default_position() -> i64 {
    61
}

impl Config {
    /// Load from a YAML file merged with environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to load settings pages config from {}", path.display()))
    }

    /// Parse a YAML document, without environment overrides
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Figment::from(Yaml::string(yaml))
            .extract()
            .context("Failed to parse settings pages config")
    }

    /// Options backend selected by `options_file`
    pub fn backend(&self) -> Arc<dyn OptionsBackend> {
        match &self.options_file {
            Some(path) => Arc::new(JsonFileBackend::new(path)),
            None => Arc::new(MemoryBackend::new()),
        }
    }
}
