//! Settings Pages
//!
//! Declarative settings sections for administration pages. Feature modules
//! describe their fields as [`FieldSpec`]s; the field type registry turns
//! them into renderable fields and validates submitted values per type before
//! the module's options mapping is persisted.

// Public exports
pub mod contract;
pub use contract::{
    error::SettingsError, Field, FieldSpec, FieldType, ModuleConfig, OptionSource, PageArgs,
    StaticOptionSource,
};

pub mod module;
pub use module::{install, FieldProvider, SettingsModule, StaticFields};

pub mod config;
pub use config::Config;

pub mod domain;
pub use domain::{
    default_registry, FieldTypeRegistry, Hooks, OptionsBackend, OptionsMap, OptionsStore,
    SettingsPage, SettingsPages, SubmissionHandler,
};

pub mod infra;
pub use infra::storage::{JsonFileBackend, MemoryBackend};
