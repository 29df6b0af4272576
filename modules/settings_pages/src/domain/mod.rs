//! Domain layer - field types, options storage and submission handling

pub mod fields;
pub mod hooks;
pub mod page;
pub mod registry;
pub mod repository;
pub mod section;
pub mod store;
pub mod submission;
pub mod validation;

pub use hooks::{validation_filter_name, Hooks};
pub use page::{SettingsPage, SettingsPages, SubmissionHandler};
pub use registry::{default_registry, FieldTypeRegistry};
pub use repository::OptionsBackend;
pub use section::SettingsSection;
pub use store::{OptionsMap, OptionsStore};
pub use submission::{validate_submission, ValidatedSubmission};
pub use validation::sanitize_key;
