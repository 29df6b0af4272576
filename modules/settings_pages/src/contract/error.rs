//! Contract error types for settings pages
//!
//! Most operations report failure through `bool` / `Option` sentinels. These
//! errors are returned where a caller has to know why wiring failed.

/// Settings pages misconfiguration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A required module parameter is empty
    #[error("Missing required parameter: {parameter}")]
    MissingParameter {
        /// Parameter name (admin_title, section_key, ...)
        parameter: String,
    },
    /// Options handle sanitizes to an empty storage name
    #[error("Invalid options name: '{name}'")]
    InvalidOptionsName {
        /// Name as supplied
        name: String,
    },
    /// Page slug or page arguments are unusable
    #[error("Invalid page '{slug}': {details}")]
    InvalidPage {
        /// Page slug as supplied
        slug: String,
        /// Error details
        details: String,
    },
    /// Declared module references a page that was never built
    #[error("Page not found: {slug}")]
    PageNotFound {
        /// Page slug
        slug: String,
    },
    /// A page refused to add the module's section
    #[error("Section rejected: {key}")]
    SectionRejected {
        /// Section key
        key: String,
    },
}
