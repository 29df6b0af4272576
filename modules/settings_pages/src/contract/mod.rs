//! Contract layer - public types shared by feature modules and the domain
//!
//! Field specs and module parameters are plain data; the traits here are the
//! seams new field types and option sources plug into.

pub mod error;
pub mod model;
pub mod traits;

pub use error::SettingsError;
pub use model::{FieldSpec, ModuleConfig, PageArgs, RenderCallback};
pub use traits::{Field, FieldType, OptionSource, StaticOptionSource};
