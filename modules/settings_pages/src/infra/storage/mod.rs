//! Storage layer - options backends

pub mod file;
pub mod memory;

pub use file::{JsonFileBackend, StorageError};
pub use memory::MemoryBackend;
