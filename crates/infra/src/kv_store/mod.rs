//! Key-value store boundary.
//!
//! The pet list lives under a single key as one serialized blob. This module
//! defines the storage abstraction without making any device assumptions, plus
//! an in-memory store for tests and a JSON file store for real use.

pub mod file;
#[cfg(test)]
pub(crate) mod flaky;
pub mod in_memory;
pub mod r#trait;

pub use file::JsonFileStore;
pub use in_memory::InMemoryKeyValueStore;
pub use r#trait::{KeyValueStore, StorageError};
