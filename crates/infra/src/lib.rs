//! Infrastructure layer: key-value storage, the pet repository, the lifecycle
//! service and configuration.

pub mod config;
pub mod kv_store;
pub mod repository;
pub mod service;

pub use config::EngineConfig;
pub use kv_store::{InMemoryKeyValueStore, JsonFileStore, KeyValueStore, StorageError};
pub use repository::{PETS_KEY, PetRepository};
pub use service::LifecycleService;
