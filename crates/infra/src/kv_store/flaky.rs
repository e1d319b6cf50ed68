use std::sync::atomic::{AtomicBool, Ordering};

use super::in_memory::InMemoryKeyValueStore;
use super::r#trait::{KeyValueStore, StorageError};

/// In-memory store whose reads or writes can be switched to fail.
#[derive(Debug, Default)]
pub(crate) struct FlakyStore {
    inner: InMemoryKeyValueStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub(crate) fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn io_error() -> StorageError {
        StorageError::Io(std::io::Error::other("disk unavailable"))
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::io_error());
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::io_error());
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }

    fn clear_all(&self) -> Result<(), StorageError> {
        self.inner.clear_all()
    }
}
