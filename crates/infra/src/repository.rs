//! Pet repository over the key-value store.
//!
//! All pets are stored as one JSON array under [`PETS_KEY`]. Every mutation is
//! a read-modify-write of that whole blob, serialized by an in-process mutex so
//! two writers sharing a repository cannot clobber each other.
//!
//! Storage failures never reach callers: reads degrade to an empty list and
//! writes are skipped, both logged. A mutation whose read failed is not written
//! back, so unreadable data is never overwritten by a partial list.

use std::sync::Mutex;

use tracing::{debug, error, warn};

use petcare_core::{Entity, PetId};
use petcare_pets::Pet;

use crate::kv_store::{KeyValueStore, StorageError};

/// Key under which the whole pet list is stored.
pub const PETS_KEY: &str = "tamagochi-key";

pub struct PetRepository<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S> PetRepository<S>
where
    S: KeyValueStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the stored list. An absent key or a `null` blob is an empty list.
    pub fn try_list_all(&self) -> Result<Vec<Pet>, StorageError> {
        match self.store.get(PETS_KEY)? {
            Some(raw) => Ok(serde_json::from_str::<Option<Vec<Pet>>>(&raw)?.unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    fn try_save(&self, pets: &[Pet]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(pets)?;
        self.store.set(PETS_KEY, raw)
    }

    /// All pets in insertion order; empty when nothing is stored or the
    /// store cannot be read.
    pub fn list_all(&self) -> Vec<Pet> {
        self.try_list_all().unwrap_or_else(|e| {
            warn!(error = %e, "failed to read pets, treating as empty");
            Vec::new()
        })
    }

    pub fn get_by_id(&self, id: PetId) -> Option<Pet> {
        self.list_all().into_iter().find(|p| *p.id() == id)
    }

    /// Replace the whole stored sequence. Returns whether it was persisted.
    pub fn upsert_all(&self, pets: &[Pet]) -> bool {
        let _guard = self.lock();
        self.save_logged(pets)
    }

    /// Append a pet and persist. Returns whether the write happened; a
    /// failed read or write leaves the stored list as it was.
    pub fn add(&self, pet: Pet) -> bool {
        match self.mutate_inner(|pets| {
            pets.push(pet);
            Ok::<(), std::convert::Infallible>(())
        }) {
            Ok(((), persisted)) => persisted,
            Err(never) => match never {},
        }
    }

    /// Remove a pet if present. Returns whether anything was removed.
    pub fn remove(&self, id: PetId) -> bool {
        self.mutate(|pets| {
            let before = pets.len();
            pets.retain(|p| *p.id() != id);
            pets.len() != before
        })
    }

    /// Store an empty sequence.
    pub fn clear(&self) -> bool {
        self.upsert_all(&[])
    }

    /// Infallible read-modify-write under the repository lock.
    pub fn mutate<T>(&self, f: impl FnOnce(&mut Vec<Pet>) -> T) -> T {
        match self.try_mutate(|pets| Ok::<T, std::convert::Infallible>(f(pets))) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Read-modify-write under the repository lock.
    ///
    /// `f` works on the full list; the list is written back only if `f`
    /// succeeds, changed something, and the initial read succeeded.
    pub fn try_mutate<T, E>(&self, f: impl FnOnce(&mut Vec<Pet>) -> Result<T, E>) -> Result<T, E> {
        self.mutate_inner(f).map(|(out, _)| out)
    }

    /// Same as [`Self::try_mutate`], also reporting whether a write landed.
    fn mutate_inner<T, E>(
        &self,
        f: impl FnOnce(&mut Vec<Pet>) -> Result<T, E>,
    ) -> Result<(T, bool), E> {
        let _guard = self.lock();

        let (mut pets, readable) = match self.try_list_all() {
            Ok(pets) => (pets, true),
            Err(e) => {
                error!(error = %e, "failed to read pets, write will be skipped");
                (Vec::new(), false)
            }
        };
        let before = pets.clone();

        let out = f(&mut pets)?;

        if !readable {
            return Ok((out, false));
        }
        if pets == before {
            debug!("pet list unchanged, skipping write");
            return Ok((out, false));
        }
        let persisted = self.save_logged(&pets);
        Ok((out, persisted))
    }

    fn save_logged(&self, pets: &[Pet]) -> bool {
        match self.try_save(pets) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, count = pets.len(), "failed to persist pets");
                false
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }
}
