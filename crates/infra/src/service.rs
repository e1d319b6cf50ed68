//! Pet lifecycle service (application-level orchestration).
//!
//! Every operation is one read-modify-write over the [`PetRepository`]:
//!
//! ```text
//! load list ─▶ decay each touched pet to `now` ─▶ lazy wake ─▶ apply operation ─▶ persist
//! ```
//!
//! Reads decay too (`get_pet` as well as `list_pets`), so a detail screen never
//! shows staler numbers than the list. Game rules (no feeding or playing while
//! asleep, dead pets only deletable) are enforced here, not left to screens.

use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use petcare_core::{Clock, DomainError, DomainResult, PetId, SystemClock};
use petcare_pets::{MiniGame, Pet, PetPatch, apply_time_decay_at_rate, feed, play, start_sleep, wake};

use crate::config::EngineConfig;
use crate::kv_store::{InMemoryKeyValueStore, JsonFileStore, KeyValueStore};
use crate::repository::PetRepository;

pub struct LifecycleService<S, C> {
    repository: PetRepository<S>,
    clock: C,
    config: EngineConfig,
}

impl LifecycleService<Box<dyn KeyValueStore>, SystemClock> {
    /// Build a service on the wall clock with the store named by `config`:
    /// a [`JsonFileStore`] at `storage_path`, or memory when it is unset.
    pub fn from_config(config: EngineConfig) -> anyhow::Result<Self> {
        let store: Box<dyn KeyValueStore> = match &config.storage_path {
            Some(path) => Box::new(
                JsonFileStore::open(path.clone())
                    .with_context(|| format!("failed to open pet store at {:?}", path))?,
            ),
            None => Box::new(InMemoryKeyValueStore::new()),
        };
        Ok(Self::new(store, SystemClock, config))
    }
}

impl<S, C> LifecycleService<S, C>
where
    S: KeyValueStore,
    C: Clock,
{
    pub fn new(store: S, clock: C, config: EngineConfig) -> Self {
        Self {
            repository: PetRepository::new(store),
            clock,
            config,
        }
    }

    pub fn repository(&self) -> &PetRepository<S> {
        &self.repository
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Bring a stored pet forward to `now`: decay, then wake if the nap is over.
    fn refresh(&self, pet: &Pet, now: DateTime<Utc>) -> Pet {
        let decayed = apply_time_decay_at_rate(pet, now, self.config.decay_per_hour);
        wake(&decayed, now)
    }

    /// Create and persist a new pet.
    ///
    /// A failed write is logged, not returned: the caller still gets the pet,
    /// but it will be missing from the next listing.
    #[instrument(skip(self))]
    pub fn create_pet(&self, name: &str, image_uri: &str) -> DomainResult<Pet> {
        let now = self.clock.now();
        let pet = Pet::create(PetId::new(), name, image_uri, now)?;

        if self.repository.add(pet.clone()) {
            info!(pet_id = %pet.pet_id(), "pet created");
        } else {
            warn!(pet_id = %pet.pet_id(), "pet created but not persisted");
        }
        Ok(pet)
    }

    /// Look up a pet, decayed to now. The refreshed record is persisted.
    pub fn get_pet(&self, id: PetId) -> Option<Pet> {
        self.refresh_pet(id)
    }

    /// Decay a single pet to now and persist it.
    #[instrument(skip(self), fields(pet_id = %id))]
    pub fn refresh_pet(&self, id: PetId) -> Option<Pet> {
        let now = self.clock.now();
        self.repository.mutate(|pets| {
            let slot = pets.iter_mut().find(|p| p.pet_id() == id)?;
            *slot = self.refresh(slot, now);
            Some(slot.clone())
        })
    }

    /// All pets, each decayed to now independently; the refreshed list is persisted.
    #[instrument(skip(self))]
    pub fn list_pets(&self) -> Vec<Pet> {
        let now = self.clock.now();
        self.repository.mutate(|pets| {
            for pet in pets.iter_mut() {
                *pet = self.refresh(pet, now);
            }
            debug!(count = pets.len(), "pets refreshed");
            pets.clone()
        })
    }

    /// Merge a patch onto a stored pet.
    ///
    /// The pet is decayed to now first; the status is always re-derived from
    /// the merged needs, whatever the caller thinks it should be.
    #[instrument(skip(self, patch), fields(pet_id = %patch.id))]
    pub fn update_pet(&self, patch: PetPatch) -> DomainResult<Pet> {
        let now = self.clock.now();
        self.repository.try_mutate(|pets| {
            let slot = pets
                .iter_mut()
                .find(|p| p.pet_id() == patch.id)
                .ok_or(DomainError::NotFound)?;

            let merged = self.refresh(slot, now).apply_patch(&patch, now)?;
            *slot = merged.clone();
            Ok(merged)
        })
    }

    /// Remove a pet. Deleting a missing id is a no-op.
    #[instrument(skip(self), fields(pet_id = %id))]
    pub fn delete_pet(&self, id: PetId) {
        if self.repository.remove(id) {
            info!("pet deleted");
        } else {
            debug!("delete of unknown pet ignored");
        }
    }

    /// Remove every pet.
    #[instrument(skip(self))]
    pub fn delete_all_pets(&self) {
        if self.repository.clear() {
            info!("all pets deleted");
        }
    }

    /// Feed a pet once (+1 hunger).
    pub fn feed(&self, id: PetId) -> DomainResult<Pet> {
        self.interact(id, "feed", |pet, now| feed(pet, now))
    }

    /// Credit a completed mini-game.
    pub fn play(&self, id: PetId, game: MiniGame) -> DomainResult<Pet> {
        self.interact(id, "play", |pet, now| play(pet, game, now))
    }

    /// Put a pet to sleep for the configured duration.
    pub fn start_sleep(&self, id: PetId) -> DomainResult<Pet> {
        let duration = self.config.sleep_duration_secs;
        self.interact(id, "start_sleep", |pet, now| start_sleep(pet, now, duration))
    }

    /// Called by the presentation countdown when it reaches zero.
    ///
    /// Wakes the pet if its nap is over; otherwise returns it unchanged.
    /// Dead pets are rejected like every other interaction.
    pub fn wake_if_rested(&self, id: PetId) -> DomainResult<Pet> {
        self.interact(id, "wake", |pet, _now| {
            if pet.is_dead() {
                return Err(DomainError::PetDead);
            }
            Ok(pet.clone())
        })
    }

    #[instrument(skip(self, op), fields(pet_id = %id))]
    fn interact<F>(&self, id: PetId, action: &'static str, op: F) -> DomainResult<Pet>
    where
        F: FnOnce(&Pet, DateTime<Utc>) -> DomainResult<Pet>,
    {
        let now = self.clock.now();
        let result = self.repository.try_mutate(|pets| {
            let slot = pets
                .iter_mut()
                .find(|p| p.pet_id() == id)
                .ok_or(DomainError::NotFound)?;

            let next = op(&self.refresh(slot, now), now)?;
            *slot = next.clone();
            Ok(next)
        });

        match &result {
            Ok(pet) => debug!(status = %pet.status(), "{action} applied"),
            Err(e) => debug!(error = %e, "{action} rejected"),
        }
        result
    }
}
