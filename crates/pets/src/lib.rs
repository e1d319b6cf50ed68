//! Pets domain module (virtual-pet lifecycle).
//!
//! This crate contains the game rules for pets: need decay over time, status
//! derivation, the sleep sub-state machine and the reward/feeding interactions.
//! Everything here is deterministic domain logic (no IO, no storage, no clock):
//! callers pass `now` explicitly.

pub mod decay;
pub mod interaction;
pub mod pet;
pub mod sleep;

pub use decay::{DEFAULT_DECAY_PER_HOUR, apply_time_decay, apply_time_decay_at_rate, compute_status};
pub use interaction::{FEED_HUNGER_GAIN, MiniGame, feed, play};
pub use pet::{INITIAL_NEED, MAX_NEED, MIN_NEED, Needs, Pet, PetPatch, PetStatus, SleepState};
pub use sleep::{DEFAULT_SLEEP_DURATION_SECS, SleepPhase, WAKE_SLEEP_BONUS, start_sleep, wake};
