//! Sleep sub-state machine.
//!
//! ```text
//!   Awake ──start_sleep──▶ Asleep ──wake (now ≥ end_time)──▶ Awake (+10 sleep)
//! ```
//!
//! There is no timer on this side: the presentation layer polls the countdown
//! (see [`Pet::sleep_remaining`]) and asks for the wake transition once it
//! reaches zero. Reads also wake the pet lazily.

use chrono::{DateTime, Duration, Utc};

use petcare_core::{DomainError, DomainResult};

use crate::pet::{Pet, SleepState};

/// Default length of a nap.
pub const DEFAULT_SLEEP_DURATION_SECS: u64 = 60;

/// Sleep gained when a nap completes.
pub const WAKE_SLEEP_BONUS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepPhase {
    Awake,
    Asleep,
}

impl Pet {
    pub fn sleep_phase(&self) -> SleepPhase {
        if self.is_asleep() {
            SleepPhase::Asleep
        } else {
            SleepPhase::Awake
        }
    }

    /// Countdown for the current nap, `None` when awake.
    pub fn sleep_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.sleep_state.as_ref().map(|s| s.remaining(now))
    }
}

/// Put the pet to sleep for `duration_secs`.
pub fn start_sleep(pet: &Pet, now: DateTime<Utc>, duration_secs: u64) -> DomainResult<Pet> {
    if pet.is_dead() {
        return Err(DomainError::PetDead);
    }
    if pet.is_asleep() {
        return Err(DomainError::PetAsleep);
    }

    let mut next = pet.clone();
    next.sleep_state = Some(SleepState::starting_at(now, duration_secs));
    next.touch(now);
    Ok(next)
}

/// Wake the pet if its nap is over.
///
/// Returns the pet unchanged when it is awake, dead, or still has time left.
pub fn wake(pet: &Pet, now: DateTime<Utc>) -> Pet {
    let Some(state) = pet.sleep_state.as_ref() else {
        return pet.clone();
    };
    if pet.is_dead() || !state.is_over(now) {
        return pet.clone();
    }

    let mut next = pet.clone();
    let needs = next.needs.with_sleep(next.needs.sleep + WAKE_SLEEP_BONUS);
    next.set_needs(needs);
    next.sleep_state = None;
    next.touch(now);
    next
}
