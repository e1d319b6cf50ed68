//! Need-increasing interactions: feeding and mini-game rewards.
//!
//! Interactions do not decay the pet themselves; bring it forward to `now`
//! first so elapsed time is not lost.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use petcare_core::{DomainError, DomainResult};

use crate::pet::Pet;

/// Hunger restored by one feeding.
pub const FEED_HUNGER_GAIN: f64 = 1.0;

/// Mini-games that reward the pet with fun on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiniGame {
    /// Matching-pairs card game.
    MemoryMatch,
    /// Choice-based game.
    RockPaperScissors,
}

impl MiniGame {
    /// Fun gained on completion.
    pub fn reward(self) -> f64 {
        match self {
            MiniGame::MemoryMatch => 30.0,
            MiniGame::RockPaperScissors => 20.0,
        }
    }
}

fn ensure_can_interact(pet: &Pet) -> DomainResult<()> {
    if pet.is_dead() {
        return Err(DomainError::PetDead);
    }
    if pet.is_asleep() {
        return Err(DomainError::PetAsleep);
    }
    Ok(())
}

/// Feed the pet once.
pub fn feed(pet: &Pet, now: DateTime<Utc>) -> DomainResult<Pet> {
    ensure_can_interact(pet)?;

    let mut next = pet.clone();
    let needs = next.needs.with_hunger(next.needs.hunger + FEED_HUNGER_GAIN);
    next.set_needs(needs);
    next.touch(now);
    Ok(next)
}

/// Reward the pet for a completed mini-game.
pub fn play(pet: &Pet, game: MiniGame, now: DateTime<Utc>) -> DomainResult<Pet> {
    ensure_can_interact(pet)?;

    let mut next = pet.clone();
    let needs = next.needs.with_fun(next.needs.fun + game.reward());
    next.set_needs(needs);
    next.touch(now);
    Ok(next)
}
