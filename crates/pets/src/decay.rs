//! Time-based need decay and status derivation.
//!
//! Decay is lazy: nothing ticks in the background. Whenever a pet is read or
//! mutated, the caller brings it forward to `now` with [`apply_time_decay`],
//! using `updated_at` as the baseline.

use chrono::{DateTime, Utc};

use crate::pet::{Needs, Pet, PetStatus};

/// Units lost by every need per elapsed hour.
pub const DEFAULT_DECAY_PER_HOUR: f64 = 1.0;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Derive the status from the three needs.
pub fn compute_status(fun: f64, sleep: f64, hunger: f64) -> PetStatus {
    PetStatus::from_score(fun + sleep + hunger)
}

/// Hours elapsed between `from` and `to`; a clock regression counts as zero.
pub fn elapsed_hours(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let millis = (to - from).num_milliseconds();
    if millis <= 0 {
        0.0
    } else {
        millis as f64 / MILLIS_PER_HOUR
    }
}

/// Bring a pet forward to `now` at the default rate.
pub fn apply_time_decay(pet: &Pet, now: DateTime<Utc>) -> Pet {
    apply_time_decay_at_rate(pet, now, DEFAULT_DECAY_PER_HOUR)
}

/// Bring a pet forward to `now`, losing `rate_per_hour` units per need per hour.
///
/// Each need loses `min(elapsed * rate, value)`. When all three hit zero the
/// pet dies; a dead pet is returned unchanged. A negative or NaN rate decays
/// nothing.
pub fn apply_time_decay_at_rate(pet: &Pet, now: DateTime<Utc>, rate_per_hour: f64) -> Pet {
    if pet.is_dead() {
        return pet.clone();
    }

    let amount = (elapsed_hours(pet.updated_at, now) * rate_per_hour).max(0.0);
    let decay = |value: f64| value - amount.min(value);

    let current = pet.needs;
    let needs = Needs::new(decay(current.fun), decay(current.sleep), decay(current.hunger));

    let mut next = pet.clone();
    next.set_needs(needs);
    next.touch(now);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use petcare_core::PetId;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn test_pet(now: DateTime<Utc>) -> Pet {
        Pet::create(PetId::new(), "Rex", "uri://x", now).unwrap()
    }

    fn pet_with_needs(now: DateTime<Utc>, fun: f64, sleep: f64, hunger: f64) -> Pet {
        let mut pet = test_pet(now);
        pet.set_needs(Needs::new(fun, sleep, hunger));
        pet
    }

    #[test]
    fn status_boundaries_are_exact() {
        assert_eq!(PetStatus::from_score(0.0), PetStatus::Dead);
        assert_eq!(PetStatus::from_score(0.5), PetStatus::Critical);
        assert_eq!(PetStatus::from_score(50.0), PetStatus::Critical);
        assert_eq!(PetStatus::from_score(51.0), PetStatus::VerySad);
        assert_eq!(PetStatus::from_score(100.0), PetStatus::VerySad);
        assert_eq!(PetStatus::from_score(150.0), PetStatus::Sad);
        assert_eq!(PetStatus::from_score(200.0), PetStatus::Ok);
        assert_eq!(PetStatus::from_score(250.0), PetStatus::Good);
        assert_eq!(PetStatus::from_score(251.0), PetStatus::VeryGood);
        assert_eq!(PetStatus::from_score(300.0), PetStatus::VeryGood);
    }

    #[test]
    fn out_of_domain_scores_fall_back_to_dead() {
        assert_eq!(PetStatus::from_score(300.5), PetStatus::Dead);
        assert_eq!(PetStatus::from_score(-1.0), PetStatus::Dead);
        assert_eq!(PetStatus::from_score(f64::NAN), PetStatus::Dead);
    }

    #[test]
    fn compute_status_sums_needs() {
        assert_eq!(compute_status(60.0, 60.0, 60.0), PetStatus::Ok);
        assert_eq!(compute_status(70.0, 70.0, 70.0), PetStatus::Good);
        assert_eq!(compute_status(100.0, 100.0, 100.0), PetStatus::VeryGood);
        assert_eq!(compute_status(0.0, 0.0, 0.0), PetStatus::Dead);
    }

    #[test]
    fn ten_hours_takes_ten_from_every_need() {
        let start = test_time();
        let pet = test_pet(start);
        let now = start + Duration::hours(10);

        let decayed = apply_time_decay(&pet, now);
        assert_eq!(decayed.fun(), 60.0);
        assert_eq!(decayed.sleep(), 60.0);
        assert_eq!(decayed.hunger(), 60.0);
        assert_eq!(decayed.status(), PetStatus::Ok);
        assert_eq!(decayed.updated_at(), now);
    }

    #[test]
    fn needs_are_floored_independently() {
        let start = test_time();
        let pet = pet_with_needs(start, 5.0, 40.0, 90.0);

        let decayed = apply_time_decay(&pet, start + Duration::hours(20));
        assert_eq!(decayed.fun(), 0.0);
        assert_eq!(decayed.sleep(), 20.0);
        assert_eq!(decayed.hunger(), 70.0);
        assert_eq!(decayed.status(), PetStatus::VerySad);
    }

    #[test]
    fn fractional_hours_decay_proportionally() {
        let start = test_time();
        let pet = test_pet(start);

        let decayed = apply_time_decay(&pet, start + Duration::minutes(30));
        assert_eq!(decayed.fun(), 69.5);
    }

    #[test]
    fn clock_regression_applies_no_decay() {
        let start = test_time();
        let pet = test_pet(start);

        let decayed = apply_time_decay(&pet, start - Duration::hours(5));
        assert_eq!(decayed.needs(), pet.needs());
        assert_eq!(decayed.updated_at(), start);
    }

    #[test]
    fn second_call_with_same_now_is_a_no_op() {
        let start = test_time();
        let pet = test_pet(start);
        let now = start + Duration::hours(3);

        let once = apply_time_decay(&pet, now);
        let twice = apply_time_decay(&once, now);
        assert_eq!(once, twice);
    }

    #[test]
    fn all_needs_exhausted_kills_the_pet() {
        let start = test_time();
        let pet = test_pet(start);

        let decayed = apply_time_decay(&pet, start + Duration::hours(500));
        assert_eq!(decayed.needs(), Needs::zero());
        assert_eq!(decayed.status(), PetStatus::Dead);
    }

    #[test]
    fn death_is_terminal() {
        let start = test_time();
        let dead = apply_time_decay(&test_pet(start), start + Duration::hours(100));
        assert!(dead.is_dead());

        let later = apply_time_decay(&dead, start + Duration::hours(200));
        assert_eq!(later, dead);
    }

    #[test]
    fn custom_rate_scales_decay() {
        let start = test_time();
        let pet = test_pet(start);

        let fast = apply_time_decay_at_rate(&pet, start + Duration::hours(2), 5.0);
        assert_eq!(fast.fun(), 60.0);

        let frozen = apply_time_decay_at_rate(&pet, start + Duration::hours(2), -3.0);
        assert_eq!(frozen.needs(), pet.needs());
    }

    #[test]
    fn status_is_recomputed_even_without_elapsed_time() {
        let start = test_time();
        let pet = test_pet(start);
        assert_eq!(pet.status(), PetStatus::VeryGood);

        let refreshed = apply_time_decay(&pet, start);
        assert_eq!(refreshed.status(), PetStatus::Good);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: decayed value is max(0, n - hours) for every need.
            #[test]
            fn decay_is_linear_with_floor(
                fun in 0.0f64..=100.0,
                sleep in 0.0f64..=100.0,
                hunger in 0.0f64..=100.0,
                minutes in 0i64..=20_000,
            ) {
                let start = test_time();
                let pet = pet_with_needs(start, fun, sleep, hunger);
                let hours = minutes as f64 / 60.0;

                let decayed = apply_time_decay(&pet, start + Duration::minutes(minutes));

                let expected = |n: f64| (n - hours).max(0.0);
                prop_assert!((decayed.fun() - expected(fun)).abs() < 1e-9);
                prop_assert!((decayed.sleep() - expected(sleep)).abs() < 1e-9);
                prop_assert!((decayed.hunger() - expected(hunger)).abs() < 1e-9);
            }

            /// Property: status never improves as the score goes down.
            #[test]
            fn status_is_monotonic_in_score(a in 0.0f64..=300.0, b in 0.0f64..=300.0) {
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(PetStatus::from_score(lo) <= PetStatus::from_score(hi));
            }

            /// Property: needs stay in [0, 100] and updated_at never moves backward.
            #[test]
            fn decay_preserves_invariants(
                fun in 0.0f64..=100.0,
                sleep in 0.0f64..=100.0,
                hunger in 0.0f64..=100.0,
                offset_minutes in -10_000i64..=10_000,
            ) {
                let start = test_time();
                let pet = pet_with_needs(start, fun, sleep, hunger);

                let decayed = apply_time_decay(&pet, start + Duration::minutes(offset_minutes));

                for value in [decayed.fun(), decayed.sleep(), decayed.hunger()] {
                    prop_assert!((0.0..=100.0).contains(&value));
                }
                prop_assert!(decayed.updated_at() >= pet.updated_at());
            }
        }
    }
}
