use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use petcare_core::{DomainError, DomainResult, Entity, PetId, ValueObject};

use crate::decay::compute_status;

/// Lowest value a need can take.
pub const MIN_NEED: f64 = 0.0;

/// Highest value a need can take.
pub const MAX_NEED: f64 = 100.0;

/// Value of every need on a freshly created pet.
pub const INITIAL_NEED: f64 = 70.0;

/// Clamp a need into `[MIN_NEED, MAX_NEED]`. NaN collapses to the floor.
pub(crate) fn clamp_need(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_NEED;
    }
    value.clamp(MIN_NEED, MAX_NEED)
}

/// Overall well-being, derived from the sum of the three needs.
///
/// Variants are ordered from worst to best. Records saved by the mobile app
/// carry its display strings, accepted here as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PetStatus {
    #[serde(alias = "Morto")]
    Dead,
    #[serde(alias = "Crítico")]
    Critical,
    #[serde(alias = "Muito triste")]
    VerySad,
    #[serde(alias = "Triste")]
    Sad,
    #[serde(alias = "Ok")]
    Ok,
    #[serde(alias = "Bem")]
    Good,
    #[serde(alias = "Muito bem")]
    VeryGood,
}

impl PetStatus {
    /// Map a need score (sum of needs, `[0, 300]`) to a status.
    ///
    /// Thresholds are inclusive upper bounds. Anything outside the domain
    /// (including NaN) is treated as dead.
    pub fn from_score(score: f64) -> Self {
        if score <= 0.0 {
            Self::Dead
        } else if score <= 50.0 {
            Self::Critical
        } else if score <= 100.0 {
            Self::VerySad
        } else if score <= 150.0 {
            Self::Sad
        } else if score <= 200.0 {
            Self::Ok
        } else if score <= 250.0 {
            Self::Good
        } else if score <= 300.0 {
            Self::VeryGood
        } else {
            Self::Dead
        }
    }

    pub fn is_dead(self) -> bool {
        self == Self::Dead
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dead => "Dead",
            Self::Critical => "Critical",
            Self::VerySad => "Very sad",
            Self::Sad => "Sad",
            Self::Ok => "Ok",
            Self::Good => "Good",
            Self::VeryGood => "Very good",
        }
    }

    /// Icon name rendered next to the status (Material Community Icons set).
    pub fn icon(self) -> &'static str {
        match self {
            Self::Dead => "skull",
            Self::Critical => "alert",
            Self::VerySad => "emoticon-sad",
            Self::Sad => "emoticon-sad-outline",
            Self::Ok => "emoticon-neutral",
            Self::Good => "emoticon-happy",
            Self::VeryGood => "emoticon-excited",
        }
    }
}

impl core::fmt::Display for PetStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// The three needs of a pet, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Needs {
    pub fun: f64,
    pub sleep: f64,
    pub hunger: f64,
}

impl ValueObject for Needs {}

impl Needs {
    /// Build a clamped set of needs.
    pub fn new(fun: f64, sleep: f64, hunger: f64) -> Self {
        Self {
            fun: clamp_need(fun),
            sleep: clamp_need(sleep),
            hunger: clamp_need(hunger),
        }
    }

    pub fn initial() -> Self {
        Self::new(INITIAL_NEED, INITIAL_NEED, INITIAL_NEED)
    }

    pub fn zero() -> Self {
        Self::new(MIN_NEED, MIN_NEED, MIN_NEED)
    }

    /// Sum of the three needs, in `[0, 300]`.
    pub fn score(&self) -> f64 {
        self.fun + self.sleep + self.hunger
    }

    pub fn is_depleted(&self) -> bool {
        self.fun <= MIN_NEED && self.sleep <= MIN_NEED && self.hunger <= MIN_NEED
    }

    pub fn status(&self) -> PetStatus {
        compute_status(self.fun, self.sleep, self.hunger)
    }

    pub fn with_fun(self, fun: f64) -> Self {
        Self::new(fun, self.sleep, self.hunger)
    }

    pub fn with_sleep(self, sleep: f64) -> Self {
        Self::new(self.fun, sleep, self.hunger)
    }

    pub fn with_hunger(self, hunger: f64) -> Self {
        Self::new(self.fun, self.sleep, hunger)
    }

    /// Fraction of a full bar, `[0.0, 1.0]`, for progress indicators.
    pub fn progress(value: f64) -> f64 {
        clamp_need(value) / MAX_NEED
    }
}

/// An in-progress sleep interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepState {
    pub start_time: DateTime<Utc>,
    pub duration_seconds: u64,
    pub end_time: DateTime<Utc>,
}

impl ValueObject for SleepState {}

impl SleepState {
    pub fn starting_at(start_time: DateTime<Utc>, duration_seconds: u64) -> Self {
        let end_time = i64::try_from(duration_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|duration| start_time.checked_add_signed(duration))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            start_time,
            duration_seconds,
            end_time,
        }
    }

    pub fn is_over(&self, now: DateTime<Utc>) -> bool {
        now >= self.end_time
    }

    /// Time left before the pet wakes up; zero once the interval is over.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        if self.is_over(now) {
            Duration::zero()
        } else {
            self.end_time - now
        }
    }
}

/// A virtual pet.
///
/// `status` is always derived from the needs (or `Dead`); it cannot be set
/// directly. Fields are serialized in camelCase so stored blobs keep the same
/// shape as the mobile app's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub(crate) id: PetId,
    pub(crate) name: String,
    pub(crate) image_uri: String,
    #[serde(flatten)]
    pub(crate) needs: Needs,
    pub(crate) status: PetStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) sleep_state: Option<SleepState>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Pet {
    /// Create a brand-new pet.
    ///
    /// Name and image must be non-empty. Needs start at [`INITIAL_NEED`] and
    /// the status starts at `VeryGood`.
    pub fn create(
        id: PetId,
        name: impl Into<String>,
        image_uri: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let image_uri = image_uri.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if image_uri.trim().is_empty() {
            return Err(DomainError::validation("image cannot be empty"));
        }

        Ok(Self {
            id,
            name,
            image_uri,
            needs: Needs::initial(),
            status: PetStatus::VeryGood,
            sleep_state: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn pet_id(&self) -> PetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image_uri(&self) -> &str {
        &self.image_uri
    }

    pub fn needs(&self) -> Needs {
        self.needs
    }

    pub fn fun(&self) -> f64 {
        self.needs.fun
    }

    pub fn sleep(&self) -> f64 {
        self.needs.sleep
    }

    pub fn hunger(&self) -> f64 {
        self.needs.hunger
    }

    pub fn status(&self) -> PetStatus {
        self.status
    }

    pub fn sleep_state(&self) -> Option<&SleepState> {
        self.sleep_state.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_dead(&self) -> bool {
        self.status.is_dead()
    }

    pub fn is_asleep(&self) -> bool {
        self.sleep_state.is_some()
    }

    /// Replace the needs and re-derive the status.
    pub(crate) fn set_needs(&mut self, needs: Needs) {
        self.needs = needs;
        self.status = if needs.is_depleted() {
            PetStatus::Dead
        } else {
            needs.status()
        };
    }

    /// Advance `updated_at` to `now`, never backwards.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    /// Merge a patch onto this pet.
    ///
    /// Present fields overwrite stored ones; needs are clamped and the status
    /// is re-derived from the merged needs. Dead pets cannot be patched.
    pub fn apply_patch(&self, patch: &PetPatch, now: DateTime<Utc>) -> DomainResult<Self> {
        if patch.id != self.id {
            return Err(DomainError::not_found());
        }
        if self.is_dead() {
            return Err(DomainError::PetDead);
        }

        let mut next = self.clone();
        let needs = Needs::new(
            patch.fun.unwrap_or(self.needs.fun),
            patch.sleep.unwrap_or(self.needs.sleep),
            patch.hunger.unwrap_or(self.needs.hunger),
        );
        next.set_needs(needs);
        if let Some(sleep_state) = &patch.sleep_state {
            next.sleep_state = sleep_state.clone();
        }
        next.touch(now);
        Ok(next)
    }
}

impl Entity for Pet {
    type Id = PetId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Field-level update of a stored pet.
///
/// `None` keeps the stored value. For `sleep_state`, `Some(None)` clears the
/// sleep interval. Identity, name, image and timestamps are not patchable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PetPatch {
    pub id: PetId,
    pub fun: Option<f64>,
    pub sleep: Option<f64>,
    pub hunger: Option<f64>,
    pub sleep_state: Option<Option<SleepState>>,
}

impl PetPatch {
    pub fn new(id: PetId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn fun(mut self, fun: f64) -> Self {
        self.fun = Some(fun);
        self
    }

    pub fn sleep(mut self, sleep: f64) -> Self {
        self.sleep = Some(sleep);
        self
    }

    pub fn hunger(mut self, hunger: f64) -> Self {
        self.hunger = Some(hunger);
        self
    }

    pub fn sleep_state(mut self, sleep_state: Option<SleepState>) -> Self {
        self.sleep_state = Some(sleep_state);
        self
    }
}
