//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, game-rule failures (validation,
/// missing pets, forbidden interactions). Storage failures belong elsewhere
/// and never surface through this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty pet name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No pet with the requested id is stored.
    #[error("not found")]
    NotFound,

    /// The pet is asleep and cannot be fed or played with.
    #[error("pet is asleep")]
    PetAsleep,

    /// The pet is dead; only deletion is allowed.
    #[error("pet is dead")]
    PetDead,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
