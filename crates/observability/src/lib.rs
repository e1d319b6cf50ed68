//! Structured JSON logging for the pet engine.
//!
//! The lifecycle service and repository emit `tracing` events (pet created,
//! refreshed, storage failures); this crate installs the subscriber that
//! prints them, filtered by `RUST_LOG`.

/// Install the JSON subscriber with the default `info` filter.
///
/// Tests and embedding apps may call this repeatedly; only the first call
/// installs anything.
pub fn init() {
    tracing::init();
}

/// Subscriber construction and filter defaults.
pub mod tracing;
