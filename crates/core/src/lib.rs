//! # Gridwatch Core
//!
//! Domain engine for the gridwatch outage watcher. This crate turns raw
//! per-time-slot power-state samples into merged outage intervals, computes a
//! content fingerprint for a day's schedule, and decides across successive
//! polls whether a subscriber must be notified and with what framing.
//!
//! Everything in here is pure and synchronous; fetching, persistence and
//! delivery live in the `gridwatch-providers`, `gridwatch-db` and
//! `gridwatch-poller` crates.

/// Error taxonomy shared by the engine and its collaborators
pub mod errors;
/// Slot interval extraction from classified samples
pub mod extract;
/// Day schedule fingerprinting
pub mod fingerprint;
/// Domain model types
pub mod models;
/// Telegram-HTML schedule rendering
pub mod render;
/// Rollover state machine and notification decider
pub mod rollover;
