//! Serialization point for every refresh of the display.
//!
//! # Request tickets
//!
//! Each refresh request draws a ticket from a monotonically increasing
//! counter before queueing for the state lock. A refresh that runs records the
//! highest ticket issued at the moment it started; any request holding a ticket
//! at or below that mark has been served by it and returns
//! [`RefreshOutcome::Coalesced`] without probing or navigating. Requests queued
//! behind an in-flight refresh therefore collapse into a single follow-up.
//!
//! ```text
//! ticket 1 ──run──────────────┐
//! ticket 2 ──wait─────────────┴─run (covers 2..=4)─┐
//! ticket 3 ──wait──────────────────────────────────┴─coalesced
//! ticket 4 ──wait──────────────────────────────────── coalesced
//! ```

pub mod refresh;
pub mod state;
pub mod types;

pub use refresh::{CoordinatorSettings, RefreshCoordinator};
pub use state::ControllerState;
pub use types::{RefreshOutcome, RefreshReason};
