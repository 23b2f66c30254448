//! DeFi Overview Core - Aggregation and orchestration engine.
//!
//! This crate folds per-protocol balance data into a unified overview and
//! coordinates fetches and resets across protocol adapters. Adapters, the
//! task system, notifications and translations are collaborators consumed
//! through the traits in `adapters` and `notifications`.

pub mod adapters;
pub mod constants;
pub mod defi;
pub mod errors;
pub mod events;
pub mod notifications;
pub mod overview;
pub mod protocols;
pub mod status;

// Re-export the service entry points
pub use defi::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
