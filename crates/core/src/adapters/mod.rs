//! Collaborator contracts.
//!
//! Protocol adapters, the lending aggregation, the background task system and
//! the airdrop tracker live outside this crate. The engine only sees them
//! through the traits defined here, injected via `AdapterRegistry` and
//! `DefiServiceBuilder`.

mod adapters_model;
mod adapters_traits;
mod registry;

pub use adapters_model::*;
pub use adapters_traits::*;
pub use registry::*;
