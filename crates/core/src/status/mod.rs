//! Loading status module.
//!
//! Every fetch the engine runs is scoped to a `Section`. The `StatusTracker`
//! records where each section is in its lifecycle and hands out guards that
//! keep two fetches for the same section from running at once.

mod status_model;
mod status_tracker;

pub use status_model::*;
pub use status_tracker::*;
