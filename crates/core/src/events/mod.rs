//! Engine events module.
//!
//! The engine publishes a `DefiEvent` after every state mutation so that
//! presentation consumers know when to recompute the overview.

mod bus;
mod defi_event;

pub use bus::*;
pub use defi_event::*;
