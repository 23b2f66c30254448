//! Protocol identifiers and raw balance models.

pub mod decimal_serde;
mod protocol_ids;
mod protocols_model;

pub use protocol_ids::*;
pub use protocols_model::*;
