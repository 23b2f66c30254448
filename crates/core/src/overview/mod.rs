//! DeFi overview module.
//!
//! Pure computations over an explicit snapshot of engine state: the
//! per-protocol summary list and the accounts taking part in each protocol.

mod accounts;
mod overview_model;
mod summary;

pub use accounts::*;
pub use overview_model::*;
pub use summary::*;

#[cfg(test)]
mod accounts_tests;
