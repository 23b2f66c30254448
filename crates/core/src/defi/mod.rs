//! DeFi engine service.
//!
//! Orchestrates the overview fetch and the adapter fan-out, drives resets
//! across modules and serves the derived views.

mod defi_service;
mod defi_traits;
mod entitlement;
mod fetch;
mod reset;

pub use defi_service::*;
pub use defi_traits::*;
pub use entitlement::*;
pub use fetch::BALANCE_FETCH_PROTOCOLS;
pub use reset::HISTORY_RESET_PROTOCOLS;
