use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::Result;
use crate::overview::{DefiAccount, DefiProtocolSummary};
use crate::protocols::{AllDefiProtocols, DefiProtocol, ModuleSelection};

/// Operations the engine exposes to its hosts.
#[async_trait]
pub trait DefiServiceTrait: Send + Sync {
    /// Current raw overview payload.
    fn all_protocols(&self) -> Arc<AllDefiProtocols>;

    /// Sorted, filtered per-protocol summaries.
    fn overview(&self) -> Vec<DefiProtocolSummary>;

    /// Accounts taking part in the filtered protocols. An empty filter
    /// selects every protocol.
    fn defi_accounts(&self, filter: &[DefiProtocol]) -> Vec<DefiAccount>;

    /// Fetches the overview payload. Failures are reported as notifications.
    async fn fetch_defi_balances(&self, refresh: bool);

    /// Fetches the overview payload, then every protocol adapter's balances.
    async fn fetch_all_defi(&self, refresh: bool);

    /// Recomputes lending history from scratch. Premium only.
    async fn reset_db(&self, protocols: &[DefiProtocol]) -> Result<()>;

    fn reset_state(&self, selection: ModuleSelection);

    /// Clears all DeFi state.
    fn reset(&self);
}
