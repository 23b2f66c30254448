//! Contracts the engine consumes from its collaborators.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::adapters_model::{
    HistoryRequest, LoanSummary, ProtocolHistory, TaskId, TaskMeta, TaskResult, TaskType,
};
use crate::errors::Result;
use crate::protocols::DefiProtocol;

/// A module that can be restored to its post-reset default state.
pub trait ResettableModule: Send + Sync {
    fn reset(&self);
}

/// Adapter owning one protocol's balance and history state.
#[async_trait]
pub trait ProtocolAdapter: ResettableModule {
    /// Fetches the protocol's balances, bypassing caches when `refresh` is set.
    async fn fetch_balances(&self, refresh: bool) -> Result<()>;

    /// Fetches the protocol's history.
    async fn fetch_history(&self, request: HistoryRequest) -> Result<()>;

    /// Addresses that currently hold a balance in the protocol.
    fn balance_addresses(&self) -> Vec<String>;

    /// Current history state.
    fn history(&self) -> ProtocolHistory;
}

/// Lending totals aggregated across adapters.
pub trait LendingAggregator: Send + Sync {
    /// Collateral and debt across `protocols` (all protocols when empty).
    fn loan_summary(&self, protocols: &[DefiProtocol]) -> LoanSummary;

    /// Deposits across `protocols`, limited to `addresses` unless empty.
    fn total_lending_deposit(&self, protocols: &[DefiProtocol], addresses: &[String]) -> Decimal;
}

/// Background task system: submit a job, then wait for its result.
#[async_trait]
pub trait TaskManager: Send + Sync {
    async fn submit(&self, task_type: TaskType) -> Result<TaskId>;

    async fn await_task(
        &self,
        task_id: TaskId,
        task_type: TaskType,
        meta: TaskMeta,
    ) -> Result<TaskResult>;
}

/// Airdrop tracking, cleared together with the DeFi state.
pub trait AirdropTracker: Send + Sync {
    fn reset(&self);
}

/// Airdrop tracker for hosts that do not track airdrops.
#[derive(Clone, Default)]
pub struct NoOpAirdropTracker;

impl AirdropTracker for NoOpAirdropTracker {
    fn reset(&self) {}
}
