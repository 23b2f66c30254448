//! Collaborators backed by a JSON snapshot file.
//!
//! The fixture holds the raw overview payload returned by the balances task
//! and, per protocol, the addresses and lending totals its adapter reports.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Context;
use defi_overview_core::adapters::{
    AdapterRegistry, HistoryRequest, LendingAggregator, LoanSummary, ProtocolAdapter,
    ProtocolHistory, ResettableModule, TaskId, TaskManager, TaskMeta, TaskResult, TaskType,
};
use defi_overview_core::errors::Result;
use defi_overview_core::protocols::{DefiProtocol, Module};
use defi_overview_core::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    /// Raw overview payload, address -> balance entries.
    pub overview: serde_json::Value,
    #[serde(default)]
    pub protocols: HashMap<DefiProtocol, ProtocolFixture>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProtocolFixture {
    pub balances: Vec<String>,
    pub history: Vec<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub collateral_usd: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub debt_usd: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub deposits_usd: Decimal,
    /// Error message returned by every balances fetch.
    pub fail_with: Option<String>,
}

impl Fixture {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fixture {}", path.display()))
    }

    /// Registers an adapter for every protocol in the fixture, plus reset-only
    /// exchange modules.
    pub fn registry(&self) -> AdapterRegistry {
        let registry = self
            .protocols
            .iter()
            .fold(AdapterRegistry::new(), |registry, (protocol, fixture)| {
                registry.with_protocol(
                    *protocol,
                    Arc::new(FixtureAdapter::new(*protocol, fixture.clone())),
                )
            });
        Module::DECENTRALIZED_EXCHANGES
            .into_iter()
            .fold(registry, |registry, module| {
                registry.with_module(module, Arc::new(ExchangeModule { module }))
            })
    }
}

/// Task manager that answers every balances task with the fixture payload.
pub struct FixtureTaskManager {
    payload: serde_json::Value,
    next_id: AtomicU64,
}

impl FixtureTaskManager {
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            payload,
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl TaskManager for FixtureTaskManager {
    async fn submit(&self, task_type: TaskType) -> Result<TaskId> {
        let task_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("Accepted {} task {}", task_type, task_id);
        Ok(task_id)
    }

    async fn await_task(
        &self,
        task_id: TaskId,
        task_type: TaskType,
        meta: TaskMeta,
    ) -> Result<TaskResult> {
        tracing::info!("{} (task {}, {})", meta.title, task_id, task_type);
        Ok(TaskResult {
            result: Some(self.payload.clone()),
            message: None,
        })
    }
}

/// Adapter exposing its fixture data once balances have been fetched.
pub struct FixtureAdapter {
    protocol: DefiProtocol,
    fixture: ProtocolFixture,
    loaded: AtomicBool,
}

impl FixtureAdapter {
    pub fn new(protocol: DefiProtocol, fixture: ProtocolFixture) -> Self {
        Self {
            protocol,
            fixture,
            loaded: AtomicBool::new(false),
        }
    }

    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }
}

impl ResettableModule for FixtureAdapter {
    fn reset(&self) {
        self.loaded.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProtocolAdapter for FixtureAdapter {
    async fn fetch_balances(&self, _refresh: bool) -> Result<()> {
        if let Some(message) = &self.fixture.fail_with {
            return Err(Error::adapter(self.protocol, message.clone()));
        }
        self.loaded.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn fetch_history(&self, request: HistoryRequest) -> Result<()> {
        tracing::debug!(
            "{} history requested (refresh: {}, reset: {})",
            self.protocol,
            request.refresh,
            request.reset
        );
        Ok(())
    }

    fn balance_addresses(&self) -> Vec<String> {
        if self.is_loaded() {
            self.fixture.balances.clone()
        } else {
            Vec::new()
        }
    }

    fn history(&self) -> ProtocolHistory {
        if self.is_loaded() {
            ProtocolHistory::Keyed(self.fixture.history.clone())
        } else {
            ProtocolHistory::default()
        }
    }
}

/// Exchange module that only supports reset.
pub struct ExchangeModule {
    module: Module,
}

impl ResettableModule for ExchangeModule {
    fn reset(&self) {
        tracing::debug!("{} state cleared", self.module);
    }
}

/// Lending totals read from the fixture.
pub struct FixtureLending {
    protocols: HashMap<DefiProtocol, ProtocolFixture>,
}

impl FixtureLending {
    pub fn new(protocols: HashMap<DefiProtocol, ProtocolFixture>) -> Self {
        Self { protocols }
    }

    fn selected<'a>(
        &'a self,
        filter: &'a [DefiProtocol],
    ) -> impl Iterator<Item = &'a ProtocolFixture> + 'a {
        self.protocols
            .iter()
            .filter(move |(protocol, _)| filter.is_empty() || filter.contains(protocol))
            .map(|(_, fixture)| fixture)
    }
}

impl LendingAggregator for FixtureLending {
    fn loan_summary(&self, protocols: &[DefiProtocol]) -> LoanSummary {
        self.selected(protocols)
            .fold(LoanSummary::default(), |summary, fixture| LoanSummary {
                total_collateral_usd: summary.total_collateral_usd + fixture.collateral_usd,
                total_debt: summary.total_debt + fixture.debt_usd,
            })
    }

    fn total_lending_deposit(&self, protocols: &[DefiProtocol], addresses: &[String]) -> Decimal {
        self.selected(protocols)
            .filter(|fixture| {
                addresses.is_empty()
                    || fixture.balances.iter().any(|address| addresses.contains(address))
            })
            .map(|fixture| fixture.deposits_usd)
            .sum()
    }
}
