use async_trait::async_trait;
use std::collections::HashMap;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

use super::defi_traits::DefiServiceTrait;
use super::entitlement::PremiumEntitlement;
use crate::adapters::{
    AdapterRegistry, AirdropTracker, LendingAggregator, NoOpAirdropTracker, TaskManager,
};
use crate::errors::{Result, ValidationError};
use crate::events::{DefiEvent, EventBus};
use crate::notifications::{EnglishTranslator, LogNotifier, Notifier, Translator};
use crate::overview::{
    derive_defi_accounts, protocol_addresses, DefiAccount, DefiProtocolSummary, OverviewSnapshot,
    SummaryAggregator, ACCOUNT_PROTOCOLS,
};
use crate::protocols::{AllDefiProtocols, DefiProtocol, ModuleSelection};
use crate::status::{Section, Status, StatusTracker};

/// The DeFi overview engine.
///
/// Owns the raw overview payload and the section statuses; everything else
/// is reached through injected collaborators.
pub struct DefiService {
    pub(super) registry: AdapterRegistry,
    pub(super) lending: Arc<dyn LendingAggregator>,
    pub(super) task_manager: Arc<dyn TaskManager>,
    pub(super) notifier: Arc<dyn Notifier>,
    pub(super) translator: Arc<dyn Translator>,
    pub(super) airdrops: Arc<dyn AirdropTracker>,
    pub(super) status: StatusTracker,
    pub(super) events: EventBus,
    pub(super) all_protocols: RwLock<Arc<AllDefiProtocols>>,
    /// Bumped by every full reset.
    pub(super) generation: AtomicU64,
    pub(super) entitlement: PremiumEntitlement,
}

impl DefiService {
    pub fn builder() -> DefiServiceBuilder {
        DefiServiceBuilder::new()
    }

    pub fn status(&self, section: Section) -> Status {
        self.status.get(section)
    }

    pub fn entitlement(&self) -> &PremiumEntitlement {
        &self.entitlement
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DefiEvent> {
        self.events.subscribe()
    }

    /// Copies the inputs of the overview computation.
    pub fn snapshot(&self) -> OverviewSnapshot {
        OverviewSnapshot {
            protocols: self.current_protocols(),
            statuses: self.status.snapshot(),
        }
    }

    /// Computes the overview for an explicit snapshot.
    pub fn recompute_overview(&self, snapshot: &OverviewSnapshot) -> Vec<DefiProtocolSummary> {
        SummaryAggregator::new(self.lending.as_ref(), self.translator.as_ref()).overview(snapshot)
    }

    pub(super) fn current_protocols(&self) -> Arc<AllDefiProtocols> {
        self.all_protocols
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(super) fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Stores a payload fetched during `generation`.
    ///
    /// The payload is dropped when a reset happened after the fetch started.
    pub(super) fn replace_protocols(&self, protocols: AllDefiProtocols, generation: u64) {
        let address_count = protocols.len();
        {
            let mut all_protocols = self
                .all_protocols
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if self.generation() != generation {
                debug!(
                    "Discarding payload for {} addresses fetched before a reset",
                    address_count
                );
                return;
            }
            *all_protocols = Arc::new(protocols);
        }
        self.events
            .publish(DefiEvent::protocols_replaced(address_count));
    }

    /// Addresses per account protocol, for the registered adapters.
    fn addresses_by_protocol(&self) -> HashMap<DefiProtocol, Vec<String>> {
        ACCOUNT_PROTOCOLS
            .into_iter()
            .filter_map(|protocol| {
                let adapter = self.registry.adapter(protocol)?;
                let addresses =
                    protocol_addresses(&adapter.balance_addresses(), &adapter.history());
                Some((protocol, addresses))
            })
            .collect()
    }
}

#[async_trait]
impl DefiServiceTrait for DefiService {
    fn all_protocols(&self) -> Arc<AllDefiProtocols> {
        self.current_protocols()
    }

    fn overview(&self) -> Vec<DefiProtocolSummary> {
        self.recompute_overview(&self.snapshot())
    }

    fn defi_accounts(&self, filter: &[DefiProtocol]) -> Vec<DefiAccount> {
        derive_defi_accounts(&self.addresses_by_protocol(), filter)
    }

    async fn fetch_defi_balances(&self, refresh: bool) {
        self.run_fetch_defi_balances(refresh).await
    }

    async fn fetch_all_defi(&self, refresh: bool) {
        self.run_fetch_all_defi(refresh).await
    }

    async fn reset_db(&self, protocols: &[DefiProtocol]) -> Result<()> {
        self.run_reset_db(protocols).await
    }

    fn reset_state(&self, selection: ModuleSelection) {
        self.reset_modules(selection)
    }

    fn reset(&self) {
        self.reset_all()
    }
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for creating a DefiService.
pub struct DefiServiceBuilder {
    registry: AdapterRegistry,
    lending: Option<Arc<dyn LendingAggregator>>,
    task_manager: Option<Arc<dyn TaskManager>>,
    notifier: Option<Arc<dyn Notifier>>,
    translator: Option<Arc<dyn Translator>>,
    airdrops: Option<Arc<dyn AirdropTracker>>,
    events: Option<EventBus>,
    premium: bool,
}

impl DefiServiceBuilder {
    pub fn new() -> Self {
        Self {
            registry: AdapterRegistry::new(),
            lending: None,
            task_manager: None,
            notifier: None,
            translator: None,
            airdrops: None,
            events: None,
            premium: false,
        }
    }

    pub fn with_registry(mut self, registry: AdapterRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_lending(mut self, lending: Arc<dyn LendingAggregator>) -> Self {
        self.lending = Some(lending);
        self
    }

    pub fn with_task_manager(mut self, task_manager: Arc<dyn TaskManager>) -> Self {
        self.task_manager = Some(task_manager);
        self
    }

    /// Set the notifier. Defaults to logging notifications.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Set the translator. Defaults to English strings.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_airdrops(mut self, airdrops: Arc<dyn AirdropTracker>) -> Self {
        self.airdrops = Some(airdrops);
        self
    }

    /// Share an existing event bus instead of creating one.
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Initial premium entitlement.
    pub fn with_premium(mut self, premium: bool) -> Self {
        self.premium = premium;
        self
    }

    /// Build the service.
    pub fn build(self) -> Result<DefiService> {
        let lending = self
            .lending
            .ok_or_else(|| ValidationError::MissingField("lending aggregator".to_string()))?;
        let task_manager = self
            .task_manager
            .ok_or_else(|| ValidationError::MissingField("task manager".to_string()))?;
        let events = self.events.unwrap_or_default();

        Ok(DefiService {
            registry: self.registry,
            lending,
            task_manager,
            notifier: self.notifier.unwrap_or_else(|| Arc::new(LogNotifier)),
            translator: self
                .translator
                .unwrap_or_else(|| Arc::new(EnglishTranslator)),
            airdrops: self
                .airdrops
                .unwrap_or_else(|| Arc::new(NoOpAirdropTracker)),
            status: StatusTracker::new(events.clone()),
            events,
            all_protocols: RwLock::new(Arc::new(AllDefiProtocols::new())),
            generation: AtomicU64::new(0),
            entitlement: PremiumEntitlement::new(self.premium),
        })
    }
}

impl Default for DefiServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
