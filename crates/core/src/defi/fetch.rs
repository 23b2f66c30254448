//! Overview and adapter balance fetching.

use futures::future::join_all;
use log::{debug, error, info};
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::defi_service::DefiService;
use crate::adapters::{ProtocolAdapter, TaskMeta, TaskType};
use crate::constants::{
    BALANCES_ERROR_MESSAGE_KEY, BALANCES_ERROR_TITLE_KEY, BALANCES_TASK_TITLE_KEY,
    PROTOCOL_ERROR_MESSAGE_KEY, PROTOCOL_ERROR_TITLE_KEY,
};
use crate::errors::{Result, TaskError};
use crate::notifications::Notification;
use crate::protocols::{parse_all_defi_protocols, DefiProtocol};
use crate::status::{Section, Status};

/// Adapters whose balances are fetched by `fetch_all_defi`, in launch order.
pub const BALANCE_FETCH_PROTOCOLS: [DefiProtocol; 7] = [
    DefiProtocol::Aave,
    DefiProtocol::MakerdaoDsr,
    DefiProtocol::MakerdaoVaults,
    DefiProtocol::Compound,
    DefiProtocol::YearnVaults,
    DefiProtocol::YearnVaultsV2,
    DefiProtocol::Liquity,
];

impl DefiService {
    pub(super) async fn run_fetch_defi_balances(&self, refresh: bool) {
        let Some(_guard) = self.status.try_begin(Section::DefiBalances, refresh) else {
            return;
        };

        if let Err(err) = self.load_all_protocols().await {
            error!("Failed to fetch the DeFi balances: {}", err);
            let message = err.to_string();
            self.notifier.notify(Notification::error(
                self.translator.translate(BALANCES_ERROR_TITLE_KEY, &[]),
                self.translator
                    .translate(BALANCES_ERROR_MESSAGE_KEY, &[("message", message.as_str())]),
            ));
        }
    }

    pub(super) async fn run_fetch_all_defi(&self, refresh: bool) {
        let Some(guard) = self.status.try_begin(Section::DefiOverview, refresh) else {
            return;
        };

        self.run_fetch_defi_balances(refresh).await;
        guard.advance(Status::PartiallyLoaded);

        let fetches = BALANCE_FETCH_PROTOCOLS
            .into_iter()
            .filter_map(|protocol| {
                let adapter = self.registry.adapter(protocol);
                if adapter.is_none() {
                    debug!("No adapter registered for {}, skipping balances", protocol);
                }
                adapter.map(|adapter| self.fetch_adapter_balances(protocol, adapter, refresh))
            });
        join_all(fetches).await;
        info!("DeFi overview fetch finished (refresh: {})", refresh);
    }

    /// Runs `fetch_all_defi` on the runtime, detached from the caller.
    ///
    /// Dropping the returned handle does not stop the run.
    pub fn spawn_fetch_all_defi(self: &Arc<Self>, refresh: bool) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.run_fetch_all_defi(refresh).await })
    }

    /// Submits the overview task and replaces the raw payload with its result.
    async fn load_all_protocols(&self) -> Result<()> {
        let generation = self.generation();
        let task_type = TaskType::DefiBalances;
        let task_id = self.task_manager.submit(task_type).await?;
        debug!("Submitted {} task {}", task_type, task_id);

        let meta = TaskMeta {
            title: self.translator.translate(BALANCES_TASK_TITLE_KEY, &[]),
        };
        let outcome = self
            .task_manager
            .await_task(task_id, task_type, meta)
            .await?;
        let payload = match (outcome.result, outcome.message) {
            (Some(payload), _) => payload,
            (None, Some(message)) => {
                return Err(TaskError::Failed {
                    task_id,
                    kind: task_type.to_string(),
                    message,
                }
                .into())
            }
            (None, None) => {
                return Err(TaskError::MissingResult {
                    task_id,
                    kind: task_type.to_string(),
                }
                .into())
            }
        };

        let protocols = parse_all_defi_protocols(payload)?;
        debug!("Overview payload covers {} addresses", protocols.len());
        self.replace_protocols(protocols, generation);
        Ok(())
    }

    async fn fetch_adapter_balances(
        &self,
        protocol: DefiProtocol,
        adapter: &Arc<dyn ProtocolAdapter>,
        refresh: bool,
    ) {
        let Some(_guard) = self.status.try_begin(protocol.balances_section(), refresh) else {
            return;
        };

        if let Err(err) = adapter.fetch_balances(refresh).await {
            error!("Failed to fetch the {} balances: {}", protocol, err);
            let name = protocol.overview().display_name();
            let message = err.to_string();
            self.notifier.notify(Notification::error(
                self.translator
                    .translate(PROTOCOL_ERROR_TITLE_KEY, &[("protocol", name)]),
                self.translator.translate(
                    PROTOCOL_ERROR_MESSAGE_KEY,
                    &[("protocol", name), ("message", message.as_str())],
                ),
            ));
        }
    }
}
