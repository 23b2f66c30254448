//! History recomputation and state resets.

use futures::future::join_all;
use log::{debug, error, info, warn};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::defi_service::DefiService;
use crate::adapters::HistoryRequest;
use crate::errors::Result;
use crate::events::DefiEvent;
use crate::protocols::{AllDefiProtocols, DefiProtocol, Module, ModuleSelection};
use crate::status::Section;

/// Protocols whose lending history `reset_db` recomputes.
pub const HISTORY_RESET_PROTOCOLS: [DefiProtocol; 3] = [
    DefiProtocol::YearnVaults,
    DefiProtocol::YearnVaultsV2,
    DefiProtocol::Aave,
];

impl DefiService {
    pub(super) async fn run_reset_db(&self, protocols: &[DefiProtocol]) -> Result<()> {
        if !self.entitlement.is_premium() {
            debug!("Skipping lending history reset: premium entitlement required");
            return Ok(());
        }
        let Some(_guard) = self.status.try_begin(Section::DefiLendingHistory, true) else {
            return Ok(());
        };

        let resets = HISTORY_RESET_PROTOCOLS
            .into_iter()
            .filter(|protocol| protocols.contains(protocol))
            .filter_map(|protocol| {
                let adapter = self.registry.adapter(protocol);
                if adapter.is_none() {
                    debug!("No adapter registered for {}, skipping history reset", protocol);
                }
                adapter.map(|adapter| (protocol, adapter))
            })
            .map(|(protocol, adapter)| async move {
                adapter
                    .fetch_history(HistoryRequest::reset())
                    .await
                    .map_err(|err| {
                        error!("Failed to reset the {} history: {}", protocol, err);
                        err
                    })
            });

        // Every reset runs to completion before the first failure is reported.
        join_all(resets)
            .await
            .into_iter()
            .find(|result| result.is_err())
            .unwrap_or(Ok(()))?;
        info!("Lending history recomputed");
        Ok(())
    }

    pub(super) fn reset_modules(&self, selection: ModuleSelection) {
        let modules = match selection {
            ModuleSelection::All => self.registry.registered_modules(),
            ModuleSelection::DecentralizedExchanges => Module::DECENTRALIZED_EXCHANGES.to_vec(),
            ModuleSelection::Module(module) => vec![module],
        };
        for module in modules {
            self.reset_module(module);
        }
    }

    pub(super) fn reset_all(&self) {
        {
            let mut all_protocols = self
                .all_protocols
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            // Payloads stamped with an older generation are discarded on arrival.
            self.generation.fetch_add(1, Ordering::SeqCst);
            *all_protocols = Arc::new(AllDefiProtocols::new());
        }
        self.airdrops.reset();
        self.reset_modules(ModuleSelection::All);
        self.status.reset(Section::DefiBalances);
        self.status.reset(Section::DefiOverview);
        info!("DeFi state reset");
        self.events.publish(DefiEvent::Reset);
    }

    fn reset_module(&self, module: Module) {
        let Some(resettable) = self.registry.module(module) else {
            warn!("No reset registered for module {}", module);
            return;
        };
        resettable.reset();
        for section in module.sections() {
            self.status.reset(section);
        }
        debug!("Module {} reset", module);
        self.events.publish(DefiEvent::module_reset(module));
    }
}
