//! Lookup of protocol adapters and resettable modules.

use std::collections::HashMap;
use std::sync::Arc;

use super::adapters_traits::{ProtocolAdapter, ResettableModule};
use crate::protocols::{DefiProtocol, Module};

/// Adapters injected into the engine, keyed by protocol and by module.
///
/// Registering a protocol adapter also registers it as the reset capability
/// of the protocol's module.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<DefiProtocol, Arc<dyn ProtocolAdapter>>,
    modules: HashMap<Module, Arc<dyn ResettableModule>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the adapter for `protocol`.
    pub fn with_protocol<A>(mut self, protocol: DefiProtocol, adapter: Arc<A>) -> Self
    where
        A: ProtocolAdapter + 'static,
    {
        self.modules.insert(protocol.module(), adapter.clone());
        self.adapters.insert(protocol, adapter);
        self
    }

    /// Registers a reset-only module, e.g. a decentralized exchange.
    pub fn with_module<R>(mut self, module: Module, resettable: Arc<R>) -> Self
    where
        R: ResettableModule + 'static,
    {
        self.modules.insert(module, resettable);
        self
    }

    pub fn adapter(&self, protocol: DefiProtocol) -> Option<&Arc<dyn ProtocolAdapter>> {
        self.adapters.get(&protocol)
    }

    pub fn module(&self, module: Module) -> Option<&Arc<dyn ResettableModule>> {
        self.modules.get(&module)
    }

    /// Registered modules in enumeration order.
    pub fn registered_modules(&self) -> Vec<Module> {
        Module::ALL
            .into_iter()
            .filter(|module| self.modules.contains_key(module))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{HistoryRequest, ProtocolHistory};
    use crate::errors::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingModule {
        resets: AtomicUsize,
    }

    impl ResettableModule for CountingModule {
        fn reset(&self) {
            self.resets.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ProtocolAdapter for CountingModule {
        async fn fetch_balances(&self, _refresh: bool) -> Result<()> {
            Ok(())
        }

        async fn fetch_history(&self, _request: HistoryRequest) -> Result<()> {
            Ok(())
        }

        fn balance_addresses(&self) -> Vec<String> {
            Vec::new()
        }

        fn history(&self) -> ProtocolHistory {
            ProtocolHistory::default()
        }
    }

    #[test]
    fn test_protocol_adapter_is_registered_as_module() {
        let adapter = Arc::new(CountingModule::default());
        let registry =
            AdapterRegistry::new().with_protocol(DefiProtocol::YearnVaultsV2, adapter.clone());

        assert!(registry.adapter(DefiProtocol::YearnVaultsV2).is_some());
        assert!(registry.adapter(DefiProtocol::YearnVaults).is_none());

        registry.module(Module::YearnV2).unwrap().reset();
        assert_eq!(adapter.resets.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_registered_modules_follow_enumeration_order() {
        let registry = AdapterRegistry::new()
            .with_module(Module::Balancer, Arc::new(CountingModule::default()))
            .with_protocol(DefiProtocol::Aave, Arc::new(CountingModule::default()))
            .with_module(Module::Uniswap, Arc::new(CountingModule::default()));

        assert_eq!(
            registry.registered_modules(),
            vec![Module::Aave, Module::Uniswap, Module::Balancer]
        );
    }
}
