//! Premium entitlement and the reset it triggers when lost.

use log::info;
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::defi_service::DefiService;

/// Whether the user holds a premium subscription.
pub struct PremiumEntitlement {
    sender: watch::Sender<bool>,
}

impl PremiumEntitlement {
    pub fn new(premium: bool) -> Self {
        let (sender, _receiver) = watch::channel(premium);
        Self { sender }
    }

    pub fn is_premium(&self) -> bool {
        *self.sender.borrow()
    }

    /// Updates the entitlement, waking subscribers when it changes.
    pub fn set(&self, premium: bool) {
        self.sender.send_if_modified(|current| {
            let changed = *current != premium;
            *current = premium;
            changed
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}

/// Resets the engine each time premium entitlement goes from true to false.
///
/// The task holds a weak reference and ends once the service is dropped.
pub fn spawn_entitlement_listener(service: &Arc<DefiService>) -> JoinHandle<()> {
    let mut receiver = service.entitlement().subscribe();
    let mut was_premium = *receiver.borrow_and_update();
    let service: Weak<DefiService> = Arc::downgrade(service);

    tokio::spawn(async move {
        while receiver.changed().await.is_ok() {
            let is_premium = *receiver.borrow_and_update();
            if was_premium && !is_premium {
                let Some(service) = service.upgrade() else {
                    break;
                };
                info!("Premium entitlement lost, resetting DeFi state");
                service.reset_all();
            }
            was_premium = is_premium;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_updates_value() {
        let entitlement = PremiumEntitlement::new(false);
        assert!(!entitlement.is_premium());
        entitlement.set(true);
        assert!(entitlement.is_premium());
    }

    #[tokio::test]
    async fn test_subscribers_only_wake_on_change() {
        let entitlement = PremiumEntitlement::new(true);
        let mut receiver = entitlement.subscribe();

        entitlement.set(true);
        assert!(!receiver.has_changed().unwrap());

        entitlement.set(false);
        assert!(receiver.has_changed().unwrap());
        receiver.changed().await.unwrap();
        assert!(!*receiver.borrow());
    }
}
