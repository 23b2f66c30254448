use tokio::sync::broadcast;

use super::DefiEvent;

/// Lightweight broadcast bus that fans out engine events to any subscriber.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DefiEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DefiEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: DefiEvent) {
        // No subscribers or lagging listeners are not an error for producers.
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(crate::constants::EVENT_CHANNEL_CAPACITY)
    }
}
