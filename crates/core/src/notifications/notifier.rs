//! Notification sink trait and implementations.

use std::sync::{Arc, Mutex, PoisonError};

use super::Notification;

/// Receives user-visible notifications.
///
/// `notify()` must not block; failure to deliver must not affect the
/// operation that raised the notification.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Notifier that only writes to the log.
#[derive(Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        log::warn!("{}: {}", notification.title, notification.message);
    }
}

/// Collects notifications in memory.
#[derive(Clone, Default)]
pub struct MemoryNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected notifications.
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::Severity;

    #[test]
    fn test_log_notifier_does_not_panic() {
        LogNotifier.notify(Notification::error("title", "message"));
    }

    #[test]
    fn test_memory_notifier_collects_notifications() {
        let notifier = MemoryNotifier::new();
        assert!(notifier.is_empty());

        notifier.notify(Notification::error("Balances", "boom"));
        let clone = notifier.clone();
        clone.notify(Notification::error("Aave", "down"));

        let notifications = notifier.notifications();
        assert_eq!(notifier.len(), 2);
        assert_eq!(notifications[0].title, "Balances");
        assert_eq!(notifications[1].message, "down");
        assert!(notifications.iter().all(|n| n.severity == Severity::Error && n.display));
    }
}
