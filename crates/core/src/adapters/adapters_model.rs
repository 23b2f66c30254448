//! Models exchanged with protocol adapters and other collaborators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Options for a history fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryRequest {
    /// Bypass any cached history.
    pub refresh: bool,
    /// Drop stored history and recompute it from scratch instead of
    /// fetching incrementally.
    pub reset: bool,
}

impl HistoryRequest {
    /// A full recomputation request.
    pub fn reset() -> Self {
        Self {
            refresh: true,
            reset: true,
        }
    }
}

/// A history event carrying the account it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEvent {
    pub address: String,
    pub event_type: String,
    pub tx_hash: String,
    pub timestamp: i64,
}

/// History state as exposed by an adapter.
///
/// Some adapters group history by account, others keep a flat event list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolHistory {
    /// History grouped by account address.
    Keyed(Vec<String>),
    /// Flat event list.
    Records(Vec<HistoryEvent>),
}

impl Default for ProtocolHistory {
    fn default() -> Self {
        ProtocolHistory::Keyed(Vec::new())
    }
}

impl ProtocolHistory {
    /// Unique addresses present in the history, in first-seen order.
    pub fn addresses(&self) -> Vec<String> {
        let addresses: Vec<&str> = match self {
            ProtocolHistory::Keyed(addresses) => addresses.iter().map(String::as_str).collect(),
            ProtocolHistory::Records(events) => {
                events.iter().map(|event| event.address.as_str()).collect()
            }
        };
        let mut seen = HashSet::new();
        addresses
            .into_iter()
            .filter(|address| seen.insert(*address))
            .map(str::to_string)
            .collect()
    }
}

/// Collateral and debt totals from the lending aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoanSummary {
    pub total_collateral_usd: Decimal,
    pub total_debt: Decimal,
}

/// Identifier of a background task.
pub type TaskId = u64;

/// Kinds of background task the engine submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    DefiBalances,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::DefiBalances => "defi_balances",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata attached to a task while it runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskMeta {
    pub title: String,
}

/// Outcome of a finished task.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskResult {
    pub result: Option<serde_json::Value>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(address: &str) -> HistoryEvent {
        HistoryEvent {
            address: address.to_string(),
            event_type: "deposit".to_string(),
            tx_hash: "0xhash".to_string(),
            timestamp: 1_600_000_000,
        }
    }

    #[test]
    fn test_record_history_addresses_are_deduplicated() {
        let history = ProtocolHistory::Records(vec![event("0x2"), event("0x1"), event("0x2")]);
        assert_eq!(history.addresses(), vec!["0x2".to_string(), "0x1".to_string()]);
    }

    #[test]
    fn test_keyed_history_addresses() {
        let history = ProtocolHistory::Keyed(vec!["0x1".to_string(), "0x3".to_string()]);
        assert_eq!(history.addresses(), vec!["0x1".to_string(), "0x3".to_string()]);
        assert!(ProtocolHistory::default().addresses().is_empty());
    }

    #[test]
    fn test_reset_request_forces_refresh() {
        let request = HistoryRequest::reset();
        assert!(request.refresh);
        assert!(request.reset);
        assert_eq!(HistoryRequest::default(), HistoryRequest { refresh: false, reset: false });
    }
}
