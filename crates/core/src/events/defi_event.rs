//! Engine event types.

use serde::Serialize;

use crate::protocols::Module;
use crate::status::{Section, Status};

/// Events published after the engine mutates its state.
///
/// Consumers re-read `overview()` / `defi_accounts()` when they see one of
/// these; the engine itself keeps no derived state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DefiEvent {
    /// A section moved to a new loading status.
    StatusChanged { section: Section, status: Status },

    /// The raw protocol balances were replaced by a fresh overview payload.
    ProtocolsReplaced { address_count: usize },

    /// A module adapter was reset.
    ModuleReset { module: Module },

    /// The engine was torn down to its empty state.
    Reset,
}

impl DefiEvent {
    pub fn status_changed(section: Section, status: Status) -> Self {
        Self::StatusChanged { section, status }
    }

    pub fn protocols_replaced(address_count: usize) -> Self {
        Self::ProtocolsReplaced { address_count }
    }

    pub fn module_reset(module: Module) -> Self {
        Self::ModuleReset { module }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_with_type_tag() {
        let json = serde_json::to_value(DefiEvent::status_changed(
            Section::DefiBalances,
            Status::Loaded,
        ))
        .unwrap();
        assert_eq!(json["type"], "status_changed");
        assert_eq!(json["section"], "DEFI_BALANCES");
        assert_eq!(json["status"], "LOADED");

        let json = serde_json::to_value(DefiEvent::module_reset(Module::YearnV2)).unwrap();
        assert_eq!(json["type"], "module_reset");
        assert_eq!(json["module"], "yearn_v2");
    }
}
