//! Raw per-protocol balance models received from the overview task.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{Result, ValidationError};

/// Raw overview payload: address -> balance entries, one per protocol asset.
///
/// Addresses iterate in lexicographic order so every derived view is
/// deterministic.
pub type AllDefiProtocols = BTreeMap<String, Vec<ProtocolBalanceEntry>>;

/// Protocol identity as reported by the overview task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProtocolInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Amount and its USD value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    #[serde(with = "super::decimal_serde")]
    pub amount: Decimal,
    #[serde(alias = "usd_value", with = "super::decimal_serde")]
    pub usd_value: Decimal,
}

impl Balance {
    pub fn new(amount: Decimal, usd_value: Decimal) -> Self {
        Self { amount, usd_value }
    }
}

impl std::ops::Add for Balance {
    type Output = Balance;

    fn add(self, other: Balance) -> Balance {
        Balance {
            amount: self.amount + other.amount,
            usd_value: self.usd_value + other.usd_value,
        }
    }
}

/// A token balance held in a protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseBalance {
    #[serde(alias = "token_address")]
    pub token_address: String,
    #[serde(alias = "token_name")]
    pub token_name: String,
    #[serde(alias = "token_symbol")]
    pub token_symbol: String,
    pub balance: Balance,
}

/// Whether an entry counts towards holdings or debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceType {
    Asset,
    Liability,
}

/// One (address, protocol, asset) balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolBalanceEntry {
    pub protocol: ProtocolInfo,
    #[serde(alias = "base_balance")]
    pub base_balance: BaseBalance,
    #[serde(alias = "balance_type")]
    pub balance_type: BalanceType,
}

impl ProtocolBalanceEntry {
    pub fn is_asset(&self) -> bool {
        self.balance_type == BalanceType::Asset
    }
}

/// Parses and validates an overview payload.
///
/// Fails on malformed JSON shapes, unparsable decimals, empty addresses and
/// entries without a protocol name or token address.
pub fn parse_all_defi_protocols(payload: serde_json::Value) -> Result<AllDefiProtocols> {
    let protocols: AllDefiProtocols = serde_json::from_value(payload)?;

    for (address, entries) in &protocols {
        if address.trim().is_empty() {
            return Err(ValidationError::InvalidInput(
                "Overview payload contains an empty address".to_string(),
            )
            .into());
        }
        for entry in entries {
            if entry.protocol.name.trim().is_empty() {
                return Err(ValidationError::MissingField(format!(
                    "protocol.name (address {})",
                    address
                ))
                .into());
            }
            if entry.base_balance.token_address.trim().is_empty() {
                return Err(ValidationError::MissingField(format!(
                    "base_balance.token_address (address {}, protocol {})",
                    address, entry.protocol.name
                ))
                .into());
            }
        }
    }

    Ok(protocols)
}
