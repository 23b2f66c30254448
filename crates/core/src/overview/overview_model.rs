//! Derived overview models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::protocols::{AllDefiProtocols, BaseBalance, DefiProtocol, ProtocolInfo};
use crate::status::StatusSnapshot;

/// Token shown next to a protocol in the overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub token_name: String,
    pub token_symbol: String,
}

/// Per-protocol rollup shown in the overview.
///
/// Recomputed on every read; identity is the protocol's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefiProtocolSummary {
    pub protocol: ProtocolInfo,
    pub token_info: Option<TokenInfo>,
    pub assets: Vec<BaseBalance>,
    pub deposits: bool,
    pub liabilities: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposits_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liabilities_url: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_collateral_usd: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_debt_usd: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_lending_deposit_usd: Decimal,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::str_option"
    )]
    pub balance_usd: Option<Decimal>,
}

impl DefiProtocolSummary {
    /// True when any lending deposit, debt, spot balance or collateral is
    /// positive.
    pub fn has_value(&self) -> bool {
        self.total_lending_deposit_usd > Decimal::ZERO
            || self.total_debt_usd > Decimal::ZERO
            || self.balance_usd.is_some_and(|balance| balance > Decimal::ZERO)
            || self.total_collateral_usd > Decimal::ZERO
    }

    /// True when the summary belongs in the overview list.
    pub fn is_visible(&self) -> bool {
        self.balance_usd.is_some_and(|balance| balance > Decimal::ZERO)
            || self.deposits
            || self.liabilities
    }
}

/// Chains accounts are reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Blockchain {
    #[default]
    #[serde(rename = "ETH")]
    Ethereum,
}

/// An address together with the protocols it participates in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefiAccount {
    pub address: String,
    pub chain: Blockchain,
    pub protocols: Vec<DefiProtocol>,
}

/// Immutable inputs of the overview computation.
#[derive(Debug, Clone, Default)]
pub struct OverviewSnapshot {
    pub protocols: Arc<AllDefiProtocols>,
    pub statuses: StatusSnapshot,
}
