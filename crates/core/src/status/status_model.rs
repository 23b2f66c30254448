//! Loading status domain models.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Loading lifecycle of a section.
///
/// A normal run moves `NotLoaded -> Loading -> (PartiallyLoaded) -> Loaded`.
/// A forced re-fetch uses `Refreshing` in place of `Loading`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    NotLoaded,
    Loading,
    PartiallyLoaded,
    Refreshing,
    Loaded,
}

impl Status {
    /// Returns true while a fetch for the section is in flight.
    pub fn is_loading(self) -> bool {
        matches!(
            self,
            Status::Loading | Status::PartiallyLoaded | Status::Refreshing
        )
    }

    /// Returns true when data for the section can be shown.
    ///
    /// A refreshing section still holds the data of its previous load.
    pub fn is_ready(self) -> bool {
        matches!(self, Status::Loaded | Status::Refreshing)
    }
}

/// A named scope of loading status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    /// Umbrella section for the whole DeFi overview.
    DefiOverview,
    /// Overview-level balances fetched through a single task.
    DefiBalances,
    /// Premium lending history across protocols.
    DefiLendingHistory,
    DefiAaveBalances,
    DefiAaveHistory,
    DefiCompoundBalances,
    DefiCompoundHistory,
    DefiYearnVaultsBalances,
    DefiYearnVaultsHistory,
    DefiYearnVaultsV2Balances,
    DefiYearnVaultsV2History,
    DefiDsrBalances,
    DefiDsrHistory,
    DefiMakerdaoVaults,
    DefiMakerdaoVaultDetails,
    DefiLiquityBalances,
    DefiLiquityEvents,
    DefiUniswapBalances,
    DefiUniswapEvents,
    DefiSushiswapBalances,
    DefiSushiswapEvents,
    DefiBalancerBalances,
    DefiBalancerEvents,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::DefiOverview => "DEFI_OVERVIEW",
            Section::DefiBalances => "DEFI_BALANCES",
            Section::DefiLendingHistory => "DEFI_LENDING_HISTORY",
            Section::DefiAaveBalances => "DEFI_AAVE_BALANCES",
            Section::DefiAaveHistory => "DEFI_AAVE_HISTORY",
            Section::DefiCompoundBalances => "DEFI_COMPOUND_BALANCES",
            Section::DefiCompoundHistory => "DEFI_COMPOUND_HISTORY",
            Section::DefiYearnVaultsBalances => "DEFI_YEARN_VAULTS_BALANCES",
            Section::DefiYearnVaultsHistory => "DEFI_YEARN_VAULTS_HISTORY",
            Section::DefiYearnVaultsV2Balances => "DEFI_YEARN_VAULTS_V2_BALANCES",
            Section::DefiYearnVaultsV2History => "DEFI_YEARN_VAULTS_V2_HISTORY",
            Section::DefiDsrBalances => "DEFI_DSR_BALANCES",
            Section::DefiDsrHistory => "DEFI_DSR_HISTORY",
            Section::DefiMakerdaoVaults => "DEFI_MAKERDAO_VAULTS",
            Section::DefiMakerdaoVaultDetails => "DEFI_MAKERDAO_VAULT_DETAILS",
            Section::DefiLiquityBalances => "DEFI_LIQUITY_BALANCES",
            Section::DefiLiquityEvents => "DEFI_LIQUITY_EVENTS",
            Section::DefiUniswapBalances => "DEFI_UNISWAP_BALANCES",
            Section::DefiUniswapEvents => "DEFI_UNISWAP_EVENTS",
            Section::DefiSushiswapBalances => "DEFI_SUSHISWAP_BALANCES",
            Section::DefiSushiswapEvents => "DEFI_SUSHISWAP_EVENTS",
            Section::DefiBalancerBalances => "DEFI_BALANCER_BALANCES",
            Section::DefiBalancerEvents => "DEFI_BALANCER_EVENTS",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable copy of every section status at one point in time.
///
/// Sections never set read as `Status::NotLoaded`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    statuses: HashMap<Section, Status>,
}

impl StatusSnapshot {
    pub fn new(statuses: HashMap<Section, Status>) -> Self {
        Self { statuses }
    }

    pub fn get(&self, section: Section) -> Status {
        self.statuses.get(&section).copied().unwrap_or_default()
    }

    /// Returns a copy with `section` set to `status`.
    pub fn with(mut self, section: Section, status: Status) -> Self {
        self.statuses.insert(section, status);
        self
    }
}
