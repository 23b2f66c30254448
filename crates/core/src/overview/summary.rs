//! Per-protocol summaries for the DeFi overview.
//!
//! Two paths feed the overview:
//!
//! - Generic protocols are folded entry by entry from the raw overview
//!   payload: running USD balance, assets merged by token address, and a token
//!   label that collapses to "multiple assets" once two names disagree.
//! - Protocols with a dedicated adapter are summarized from the lending
//!   aggregation, gated on their balances section being loaded.
//!
//! Dedicated summaries are applied after the generic fold and replace any
//! generic summary with the same display name.

use log::debug;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};

use super::overview_model::{DefiProtocolSummary, OverviewSnapshot, TokenInfo};
use crate::adapters::{LendingAggregator, LoanSummary};
use crate::constants::{DEPOSITS_ROUTE, LIABILITIES_ROUTE, MULTIPLE_ASSETS_KEY};
use crate::notifications::Translator;
use crate::protocols::{
    AllDefiProtocols, DefiProtocol, OverviewProtocol, ProtocolBalanceEntry, ProtocolInfo,
};
use crate::status::StatusSnapshot;

/// How a protocol with a dedicated adapter is summarized.
#[derive(Debug, Clone, Copy)]
pub struct DedicatedSummary {
    pub protocol: DefiProtocol,
    pub overview: OverviewProtocol,
    /// The protocol only takes deposits; collateral and debt are zero.
    pub no_liabilities: bool,
    /// The protocol only holds debt; lending deposits are zero.
    pub no_deposits: bool,
}

/// Dedicated summaries, one per protocol. Rows sharing an overview protocol
/// are combined into one entry.
pub const DEDICATED_SUMMARIES: [DedicatedSummary; 7] = [
    DedicatedSummary {
        protocol: DefiProtocol::Aave,
        overview: OverviewProtocol::Aave,
        no_liabilities: false,
        no_deposits: false,
    },
    DedicatedSummary {
        protocol: DefiProtocol::Compound,
        overview: OverviewProtocol::Compound,
        no_liabilities: false,
        no_deposits: false,
    },
    DedicatedSummary {
        protocol: DefiProtocol::YearnVaults,
        overview: OverviewProtocol::Yearn,
        no_liabilities: true,
        no_deposits: false,
    },
    DedicatedSummary {
        protocol: DefiProtocol::YearnVaultsV2,
        overview: OverviewProtocol::Yearn,
        no_liabilities: true,
        no_deposits: false,
    },
    DedicatedSummary {
        protocol: DefiProtocol::Liquity,
        overview: OverviewProtocol::Liquity,
        no_liabilities: true,
        no_deposits: false,
    },
    DedicatedSummary {
        protocol: DefiProtocol::MakerdaoDsr,
        overview: OverviewProtocol::Makerdao,
        no_liabilities: true,
        no_deposits: false,
    },
    DedicatedSummary {
        protocol: DefiProtocol::MakerdaoVaults,
        overview: OverviewProtocol::Makerdao,
        no_liabilities: false,
        no_deposits: true,
    },
];

/// Looks up the dedicated summary row of a protocol.
pub fn dedicated_summary(protocol: DefiProtocol) -> Option<&'static DedicatedSummary> {
    DEDICATED_SUMMARIES.iter().find(|row| row.protocol == protocol)
}

/// Builds the overview from a snapshot of engine state.
pub struct SummaryAggregator<'a> {
    lending: &'a dyn LendingAggregator,
    translator: &'a dyn Translator,
}

impl<'a> SummaryAggregator<'a> {
    pub fn new(lending: &'a dyn LendingAggregator, translator: &'a dyn Translator) -> Self {
        Self {
            lending,
            translator,
        }
    }

    /// Sorted, filtered overview list.
    pub fn overview(&self, snapshot: &OverviewSnapshot) -> Vec<DefiProtocolSummary> {
        let mut summaries = self.generic_summaries(&snapshot.protocols);

        for (name, summary) in self.dedicated_summaries(&snapshot.statuses) {
            debug!("Dedicated summary for {} replaces generic entry", name);
            summaries.insert(name, summary);
        }

        // BTreeMap iteration is already ordered by display name.
        summaries
            .into_values()
            .filter(DefiProtocolSummary::is_visible)
            .collect()
    }

    /// Folds raw entries into one summary per display name.
    pub fn generic_summaries(
        &self,
        protocols: &AllDefiProtocols,
    ) -> BTreeMap<String, DefiProtocolSummary> {
        let multiple_assets = self.translator.translate(MULTIPLE_ASSETS_KEY, &[]);
        let mut summaries: BTreeMap<String, DefiProtocolSummary> = BTreeMap::new();
        let mut collapsed: HashSet<String> = HashSet::new();

        for entry in protocols.values().flatten() {
            let name = display_name(&entry.protocol.name);
            let summary = summaries
                .entry(name.clone())
                .or_insert_with(|| seed_summary(entry));

            let token_name = &entry.base_balance.token_name;
            let differs = summary
                .token_info
                .as_ref()
                .is_some_and(|info| &info.token_name != token_name);
            if collapsed.contains(&name) || differs {
                collapsed.insert(name.clone());
                summary.token_info = Some(TokenInfo {
                    token_name: multiple_assets.clone(),
                    token_symbol: String::new(),
                });
            }

            if entry.is_asset() {
                add_asset(summary, entry);
            }
        }

        summaries
    }

    /// Summaries of protocols with a dedicated adapter, keyed by display name.
    ///
    /// Rows whose balances section is not ready, or that hold no value, are
    /// left out.
    pub fn dedicated_summaries(
        &self,
        statuses: &StatusSnapshot,
    ) -> BTreeMap<String, DefiProtocolSummary> {
        let mut summaries: BTreeMap<String, DefiProtocolSummary> = BTreeMap::new();

        for row in &DEDICATED_SUMMARIES {
            let Some(summary) = self.protocol_summary(row, statuses) else {
                continue;
            };
            if !summary.has_value() {
                continue;
            }
            let name = row.overview.display_name().to_string();
            match summaries.remove(&name) {
                Some(existing) => summaries.insert(name, combine(existing, summary)),
                None => summaries.insert(name, summary),
            };
        }

        summaries
    }

    /// Summary of one dedicated protocol, or `None` while its balances are
    /// not loaded.
    pub fn protocol_summary(
        &self,
        row: &DedicatedSummary,
        statuses: &StatusSnapshot,
    ) -> Option<DefiProtocolSummary> {
        if !statuses.get(row.protocol.balances_section()).is_ready() {
            return None;
        }

        let filter = [row.protocol];
        let loans = if row.no_liabilities {
            LoanSummary::default()
        } else {
            self.lending.loan_summary(&filter)
        };
        let lending_deposit = if row.no_deposits {
            Decimal::ZERO
        } else {
            self.lending.total_lending_deposit(&filter, &[])
        };

        Some(DefiProtocolSummary {
            protocol: ProtocolInfo {
                name: row.overview.display_name().to_string(),
                icon: None,
            },
            token_info: None,
            assets: Vec::new(),
            deposits: !row.no_deposits,
            liabilities: !row.no_liabilities,
            deposits_url: (!row.no_deposits).then(|| route(DEPOSITS_ROUTE, row.protocol)),
            liabilities_url: (!row.no_liabilities)
                .then(|| route(LIABILITIES_ROUTE, row.protocol)),
            total_collateral_usd: loans.total_collateral_usd,
            total_debt_usd: loans.total_debt,
            total_lending_deposit_usd: lending_deposit,
            balance_usd: None,
        })
    }
}

/// Canonical display name of a payload protocol name.
fn display_name(name: &str) -> String {
    OverviewProtocol::from_name(name)
        .map(|protocol| protocol.display_name().to_string())
        .unwrap_or_else(|| name.to_string())
}

fn route(base: &str, protocol: DefiProtocol) -> String {
    format!("{}?protocols={}", base, protocol)
}

fn seed_summary(entry: &ProtocolBalanceEntry) -> DefiProtocolSummary {
    DefiProtocolSummary {
        protocol: entry.protocol.clone(),
        token_info: Some(TokenInfo {
            token_name: entry.base_balance.token_name.clone(),
            token_symbol: entry.base_balance.token_symbol.clone(),
        }),
        assets: Vec::new(),
        deposits: false,
        liabilities: false,
        deposits_url: None,
        liabilities_url: None,
        total_collateral_usd: Decimal::ZERO,
        total_debt_usd: Decimal::ZERO,
        total_lending_deposit_usd: Decimal::ZERO,
        balance_usd: None,
    }
}

/// Adds an asset entry to the running balance and merges it by token address.
fn add_asset(summary: &mut DefiProtocolSummary, entry: &ProtocolBalanceEntry) {
    let base = &entry.base_balance;
    summary.balance_usd = Some(summary.balance_usd.unwrap_or_default() + base.balance.usd_value);

    match summary
        .assets
        .iter_mut()
        .find(|asset| asset.token_address == base.token_address)
    {
        Some(asset) => asset.balance = asset.balance + base.balance,
        None => summary.assets.push(base.clone()),
    }
}

/// Merges two dedicated summaries shown under the same name.
fn combine(first: DefiProtocolSummary, second: DefiProtocolSummary) -> DefiProtocolSummary {
    let balance_usd = match (first.balance_usd, second.balance_usd) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or_default() + b.unwrap_or_default()),
    };
    DefiProtocolSummary {
        protocol: first.protocol,
        token_info: first.token_info.or(second.token_info),
        assets: first.assets.into_iter().chain(second.assets).collect(),
        deposits: first.deposits || second.deposits,
        liabilities: first.liabilities || second.liabilities,
        deposits_url: first.deposits_url.or(second.deposits_url),
        liabilities_url: first.liabilities_url.or(second.liabilities_url),
        total_collateral_usd: first.total_collateral_usd + second.total_collateral_usd,
        total_debt_usd: first.total_debt_usd + second.total_debt_usd,
        total_lending_deposit_usd: first.total_lending_deposit_usd
            + second.total_lending_deposit_usd,
        balance_usd,
    }
}
