//! Closed identifier sets for protocols, overview entries and modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;
use crate::status::Section;

/// Lending and balance protocols with a dedicated adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefiProtocol {
    Aave,
    Compound,
    YearnVaults,
    YearnVaultsV2,
    MakerdaoDsr,
    MakerdaoVaults,
    Liquity,
}

impl DefiProtocol {
    pub const ALL: [DefiProtocol; 7] = [
        DefiProtocol::Aave,
        DefiProtocol::Compound,
        DefiProtocol::YearnVaults,
        DefiProtocol::YearnVaultsV2,
        DefiProtocol::MakerdaoDsr,
        DefiProtocol::MakerdaoVaults,
        DefiProtocol::Liquity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DefiProtocol::Aave => "aave",
            DefiProtocol::Compound => "compound",
            DefiProtocol::YearnVaults => "yearn_vaults",
            DefiProtocol::YearnVaultsV2 => "yearn_vaults_v2",
            DefiProtocol::MakerdaoDsr => "makerdao_dsr",
            DefiProtocol::MakerdaoVaults => "makerdao_vaults",
            DefiProtocol::Liquity => "liquity",
        }
    }

    /// The resettable module backing this protocol.
    pub fn module(&self) -> Module {
        match self {
            DefiProtocol::Aave => Module::Aave,
            DefiProtocol::Compound => Module::Compound,
            DefiProtocol::YearnVaults => Module::Yearn,
            DefiProtocol::YearnVaultsV2 => Module::YearnV2,
            DefiProtocol::MakerdaoDsr => Module::MakerdaoDsr,
            DefiProtocol::MakerdaoVaults => Module::MakerdaoVaults,
            DefiProtocol::Liquity => Module::Liquity,
        }
    }

    /// The overview entry this protocol is shown under.
    pub fn overview(&self) -> OverviewProtocol {
        match self {
            DefiProtocol::Aave => OverviewProtocol::Aave,
            DefiProtocol::Compound => OverviewProtocol::Compound,
            DefiProtocol::YearnVaults | DefiProtocol::YearnVaultsV2 => OverviewProtocol::Yearn,
            DefiProtocol::MakerdaoDsr | DefiProtocol::MakerdaoVaults => OverviewProtocol::Makerdao,
            DefiProtocol::Liquity => OverviewProtocol::Liquity,
        }
    }

    /// Section governing this protocol's balances.
    pub fn balances_section(&self) -> Section {
        match self {
            DefiProtocol::Aave => Section::DefiAaveBalances,
            DefiProtocol::Compound => Section::DefiCompoundBalances,
            DefiProtocol::YearnVaults => Section::DefiYearnVaultsBalances,
            DefiProtocol::YearnVaultsV2 => Section::DefiYearnVaultsV2Balances,
            DefiProtocol::MakerdaoDsr => Section::DefiDsrBalances,
            DefiProtocol::MakerdaoVaults => Section::DefiMakerdaoVaults,
            DefiProtocol::Liquity => Section::DefiLiquityBalances,
        }
    }

    /// Section governing this protocol's history.
    pub fn history_section(&self) -> Section {
        match self {
            DefiProtocol::Aave => Section::DefiAaveHistory,
            DefiProtocol::Compound => Section::DefiCompoundHistory,
            DefiProtocol::YearnVaults => Section::DefiYearnVaultsHistory,
            DefiProtocol::YearnVaultsV2 => Section::DefiYearnVaultsV2History,
            DefiProtocol::MakerdaoDsr => Section::DefiDsrHistory,
            DefiProtocol::MakerdaoVaults => Section::DefiMakerdaoVaultDetails,
            DefiProtocol::Liquity => Section::DefiLiquityEvents,
        }
    }
}

impl fmt::Display for DefiProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DefiProtocol {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DefiProtocol::ALL
            .into_iter()
            .find(|protocol| protocol.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidInput(format!("Unknown protocol '{}'", s)))
    }
}

/// Protocols that get a dedicated entry in the overview.
///
/// Several `DefiProtocol`s can share one entry: Yearn v1 and v2 are both
/// shown as "yearn.finance", the DSR and vaults both as "MakerDAO".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverviewProtocol {
    Aave,
    Compound,
    Yearn,
    Makerdao,
    Liquity,
}

impl OverviewProtocol {
    pub const ALL: [OverviewProtocol; 5] = [
        OverviewProtocol::Aave,
        OverviewProtocol::Compound,
        OverviewProtocol::Yearn,
        OverviewProtocol::Makerdao,
        OverviewProtocol::Liquity,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            OverviewProtocol::Aave => "Aave",
            OverviewProtocol::Compound => "Compound",
            OverviewProtocol::Yearn => "yearn.finance",
            OverviewProtocol::Makerdao => "MakerDAO",
            OverviewProtocol::Liquity => "Liquity",
        }
    }

    /// Matches a protocol name from an overview payload, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|protocol| protocol.display_name().eq_ignore_ascii_case(name))
    }
}

/// A resettable adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    MakerdaoDsr,
    MakerdaoVaults,
    Aave,
    Compound,
    Yearn,
    YearnV2,
    Uniswap,
    Sushiswap,
    Balancer,
    Liquity,
}

impl Module {
    /// Every module, in enumeration order.
    pub const ALL: [Module; 10] = [
        Module::MakerdaoDsr,
        Module::MakerdaoVaults,
        Module::Aave,
        Module::Compound,
        Module::Yearn,
        Module::YearnV2,
        Module::Uniswap,
        Module::Sushiswap,
        Module::Balancer,
        Module::Liquity,
    ];

    /// Decentralized exchange modules, in reset order.
    pub const DECENTRALIZED_EXCHANGES: [Module; 3] =
        [Module::Uniswap, Module::Sushiswap, Module::Balancer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Module::MakerdaoDsr => "makerdao_dsr",
            Module::MakerdaoVaults => "makerdao_vaults",
            Module::Aave => "aave",
            Module::Compound => "compound",
            Module::Yearn => "yearn",
            Module::YearnV2 => "yearn_v2",
            Module::Uniswap => "uniswap",
            Module::Sushiswap => "sushiswap",
            Module::Balancer => "balancer",
            Module::Liquity => "liquity",
        }
    }

    /// Sections owned by the module, cleared when it is reset.
    pub fn sections(&self) -> [Section; 2] {
        match self {
            Module::MakerdaoDsr => [Section::DefiDsrBalances, Section::DefiDsrHistory],
            Module::MakerdaoVaults => [
                Section::DefiMakerdaoVaults,
                Section::DefiMakerdaoVaultDetails,
            ],
            Module::Aave => [Section::DefiAaveBalances, Section::DefiAaveHistory],
            Module::Compound => [Section::DefiCompoundBalances, Section::DefiCompoundHistory],
            Module::Yearn => [
                Section::DefiYearnVaultsBalances,
                Section::DefiYearnVaultsHistory,
            ],
            Module::YearnV2 => [
                Section::DefiYearnVaultsV2Balances,
                Section::DefiYearnVaultsV2History,
            ],
            Module::Uniswap => [Section::DefiUniswapBalances, Section::DefiUniswapEvents],
            Module::Sushiswap => [Section::DefiSushiswapBalances, Section::DefiSushiswapEvents],
            Module::Balancer => [Section::DefiBalancerBalances, Section::DefiBalancerEvents],
            Module::Liquity => [Section::DefiLiquityBalances, Section::DefiLiquityEvents],
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a `reset_state` request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleSelection {
    /// Every registered module, in enumeration order.
    All,
    /// Uniswap, Sushiswap and Balancer, in that order.
    DecentralizedExchanges,
    /// One module.
    Module(Module),
}

impl From<Module> for ModuleSelection {
    fn from(module: Module) -> Self {
        ModuleSelection::Module(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_ids_round_trip_through_serde_names() {
        for protocol in DefiProtocol::ALL {
            let json = serde_json::to_string(&protocol).unwrap();
            assert_eq!(json, format!("\"{}\"", protocol.as_str()));
            assert_eq!(protocol.as_str().parse::<DefiProtocol>().unwrap(), protocol);
        }
        assert!("uniswap".parse::<DefiProtocol>().is_err());
    }

    #[test]
    fn test_module_serde_names_match_as_str() {
        for module in Module::ALL {
            let json = serde_json::to_string(&module).unwrap();
            assert_eq!(json, format!("\"{}\"", module.as_str()));
        }
    }

    #[test]
    fn test_yearn_versions_map_to_separate_modules() {
        assert_eq!(DefiProtocol::YearnVaults.module(), Module::Yearn);
        assert_eq!(DefiProtocol::YearnVaultsV2.module(), Module::YearnV2);
    }

    #[test]
    fn test_protocol_balances_section_belongs_to_its_module() {
        for protocol in DefiProtocol::ALL {
            let sections = protocol.module().sections();
            assert!(sections.contains(&protocol.balances_section()));
            assert!(sections.contains(&protocol.history_section()));
        }
    }

    #[test]
    fn test_protocol_versions_share_an_overview_entry() {
        assert_eq!(DefiProtocol::Aave.overview().display_name(), "Aave");
        assert_eq!(DefiProtocol::YearnVaultsV2.overview(), OverviewProtocol::Yearn);
        assert_eq!(
            DefiProtocol::MakerdaoDsr.overview(),
            DefiProtocol::MakerdaoVaults.overview()
        );
    }

    #[test]
    fn test_overview_protocol_lookup_ignores_case() {
        assert_eq!(OverviewProtocol::from_name("AAVE"), Some(OverviewProtocol::Aave));
        assert_eq!(
            OverviewProtocol::from_name("Yearn.Finance"),
            Some(OverviewProtocol::Yearn)
        );
        assert_eq!(OverviewProtocol::from_name("Curve"), None);
    }
}
