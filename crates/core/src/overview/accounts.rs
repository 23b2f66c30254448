//! Derivation of the accounts participating in DeFi protocols.

use std::collections::{HashMap, HashSet};

use super::overview_model::{Blockchain, DefiAccount};
use crate::adapters::ProtocolHistory;
use crate::protocols::DefiProtocol;

/// Protocols whose adapters report account addresses, in the order they are
/// added to each account's protocol list.
pub const ACCOUNT_PROTOCOLS: [DefiProtocol; 5] = [
    DefiProtocol::Aave,
    DefiProtocol::Compound,
    DefiProtocol::YearnVaults,
    DefiProtocol::YearnVaultsV2,
    DefiProtocol::MakerdaoDsr,
];

/// Unique addresses with a balance or history in one protocol.
pub fn protocol_addresses(balance_addresses: &[String], history: &ProtocolHistory) -> Vec<String> {
    let mut seen = HashSet::new();
    balance_addresses
        .iter()
        .cloned()
        .chain(history.addresses())
        .filter(|address| seen.insert(address.clone()))
        .collect()
}

/// Returns true when `protocol` passes `filter`. An empty filter passes all.
pub fn is_selected(protocol: DefiProtocol, filter: &[DefiProtocol]) -> bool {
    filter.is_empty() || filter.contains(&protocol)
}

/// Folds per-protocol address lists into one account per address.
///
/// Protocols are visited in `ACCOUNT_PROTOCOLS` order and skipped when the
/// filter excludes them. Accounts come out in first-seen address order.
pub fn derive_defi_accounts(
    addresses_by_protocol: &HashMap<DefiProtocol, Vec<String>>,
    filter: &[DefiProtocol],
) -> Vec<DefiAccount> {
    let mut accounts: Vec<DefiAccount> = Vec::new();
    let mut index_by_address: HashMap<String, usize> = HashMap::new();

    for protocol in ACCOUNT_PROTOCOLS {
        if !is_selected(protocol, filter) {
            continue;
        }
        let Some(addresses) = addresses_by_protocol.get(&protocol) else {
            continue;
        };

        for address in addresses {
            match index_by_address.get(address) {
                Some(&index) => {
                    let protocols = &mut accounts[index].protocols;
                    if !protocols.contains(&protocol) {
                        protocols.push(protocol);
                    }
                }
                None => {
                    index_by_address.insert(address.clone(), accounts.len());
                    accounts.push(DefiAccount {
                        address: address.clone(),
                        chain: Blockchain::Ethereum,
                        protocols: vec![protocol],
                    });
                }
            }
        }
    }

    accounts
}
