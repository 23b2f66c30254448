//! Unit tests for account derivation.

use super::*;
use crate::adapters::{HistoryEvent, ProtocolHistory};
use crate::protocols::DefiProtocol;
use std::collections::HashMap;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn event(address: &str) -> HistoryEvent {
    HistoryEvent {
        address: address.to_string(),
        event_type: "mint".to_string(),
        tx_hash: format!("0x{}", address),
        timestamp: 0,
    }
}

fn sample_addresses() -> HashMap<DefiProtocol, Vec<String>> {
    HashMap::from([
        (DefiProtocol::Aave, strings(&["0xa", "0xb"])),
        (DefiProtocol::Compound, strings(&["0xb", "0xc"])),
        (DefiProtocol::YearnVaults, strings(&["0xa"])),
        (DefiProtocol::MakerdaoDsr, strings(&["0xd", "0xa"])),
    ])
}

#[test]
fn test_protocol_addresses_union_balances_and_keyed_history() {
    let history = ProtocolHistory::Keyed(strings(&["0x2", "0x1"]));
    let addresses = protocol_addresses(&strings(&["0x1", "0x3"]), &history);
    assert_eq!(addresses, strings(&["0x1", "0x3", "0x2"]));
}

#[test]
fn test_protocol_addresses_union_balances_and_record_history() {
    let history = ProtocolHistory::Records(vec![event("0x2"), event("0x2"), event("0x1")]);
    let addresses = protocol_addresses(&strings(&["0x1"]), &history);
    assert_eq!(addresses, strings(&["0x1", "0x2"]));
}

#[test]
fn test_accounts_without_filter_cover_all_protocols() {
    let accounts = derive_defi_accounts(&sample_addresses(), &[]);

    let addresses: Vec<&str> = accounts.iter().map(|a| a.address.as_str()).collect();
    assert_eq!(addresses, vec!["0xa", "0xb", "0xc", "0xd"]);

    assert_eq!(
        accounts[0].protocols,
        vec![
            DefiProtocol::Aave,
            DefiProtocol::YearnVaults,
            DefiProtocol::MakerdaoDsr
        ]
    );
    assert_eq!(
        accounts[1].protocols,
        vec![DefiProtocol::Aave, DefiProtocol::Compound]
    );
    assert_eq!(accounts[2].protocols, vec![DefiProtocol::Compound]);
    assert_eq!(accounts[3].protocols, vec![DefiProtocol::MakerdaoDsr]);
    assert!(accounts.iter().all(|a| a.chain == Blockchain::Ethereum));
}

#[test]
fn test_accounts_with_filter_skip_other_protocols() {
    let accounts = derive_defi_accounts(
        &sample_addresses(),
        &[DefiProtocol::Compound, DefiProtocol::MakerdaoDsr],
    );

    let addresses: Vec<&str> = accounts.iter().map(|a| a.address.as_str()).collect();
    assert_eq!(addresses, vec!["0xb", "0xc", "0xd", "0xa"]);
    assert_eq!(accounts[3].protocols, vec![DefiProtocol::MakerdaoDsr]);
}

#[test]
fn test_protocols_outside_account_list_are_ignored() {
    let addresses = HashMap::from([(DefiProtocol::Liquity, strings(&["0xa"]))]);
    assert!(derive_defi_accounts(&addresses, &[]).is_empty());
    assert!(derive_defi_accounts(&addresses, &[DefiProtocol::Liquity]).is_empty());
}

#[test]
fn test_duplicate_addresses_in_one_protocol_are_listed_once() {
    let addresses = HashMap::from([(DefiProtocol::Aave, strings(&["0xa", "0xa"]))]);
    let accounts = derive_defi_accounts(&addresses, &[]);
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].protocols, vec![DefiProtocol::Aave]);
}

#[test]
fn test_account_serializes_chain_and_protocol_ids() {
    let accounts = derive_defi_accounts(&sample_addresses(), &[DefiProtocol::YearnVaults]);
    let json = serde_json::to_value(&accounts[0]).unwrap();
    assert_eq!(json["address"], "0xa");
    assert_eq!(json["chain"], "ETH");
    assert_eq!(json["protocols"][0], "yearn_vaults");
}
