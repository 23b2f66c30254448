use std::path::PathBuf;

use anyhow::Context;
use defi_overview_core::protocols::DefiProtocol;

pub struct Config {
    pub fixture_path: PathBuf,
    pub premium: bool,
    pub refresh: bool,
    pub protocol_filter: Vec<DefiProtocol>,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let fixture_path = std::env::var("DEFI_FIXTURE_PATH")
            .unwrap_or_else(|_| "./fixtures/overview.json".into())
            .into();
        let premium = parse_bool(std::env::var("DEFI_PREMIUM").ok().as_deref());
        let refresh = parse_bool(std::env::var("DEFI_REFRESH").ok().as_deref());
        let protocol_filter = parse_protocol_filter(
            &std::env::var("DEFI_PROTOCOL_FILTER").unwrap_or_default(),
        )
        .context("Invalid DEFI_PROTOCOL_FILTER")?;
        let log_format = std::env::var("DEFI_LOG_FORMAT").unwrap_or_else(|_| "text".into());
        Ok(Self {
            fixture_path,
            premium,
            refresh,
            protocol_filter,
            log_format,
        })
    }
}

fn parse_bool(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

/// Parses a comma-separated list of protocol ids. Blank entries are skipped.
fn parse_protocol_filter(value: &str) -> anyhow::Result<Vec<DefiProtocol>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<DefiProtocol>().map_err(anyhow::Error::new))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool(Some("true")));
        assert!(parse_bool(Some(" YES ")));
        assert!(parse_bool(Some("1")));
        assert!(!parse_bool(Some("0")));
        assert!(!parse_bool(Some("premium")));
        assert!(!parse_bool(None));
    }

    #[test]
    fn test_parse_protocol_filter() {
        let filter = parse_protocol_filter("aave, yearn_vaults_v2,,").unwrap();
        assert_eq!(
            filter,
            vec![DefiProtocol::Aave, DefiProtocol::YearnVaultsV2]
        );
        assert!(parse_protocol_filter("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_protocol_filter_rejects_unknown_ids() {
        let err = parse_protocol_filter("aave,uniswap").unwrap_err();
        assert!(err.to_string().contains("uniswap"));
    }
}
