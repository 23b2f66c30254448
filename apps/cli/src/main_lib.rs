use std::collections::BTreeMap;
use std::sync::Arc;

use defi_overview_core::overview::{DefiAccount, DefiProtocolSummary};
use defi_overview_core::protocols::DefiProtocol;
use defi_overview_core::status::{Section, Status};
use defi_overview_core::{DefiService, DefiServiceTrait};
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::fixture::{Fixture, FixtureLending, FixtureTaskManager};

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_service(config: &Config) -> anyhow::Result<Arc<DefiService>> {
    let fixture = Fixture::load(&config.fixture_path)?;
    tracing::info!(
        "Loaded fixture {} ({} protocol adapters)",
        config.fixture_path.display(),
        fixture.protocols.len()
    );

    let service = DefiService::builder()
        .with_registry(fixture.registry())
        .with_task_manager(Arc::new(FixtureTaskManager::new(fixture.overview.clone())))
        .with_lending(Arc::new(FixtureLending::new(fixture.protocols)))
        .with_premium(config.premium)
        .build()?;
    Ok(Arc::new(service))
}

/// What the binary prints once the fetch has finished.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub overview: Vec<DefiProtocolSummary>,
    pub accounts: Vec<DefiAccount>,
    pub statuses: BTreeMap<&'static str, Status>,
}

pub fn build_report(service: &DefiService, filter: &[DefiProtocol]) -> Report {
    let statuses = [Section::DefiOverview, Section::DefiBalances]
        .into_iter()
        .chain(DefiProtocol::ALL.into_iter().map(|p| p.balances_section()))
        .map(|section| (section.as_str(), service.status(section)))
        .collect();

    Report {
        overview: service.overview(),
        accounts: service.defi_accounts(filter),
        statuses,
    }
}
