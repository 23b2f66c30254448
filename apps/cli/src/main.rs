mod config;
mod fixture;
mod main_lib;

use config::Config;
use defi_overview_core::protocols::DefiProtocol;
use defi_overview_core::{spawn_entitlement_listener, DefiServiceTrait};
use main_lib::{build_report, build_service, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_format);

    let service = build_service(&config)?;
    let _entitlement_listener = spawn_entitlement_listener(&service);

    service.spawn_fetch_all_defi(config.refresh).await?;
    if config.premium {
        service.reset_db(&DefiProtocol::ALL).await?;
    }

    let report = build_report(&service, &config.protocol_filter);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
