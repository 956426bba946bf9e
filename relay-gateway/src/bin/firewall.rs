//! Entry point for the `relay-firewall` SonicWall admin gateway.

use std::sync::Arc;

use relay_core::FirewallConfig;
use relay_gateway::firewall;
use relay_upstream::{FirewallApi, SonicWallClient};
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match FirewallConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "firewall configuration incomplete");
            std::process::exit(1);
        }
    };

    let client = match SonicWallClient::new(&config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "failed to build SonicWall client");
            std::process::exit(1);
        }
    };
    let client: Arc<dyn FirewallApi> = Arc::new(client);

    let addr = relay_core::config::listen_addr_from_env();
    let app = firewall::create_router(client);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, appliance = %config.host, "relay-firewall listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
