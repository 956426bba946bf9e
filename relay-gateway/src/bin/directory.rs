//! Entry point for the `relay-directory` user-management gateway.
//!
//! The directory client must authenticate before any route becomes
//! reachable; if the startup token fetch fails the process exits rather
//! than serving degraded traffic.

use std::sync::Arc;

use relay_core::DirectoryConfig;
use relay_gateway::{directory, state::ReadySlot};
use relay_upstream::{DirectoryApi, GoogleDirectoryClient};
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match DirectoryConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "directory configuration incomplete");
            std::process::exit(1);
        }
    };

    let slot: Arc<ReadySlot<dyn DirectoryApi>> = Arc::new(ReadySlot::empty());
    let app = directory::create_router(slot.clone());

    // Complete the async initialization before binding; routes only
    // become reachable with a ready adapter behind them.
    let client = match GoogleDirectoryClient::connect(&config).await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "directory client initialization failed");
            std::process::exit(1);
        }
    };
    slot.install(Arc::new(client));

    let addr = relay_core::config::listen_addr_from_env();

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, subject = %config.admin_email, "relay-directory listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
