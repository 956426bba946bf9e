//! Live tests against a real SonicWall appliance.
//!
//! These require a reachable appliance and admin credentials.
//! Run with: `cargo test --test firewall_live -- --ignored`

use relay_core::FirewallConfig;
use relay_upstream::{FirewallApi, SonicWallClient};

fn live_config() -> FirewallConfig {
    match FirewallConfig::from_env() {
        Ok(c) => c,
        Err(e) => panic!("set SONICWALL_* before running live tests: {e}"),
    }
}

#[tokio::test]
#[ignore = "requires a reachable SonicWall appliance"]
async fn authenticate_acquires_session_control() {
    let client = SonicWallClient::new(&live_config()).expect("client construction failed");

    let header = client.authenticate().await.expect("auth call failed");
    assert!(
        header.starts_with("Basic "),
        "the appliance issues no token; the Basic header comes back"
    );
}

#[tokio::test]
#[ignore = "requires a reachable SonicWall appliance"]
async fn version_read_reuses_the_same_header() {
    let client = SonicWallClient::new(&live_config()).expect("client construction failed");

    client.authenticate().await.expect("auth call failed");
    let data = client.example_operation().await.expect("version read failed");

    println!("firmware info: {data}");
    assert!(data.is_object() || data.is_string(), "expected a version payload");
}
