//! Axum routes for the SonicWall admin gateway.

use std::sync::Arc;

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use relay_upstream::FirewallApi;

use crate::error::{GatewayError, FIREWALL_MESSAGES};
use crate::hello::health;

// ── Shared state ─────────────────────────────────────────────────────────────

type Firewall = Arc<dyn FirewallApi>;

// ── Response types ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    /// The Basic header the appliance expects on every follow-up call.
    pub sonicwall_auth_header: String,
}

#[derive(Debug, Serialize)]
pub struct OperationResponse {
    pub success: bool,
    pub message: String,
    pub data: Value,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the firewall gateway router over the given adapter.
pub fn create_router(firewall: Firewall) -> Router {
    Router::new()
        .route("/api/sonicwall/auth", post(authenticate))
        .route("/api/sonicwall/example-operation", post(example_operation))
        .route("/health", get(health))
        .with_state(firewall)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `POST /api/sonicwall/auth` — take config-session control of the
/// appliance.
///
/// The appliance issues no session token; the header returned here must
/// accompany every subsequent call.
///
/// # Errors
/// Translated per [`FIREWALL_MESSAGES`]: 401 invalid credentials, 403
/// admin API disabled or insufficient rights, 500 on transport failure.
pub async fn authenticate(
    State(firewall): State<Firewall>,
) -> Result<impl IntoResponse, GatewayError> {
    let header = firewall
        .authenticate()
        .await
        .map_err(|e| GatewayError::upstream(e, &FIREWALL_MESSAGES))?;

    tracing::info!("session control acquired");
    Ok(Json(AuthResponse {
        success: true,
        message: "Authenticated with the SonicWall appliance".to_owned(),
        sonicwall_auth_header: header,
    }))
}

/// `POST /api/sonicwall/example-operation` — forward a version read,
/// resending the same Basic header.
///
/// # Errors
/// Translated per [`FIREWALL_MESSAGES`].
pub async fn example_operation(
    State(firewall): State<Firewall>,
) -> Result<impl IntoResponse, GatewayError> {
    let data = firewall
        .example_operation()
        .await
        .map_err(|e| GatewayError::upstream(e, &FIREWALL_MESSAGES))?;

    tracing::info!("example operation forwarded");
    Ok(Json(OperationResponse {
        success: true,
        message: "Operation completed".to_owned(),
        data,
    }))
}
