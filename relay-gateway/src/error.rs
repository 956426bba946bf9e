//! Error types and the upstream-outcome translator for the gateways.
//!
//! One translator serves every handler. The only thing that differs
//! between the firewall and directory gateways is a small table mapping
//! upstream status codes to operator-facing messages.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use relay_core::ErrorBody;
use relay_upstream::UpstreamError;

/// Status-to-message table for one upstream adapter.
#[derive(Debug)]
pub struct MessageTable {
    /// Message for upstream 401 responses.
    pub unauthorized: &'static str,
    /// Message for upstream 403 responses.
    pub forbidden: &'static str,
    /// Message for upstream 404 responses, where the adapter has a
    /// meaningful not-found case.
    pub not_found: Option<&'static str>,
    /// Prefix for no-response transport failures.
    pub connect: &'static str,
}

/// Messages for the SonicWall adapter.
pub static FIREWALL_MESSAGES: MessageTable = MessageTable {
    unauthorized: "Authentication failed: invalid SonicWall credentials",
    forbidden: "Access denied: verify that the SonicOS API is enabled and the account has admin rights",
    not_found: None,
    connect: "Error connecting to SonicWall",
};

/// Messages for the Google Admin Directory adapter.
pub static DIRECTORY_MESSAGES: MessageTable = MessageTable {
    unauthorized: "Authentication with the directory service failed",
    forbidden: "Insufficient permissions: check domain-wide delegation and granted scopes",
    not_found: Some("User not found"),
    connect: "Error reaching the directory service",
};

/// Errors that can occur during gateway request handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// A required request field is absent or blank.
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    /// A request field has the wrong type.
    #[error("field '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// An update request supplied none of the recognized fields.
    #[error("no updatable fields supplied; expected firstName, lastName, or suspended")]
    EmptyUpdate,

    /// The upstream adapter has not finished initializing.
    #[error("directory client not initialized")]
    NotReady,

    /// An error propagated from the upstream adapter.
    #[error("{source}")]
    Upstream {
        source: UpstreamError,
        messages: &'static MessageTable,
    },
}

impl GatewayError {
    /// Attach the adapter's message table to an upstream failure.
    #[must_use]
    pub fn upstream(source: UpstreamError, messages: &'static MessageTable) -> Self {
        Self::Upstream { source, messages }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, body) = translate(&self);
        tracing::warn!(status = %status, message = %body.message, "request failed");
        (status, Json(body)).into_response()
    }
}

fn translate(err: &GatewayError) -> (StatusCode, ErrorBody) {
    match err {
        GatewayError::MissingField(_)
        | GatewayError::InvalidField { .. }
        | GatewayError::EmptyUpdate => (StatusCode::BAD_REQUEST, ErrorBody::new(err.to_string())),
        GatewayError::NotReady => {
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(err.to_string()))
        }
        GatewayError::Upstream { source, messages } => translate_upstream(source, messages),
    }
}

/// Map an adapter failure to a response, driven by the adapter's table.
pub fn translate_upstream(source: &UpstreamError, messages: &MessageTable) -> (StatusCode, ErrorBody) {
    match source {
        UpstreamError::Status { status, body } => translate_status(*status, body, messages),
        UpstreamError::Network(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::new(format!("{}: {source}", messages.connect)),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::new(other.to_string()),
        ),
    }
}

fn translate_status(status: u16, body: &str, messages: &MessageTable) -> (StatusCode, ErrorBody) {
    let details = detail_value(body);
    match status {
        401 => (
            StatusCode::UNAUTHORIZED,
            ErrorBody::with_details(messages.unauthorized, details),
        ),
        403 => (
            StatusCode::FORBIDDEN,
            ErrorBody::with_details(messages.forbidden, details),
        ),
        404 if messages.not_found.is_some() => (
            StatusCode::NOT_FOUND,
            ErrorBody::new(messages.not_found.unwrap_or("Not found")),
        ),
        // A 2xx here means the upstream reported failure in-band.
        200..=299 => (
            StatusCode::BAD_GATEWAY,
            ErrorBody::with_details("Upstream reported failure", details),
        ),
        other => {
            let code = StatusCode::from_u16(other).unwrap_or(StatusCode::BAD_GATEWAY);
            let message = code.canonical_reason().unwrap_or("Upstream error");
            (code, ErrorBody::with_details(message, details))
        }
    }
}

/// Pass the upstream body through as structured JSON when it parses,
/// or as a plain string when it does not.
fn detail_value(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_owned()))
}
