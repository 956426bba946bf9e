//! Wire envelopes shared by the relay gateways.
//!
//! Success payloads are route-specific, but every failure uses the same
//! [`ErrorBody`] shape, and every directory route that exposes a user does
//! so through the allow-listed [`UserSummary`] — never the raw upstream
//! record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed-shape failure envelope returned by every route.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always `false` for failures.
    pub success: bool,
    /// Human-readable description of what went wrong.
    pub message: String,
    /// Upstream response body, when one was received.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Build a failure envelope without upstream details.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            details: None,
        }
    }

    /// Build a failure envelope carrying the upstream response body.
    #[must_use]
    pub fn with_details(message: impl Into<String>, details: serde_json::Value) -> Self {
        Self {
            success: false,
            message: message.into(),
            details: Some(details),
        }
    }
}

/// The allow-listed view of a directory user.
///
/// Responses expose exactly these keys. Anything else the upstream record
/// carries (aliases, custom schemas, recovery contacts) is dropped during
/// narrowing so unlisted fields can never leak to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Upstream-assigned immutable user id.
    pub id: String,
    /// Primary email address (the lookup key).
    pub primary_email: String,
    /// Composed full name.
    pub name: String,
    /// Organizational unit path.
    pub org_unit_path: String,
    /// Whether the account is suspended.
    pub suspended: bool,
    /// When the account was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    /// Last interactive login, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_time: Option<DateTime<Utc>>,
    /// Whether the user holds delegated admin rights.
    pub is_delegated_admin: bool,
}

/// Partial update for a directory user.
///
/// Only the supplied fields are sent upstream; an empty patch is rejected
/// by the gateway before any network call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New given name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New suspension state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
}

impl UserPatch {
    /// `true` if no recognized field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.suspended.is_none()
    }

    /// Names of the fields this patch will change, for operator-facing
    /// messages ("Updated first name, suspension state for ...").
    #[must_use]
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.first_name.is_some() {
            fields.push("first name");
        }
        if self.last_name.is_some() {
            fields.push("last name");
        }
        if self.suspended.is_some() {
            fields.push("suspension state");
        }
        fields
    }
}
