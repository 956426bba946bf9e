//! Axum routes for the directory user-management gateway.
//!
//! Handlers validate presence and shape before any upstream call, then
//! forward to the [`DirectoryApi`] adapter and translate the outcome via
//! the shared table in [`crate::error`].

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use relay_core::{UserPatch, UserSummary};
use relay_upstream::{DirectoryApi, UpstreamError};

use crate::error::{GatewayError, DIRECTORY_MESSAGES};
use crate::hello::health;
use crate::state::ReadySlot;

// ── Shared state ─────────────────────────────────────────────────────────────

type Directory = Arc<ReadySlot<dyn DirectoryApi>>;

// ── Request / response types ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordBody {
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub new_password: Option<String>,
    /// Omitted means `true`: the user must pick a new password at next
    /// login unless the caller explicitly opts out.
    #[serde(default)]
    pub force_password_change: Option<bool>,
}

/// Update body with `suspended` kept as raw JSON so a wrong type is a
/// contract 400, not a generic extractor rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub suspended: Option<Value>,
}

impl UpdateUserBody {
    fn into_patch(self) -> Result<UserPatch, GatewayError> {
        let suspended = match self.suspended {
            None => None,
            Some(Value::Bool(b)) => Some(b),
            Some(_) => {
                return Err(GatewayError::InvalidField {
                    field: "suspended",
                    expected: "a boolean",
                })
            }
        };

        let patch = UserPatch {
            first_name: self.first_name,
            last_name: self.last_name,
            suspended,
        };
        if patch.is_empty() {
            return Err(GatewayError::EmptyUpdate);
        }
        Ok(patch)
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub success: bool,
    pub user: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct UpdateUserResponse {
    pub success: bool,
    pub message: String,
    pub user: UserSummary,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Build the directory gateway router over the adapter slot.
pub fn create_router(directory: Directory) -> Router {
    Router::new()
        .route("/api/change-password", post(change_password))
        .route("/api/user-info/{user_email}", get(user_info))
        .route("/api/user-update/{user_email}", put(update_user))
        .route("/health", get(health))
        .with_state(directory)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// `POST /api/change-password` — set a new password for a user.
///
/// # Errors
/// Returns 400 before any upstream call if `userEmail` or `newPassword`
/// is absent; upstream failures are translated per
/// [`DIRECTORY_MESSAGES`].
pub async fn change_password(
    State(slot): State<Directory>,
    Json(body): Json<ChangePasswordBody>,
) -> Result<impl IntoResponse, GatewayError> {
    let email = required(body.user_email, "userEmail")?;
    let password = required(body.new_password, "newPassword")?;
    let force_change = body.force_password_change.unwrap_or(true);

    let directory = ready(&slot)?;
    directory
        .change_password(&email, &password, force_change)
        .await
        .map_err(directory_error)?;

    let message = if force_change {
        format!("Password for {email} updated; the user must choose a new one at next login")
    } else {
        format!("Password for {email} updated; the user may use it immediately")
    };
    tracing::info!(%email, force_change, "password change forwarded");

    Ok(Json(MessageResponse {
        success: true,
        message,
    }))
}

/// `GET /api/user-info/{userEmail}` — fetch the allow-listed user view.
///
/// # Errors
/// Returns 400 for a blank email; upstream failures are translated per
/// [`DIRECTORY_MESSAGES`] (404 → "User not found").
pub async fn user_info(
    State(slot): State<Directory>,
    Path(user_email): Path<String>,
) -> Result<impl IntoResponse, GatewayError> {
    if user_email.trim().is_empty() {
        return Err(GatewayError::MissingField("userEmail"));
    }

    let directory = ready(&slot)?;
    let user = directory.get_user(&user_email).await.map_err(directory_error)?;

    tracing::info!(email = %user_email, "user lookup forwarded");
    Ok(Json(UserInfoResponse {
        success: true,
        user,
    }))
}

/// `PUT /api/user-update/{userEmail}` — partial update of name and
/// suspension state.
///
/// # Errors
/// Returns 400 before any upstream call when no recognized field is
/// supplied or `suspended` is not a boolean; upstream failures are
/// translated per [`DIRECTORY_MESSAGES`].
pub async fn update_user(
    State(slot): State<Directory>,
    Path(user_email): Path<String>,
    Json(body): Json<UpdateUserBody>,
) -> Result<impl IntoResponse, GatewayError> {
    if user_email.trim().is_empty() {
        return Err(GatewayError::MissingField("userEmail"));
    }
    let patch = body.into_patch()?;

    let directory = ready(&slot)?;
    let user = directory
        .update_user(&user_email, &patch)
        .await
        .map_err(directory_error)?;

    let message = format!(
        "Updated {} for {user_email}",
        patch.changed_fields().join(", ")
    );
    tracing::info!(email = %user_email, fields = ?patch.changed_fields(), "user update forwarded");

    Ok(Json(UpdateUserResponse {
        success: true,
        message,
        user,
    }))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn required(value: Option<String>, field: &'static str) -> Result<String, GatewayError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(GatewayError::MissingField(field))
}

fn ready(slot: &ReadySlot<dyn DirectoryApi>) -> Result<Arc<dyn DirectoryApi>, GatewayError> {
    slot.get().ok_or(GatewayError::NotReady)
}

fn directory_error(source: UpstreamError) -> GatewayError {
    GatewayError::upstream(source, &DIRECTORY_MESSAGES)
}
