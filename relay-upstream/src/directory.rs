//! Google Admin Directory API client.
//!
//! One method per forwarded operation, each a single round trip against
//! the directory's user resource. Responses are narrowed to the
//! allow-listed [`UserSummary`] before they leave this module — the raw
//! upstream record never crosses the adapter boundary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

use relay_core::{DirectoryConfig, UserPatch, UserSummary};

use crate::token::{ServiceAccountKey, TokenSource};
use crate::UpstreamError;

const DIRECTORY_BASE_URL: &str = "https://admin.googleapis.com/admin/directory/v1";

/// User-management operations the directory gateway forwards upstream.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Set a new password for the user, optionally forcing a change at
    /// next login.
    ///
    /// # Errors
    /// Returns [`UpstreamError::Status`] for upstream refusals (404 for an
    /// unknown user, 403 for missing delegation) and
    /// [`UpstreamError::Network`] when the directory does not answer.
    async fn change_password(
        &self,
        email: &str,
        new_password: &str,
        force_change: bool,
    ) -> Result<(), UpstreamError>;

    /// Fetch the user record, narrowed to the allow-listed summary.
    ///
    /// # Errors
    /// Same contract as [`DirectoryApi::change_password`].
    async fn get_user(&self, email: &str) -> Result<UserSummary, UpstreamError>;

    /// Apply a partial update and return the narrowed updated record.
    ///
    /// The wire body contains only the fields the patch supplies.
    ///
    /// # Errors
    /// Same contract as [`DirectoryApi::change_password`].
    async fn update_user(
        &self,
        email: &str,
        patch: &UserPatch,
    ) -> Result<UserSummary, UpstreamError>;
}

/// Client for the Admin Directory `users` resource.
pub struct GoogleDirectoryClient {
    http: reqwest::Client,
    tokens: TokenSource,
    base_url: String,
}

impl GoogleDirectoryClient {
    /// Load the service-account key, build the token source, and perform
    /// the initial token fetch.
    ///
    /// Fails here — not on the first request — so a misconfigured
    /// deployment dies at startup instead of serving degraded traffic.
    ///
    /// # Errors
    /// Returns [`UpstreamError::Io`] / [`UpstreamError::Credential`] for
    /// key-file problems and [`UpstreamError::Network`] if the token
    /// endpoint is unreachable.
    pub async fn connect(config: &DirectoryConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::new();
        let key = ServiceAccountKey::load(&config.credentials_path).await?;
        let tokens = TokenSource::new(http.clone(), key, config.admin_email.clone())?;
        tokens.bearer().await?;

        tracing::info!(subject = %config.admin_email, "directory client authenticated");

        Ok(Self {
            http,
            tokens,
            base_url: DIRECTORY_BASE_URL.to_owned(),
        })
    }

    fn user_url(&self, email: &str) -> String {
        format!("{}/users/{email}", self.base_url)
    }

    async fn call(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<String, UpstreamError> {
        let bearer = self.tokens.bearer().await?;

        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(bearer)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::network(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| UpstreamError::network(&e))?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl DirectoryApi for GoogleDirectoryClient {
    async fn change_password(
        &self,
        email: &str,
        new_password: &str,
        force_change: bool,
    ) -> Result<(), UpstreamError> {
        let body = serde_json::json!({
            "password": new_password,
            "changePasswordAtNextLogin": force_change,
        });

        self.call(Method::PUT, &self.user_url(email), Some(&body))
            .await?;

        tracing::info!(%email, force_change, "password updated");
        Ok(())
    }

    async fn get_user(&self, email: &str) -> Result<UserSummary, UpstreamError> {
        let text = self.call(Method::GET, &self.user_url(email), None).await?;
        let user = parse_user(&text)?;

        tracing::info!(%email, "user record fetched");
        Ok(user)
    }

    async fn update_user(
        &self,
        email: &str,
        patch: &UserPatch,
    ) -> Result<UserSummary, UpstreamError> {
        let body = update_body(patch);
        let text = self
            .call(Method::PUT, &self.user_url(email), Some(&body))
            .await?;
        let user = parse_user(&text)?;

        tracing::info!(%email, fields = ?patch.changed_fields(), "user record updated");
        Ok(user)
    }
}

/// The subset of the upstream user record this adapter reads.
///
/// Unknown upstream fields are dropped at deserialization, which is what
/// enforces the allow-list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    id: String,
    primary_email: String,
    #[serde(default)]
    name: RawName,
    #[serde(default)]
    org_unit_path: String,
    #[serde(default)]
    suspended: bool,
    creation_time: Option<DateTime<Utc>>,
    last_login_time: Option<DateTime<Utc>>,
    #[serde(default)]
    is_delegated_admin: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawName {
    given_name: Option<String>,
    family_name: Option<String>,
    full_name: Option<String>,
}

fn parse_user(text: &str) -> Result<UserSummary, UpstreamError> {
    let raw: RawUser = serde_json::from_str(text)
        .map_err(|e| UpstreamError::Payload(format!("user record: {e}")))?;
    Ok(narrow(raw))
}

/// Narrow the upstream record to the allow-listed summary.
fn narrow(raw: RawUser) -> UserSummary {
    let name = raw.name.full_name.unwrap_or_else(|| {
        let given = raw.name.given_name.unwrap_or_default();
        let family = raw.name.family_name.unwrap_or_default();
        format!("{given} {family}").trim().to_owned()
    });

    UserSummary {
        id: raw.id,
        primary_email: raw.primary_email,
        name,
        org_unit_path: raw.org_unit_path,
        suspended: raw.suspended,
        creation_time: raw.creation_time,
        last_login_time: raw.last_login_time,
        is_delegated_admin: raw.is_delegated_admin,
    }
}

/// Build the partial-update wire body from a patch.
///
/// `firstName`/`lastName` nest under the upstream's `name` object; only
/// supplied fields appear at all.
fn update_body(patch: &UserPatch) -> Value {
    let mut name = serde_json::Map::new();
    if let Some(given) = &patch.first_name {
        name.insert("givenName".to_owned(), Value::String(given.clone()));
    }
    if let Some(family) = &patch.last_name {
        name.insert("familyName".to_owned(), Value::String(family.clone()));
    }

    let mut body = serde_json::Map::new();
    if !name.is_empty() {
        body.insert("name".to_owned(), Value::Object(name));
    }
    if let Some(suspended) = patch.suspended {
        body.insert("suspended".to_owned(), Value::Bool(suspended));
    }
    Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RECORD: &str = r#"{
        "kind": "admin#directory#user",
        "id": "103331503342306717121",
        "etag": "\"abc\"",
        "primaryEmail": "jane@example.com",
        "name": {
            "givenName": "Jane",
            "familyName": "Doe",
            "fullName": "Jane Doe"
        },
        "isAdmin": false,
        "isDelegatedAdmin": true,
        "lastLoginTime": "2026-07-30T08:15:00.000Z",
        "creationTime": "2021-02-11T09:00:00.000Z",
        "agreedToTerms": true,
        "suspended": false,
        "archived": false,
        "changePasswordAtNextLogin": false,
        "emails": [{ "address": "jane@example.com", "primary": true }],
        "aliases": ["jd@example.com"],
        "customerId": "C0123abcd",
        "orgUnitPath": "/Engineering",
        "recoveryEmail": "jane.personal@example.net"
    }"#;

    #[test]
    fn narrowing_keeps_only_the_allow_listed_keys() {
        let user = match parse_user(FULL_RECORD) {
            Ok(u) => u,
            Err(e) => panic!("parse failed: {e}"),
        };
        let json = match serde_json::to_value(&user) {
            Ok(v) => v,
            Err(e) => panic!("serialization failed: {e}"),
        };
        let obj = match json.as_object() {
            Some(o) => o,
            None => panic!("summary must be an object"),
        };

        let allow_list = [
            "id",
            "primaryEmail",
            "name",
            "orgUnitPath",
            "suspended",
            "creationTime",
            "lastLoginTime",
            "isDelegatedAdmin",
        ];
        for key in obj.keys() {
            assert!(
                allow_list.contains(&key.as_str()),
                "key '{key}' is outside the allow-list"
            );
        }
        // The record above carries aliases, recoveryEmail, etc. None of
        // them may survive narrowing.
        assert!(obj.get("aliases").is_none());
        assert!(obj.get("recoveryEmail").is_none());
        assert!(obj.get("customerId").is_none());
    }

    #[test]
    fn narrowing_composes_the_full_name() {
        let user = match parse_user(FULL_RECORD) {
            Ok(u) => u,
            Err(e) => panic!("parse failed: {e}"),
        };
        assert_eq!(user.name, "Jane Doe");
        assert!(user.is_delegated_admin);
        assert_eq!(user.org_unit_path, "/Engineering");
    }

    #[test]
    fn narrowing_falls_back_to_given_and_family_name() {
        let raw: RawUser = match serde_json::from_str(
            r#"{"id": "1", "primaryEmail": "a@b.c", "name": {"givenName": "Ada"}}"#,
        ) {
            Ok(r) => r,
            Err(e) => panic!("parse failed: {e}"),
        };
        let user = narrow(raw);
        assert_eq!(user.name, "Ada", "missing family name must not leave a trailing space");
    }

    #[test]
    fn malformed_record_is_a_payload_error() {
        let result = parse_user("{\"primaryEmail\": 7}");
        assert!(matches!(result, Err(UpstreamError::Payload(_))));
    }

    #[test]
    fn update_body_contains_only_supplied_fields() {
        let patch = UserPatch {
            first_name: Some("Jane".to_owned()),
            last_name: None,
            suspended: Some(true),
        };
        let body = update_body(&patch);
        assert_eq!(body["name"]["givenName"], "Jane");
        assert!(
            body["name"].get("familyName").is_none(),
            "unsupplied name parts must be omitted"
        );
        assert_eq!(body["suspended"], true);
    }

    #[test]
    fn update_body_omits_name_object_when_no_name_fields() {
        let patch = UserPatch {
            first_name: None,
            last_name: None,
            suspended: Some(false),
        };
        let body = update_body(&patch);
        assert!(body.get("name").is_none());
        assert_eq!(body["suspended"], false);
    }
}
