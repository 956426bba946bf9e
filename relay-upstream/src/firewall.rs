//! SonicWall SonicOS management API client.
//!
//! The appliance authenticates every request with HTTP Basic credentials
//! and issues no session token: the "auth" call takes config-session
//! control, and the same precomputed header must accompany every
//! subsequent request.

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use serde_json::Value;

use relay_core::FirewallConfig;

use crate::UpstreamError;

/// Operations the firewall gateway forwards to the appliance.
#[async_trait]
pub trait FirewallApi: Send + Sync {
    /// Take session control of the appliance.
    ///
    /// Returns the Basic-Auth header value on success; the appliance
    /// issues no token, so the caller must resend this header with every
    /// follow-up call.
    ///
    /// # Errors
    /// Returns [`UpstreamError::Status`] when the appliance refuses the
    /// call or reports an in-band failure, and [`UpstreamError::Network`]
    /// when it does not answer at all.
    async fn authenticate(&self) -> Result<String, UpstreamError>;

    /// Read the appliance firmware version, reusing the same header.
    ///
    /// Exists to demonstrate the stateless header-per-request model: no
    /// state from [`FirewallApi::authenticate`] is needed beyond the
    /// header itself.
    ///
    /// # Errors
    /// Same contract as [`FirewallApi::authenticate`].
    async fn example_operation(&self) -> Result<Value, UpstreamError>;
}

/// Client for the SonicOS management API.
#[derive(Debug, Clone)]
pub struct SonicWallClient {
    http: reqwest::Client,
    base_url: String,
    auth_header: String,
}

impl SonicWallClient {
    /// Build a client from the firewall configuration.
    ///
    /// Certificate verification is skipped only when the configuration
    /// explicitly opts in; the bypass is logged so it cannot slip into a
    /// production deployment unnoticed.
    ///
    /// # Errors
    /// Returns [`UpstreamError::Client`] if the TLS backend cannot be
    /// initialized.
    pub fn new(config: &FirewallConfig) -> Result<Self, UpstreamError> {
        if config.accept_invalid_certs {
            tracing::warn!(
                host = %config.host,
                "TLS certificate verification disabled for this appliance"
            );
        }

        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            auth_header: basic_auth_header(&config.user, &config.password),
        })
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, UpstreamError> {
        let url = format!("{}{path}", self.base_url);

        let mut request = self
            .http
            .request(method, &url)
            .header(AUTHORIZATION, &self.auth_header);
        if let Some(body) = body {
            request = request.json(&body);
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

        if text.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }
}

#[async_trait]
impl FirewallApi for SonicWallClient {
    async fn authenticate(&self) -> Result<String, UpstreamError> {
        let body = self
            .call(
                Method::POST,
                "/api/sonicos/auth",
                Some(serde_json::json!({ "override": true })),
            )
            .await?;

        // SonicOS can answer 200 and still refuse in-band.
        if !control_granted(&body) {
            return Err(UpstreamError::Status {
                status: 200,
                body: body.to_string(),
            });
        }

        tracing::info!(url = %self.base_url, "config-session control acquired");
        Ok(self.auth_header.clone())
    }

    async fn example_operation(&self) -> Result<Value, UpstreamError> {
        let body = self.call(Method::GET, "/api/sonicos/version", None).await?;
        tracing::info!(url = %self.base_url, "firmware version read");
        Ok(body)
    }
}

/// Precompute the RFC 7617 Basic-Auth header value.
#[must_use]
pub fn basic_auth_header(user: &str, password: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{password}"));
    format!("Basic {encoded}")
}

/// Whether a SonicOS response body reports in-band success.
fn control_granted(body: &Value) -> bool {
    body.pointer("/status/success")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_header_matches_rfc_7617_encoding() {
        // base64("admin:password") = YWRtaW46cGFzc3dvcmQ=
        let header = basic_auth_header("admin", "password");
        assert_eq!(header, "Basic YWRtaW46cGFzc3dvcmQ=");
    }

    #[test]
    fn control_granted_reads_the_sonicos_status_flag() {
        let granted = serde_json::json!({
            "status": {
                "success": true,
                "info": [{ "level": "info", "code": "E_OK", "message": "Success." }]
            }
        });
        assert!(control_granted(&granted));

        let refused = serde_json::json!({
            "status": { "success": false }
        });
        assert!(!control_granted(&refused));

        assert!(
            !control_granted(&Value::Null),
            "a body without the flag must not count as granted"
        );
    }

    #[test]
    fn client_keeps_configured_base_url() {
        let mut config = relay_core::FirewallConfig::new("fw.example.net", "admin", "password");
        config.port = 8443;
        let client = match SonicWallClient::new(&config) {
            Ok(c) => c,
            Err(e) => panic!("client construction failed: {e}"),
        };
        assert_eq!(client.base_url, "https://fw.example.net:8443");
        assert!(client.auth_header.starts_with("Basic "));
    }
}
