//! Startup configuration, read once from the environment.
//!
//! Every deployable unit reads its configuration exactly once before any
//! route becomes reachable; the resulting structs are immutable for the
//! process lifetime. The `from_vars` constructors take a lookup closure so
//! tests never have to mutate the process environment.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Fallback listen port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// Resolve the gateway listen address from `PORT`.
#[must_use]
pub fn listen_addr(lookup: impl Fn(&str) -> Option<String>) -> String {
    let port = lookup("PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
    format!("0.0.0.0:{port}")
}

/// Resolve the gateway listen address from the process environment.
#[must_use]
pub fn listen_addr_from_env() -> String {
    listen_addr(|name| std::env::var(name).ok())
}

/// Connection settings for the SonicWall management API.
///
/// The credential pair is combined into a precomputed Basic-Auth header by
/// the upstream client; the appliance issues no session token, so the same
/// header accompanies every request.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FirewallConfig {
    /// Appliance hostname or IP address.
    pub host: String,

    /// Management API port.
    pub port: u16,

    /// Administrator account name.
    pub user: String,

    /// Administrator password.
    pub password: String,

    /// Skip TLS certificate verification when talking to the appliance.
    ///
    /// Off by default. Only for lab appliances with self-signed
    /// certificates; enabling it is logged at client construction.
    pub accept_invalid_certs: bool,
}

impl FirewallConfig {
    /// Create a configuration with the default management port and full
    /// certificate verification.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: 443,
            user: user.into(),
            password: password.into(),
            accept_invalid_certs: false,
        }
    }

    /// Load the firewall configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingVar`] if `SONICWALL_HOST`,
    /// `SONICWALL_USER`, or `SONICWALL_PASSWORD` is unset, and
    /// [`ConfigError::InvalidVar`] if `SONICWALL_PORT` is not a port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load the firewall configuration through a variable lookup closure.
    ///
    /// # Errors
    /// Same contract as [`FirewallConfig::from_env`].
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = require(&lookup, "SONICWALL_HOST")?;
        let user = require(&lookup, "SONICWALL_USER")?;
        let password = require(&lookup, "SONICWALL_PASSWORD")?;

        let port = match lookup("SONICWALL_PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: "SONICWALL_PORT",
                reason: format!("'{raw}' is not a port number"),
            })?,
            None => 443,
        };

        let accept_invalid_certs = lookup("SONICWALL_ACCEPT_INVALID_CERTS")
            .is_some_and(|v| v == "true" || v == "1");

        Ok(Self {
            host,
            port,
            user,
            password,
            accept_invalid_certs,
        })
    }

    /// Base URL of the appliance management API.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("https://{}:{}", self.host, self.port)
    }
}

/// Settings for the Google Admin Directory upstream.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct DirectoryConfig {
    /// Path to the service-account key file (JSON).
    pub credentials_path: PathBuf,

    /// Workspace admin to impersonate via domain-wide delegation.
    pub admin_email: String,
}

impl DirectoryConfig {
    /// Create a configuration from a key-file path and admin subject.
    #[must_use]
    pub fn new(credentials_path: impl Into<PathBuf>, admin_email: impl Into<String>) -> Self {
        Self {
            credentials_path: credentials_path.into(),
            admin_email: admin_email.into(),
        }
    }

    /// Load the directory configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingVar`] if `GOOGLE_APPLICATION_CREDENTIALS`
    /// or `ADMIN_EMAIL` is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load the directory configuration through a variable lookup closure.
    ///
    /// # Errors
    /// Same contract as [`DirectoryConfig::from_env`].
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let credentials_path = require(&lookup, "GOOGLE_APPLICATION_CREDENTIALS")?.into();
        let admin_email = require(&lookup, "ADMIN_EMAIL")?;
        Ok(Self {
            credentials_path,
            admin_email,
        })
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar { name })
}
