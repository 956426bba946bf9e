//! Core types for the relay admin-operations proxies.
//!
//! Defines the shared domain types: response envelopes, the narrowed
//! directory user record, and the startup configuration bundles.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod envelope;
pub mod error;

pub use config::{listen_addr, DirectoryConfig, FirewallConfig, DEFAULT_PORT};
pub use envelope::{ErrorBody, UserPatch, UserSummary};
pub use error::ConfigError;
