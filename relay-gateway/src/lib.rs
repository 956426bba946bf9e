//! HTTP gateways for the relay admin-operations proxies.
//!
//! Three independent deployable units share this crate: the bare
//! readiness server, the SonicWall admin gateway, and the directory
//! user-management gateway. Each is a thin chain of entry layer →
//! upstream adapter → response translator; the translator and the
//! adapter readiness slot are the shared pieces.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod directory;
pub mod error;
pub mod firewall;
pub mod hello;
pub mod state;
