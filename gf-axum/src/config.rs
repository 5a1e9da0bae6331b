//! Configuration types for the Axum HTTP server.
//!
//! This module provides configuration options for the REST API server.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};

/// Configuration for the Axum HTTP server.
///
/// # Examples
///
/// ```
/// use gf_axum::config::AxumConfig;
///
/// // Listen on every interface, port 5000
/// let config = AxumConfig::default();
///
/// // Custom configuration
/// let config = AxumConfig {
///     bind_address: "127.0.0.1:3000".parse().unwrap(),
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AxumConfig {
    /// The address to bind the server to
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,
}

/// The port used when none is configured.
pub const DEFAULT_PORT: u16 = 5000;

fn default_bind_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT))
}

impl Default for AxumConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}
