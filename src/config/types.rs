//! Configuration types for the increment service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::models::NewPolicy;

/// HTTP and storage settings from `server.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind, e.g. "0.0.0.0".
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Frontend origin allowed by CORS.
    pub cors_origin: String,
    /// Path to the SQLite database file.
    pub database_path: String,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// Seed policies file structure (`policies.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct PoliciesConfig {
    /// Policy bands inserted into an empty store, in priority order.
    #[serde(default)]
    pub policies: Vec<NewPolicy>,
}

/// The complete application configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct AppConfig {
    server: ServerConfig,
    default_policies: Vec<NewPolicy>,
}

impl AppConfig {
    /// Creates a new AppConfig from its component parts.
    pub fn new(server: ServerConfig, default_policies: Vec<NewPolicy>) -> Self {
        Self {
            server,
            default_policies,
        }
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Returns mutable server settings, for command-line overrides.
    pub fn server_mut(&mut self) -> &mut ServerConfig {
        &mut self.server
    }

    /// Returns the policies seeded into an empty store.
    pub fn default_policies(&self) -> &[NewPolicy] {
        &self.default_policies
    }
}
