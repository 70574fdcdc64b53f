//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::NewPolicy;

use super::types::{AppConfig, PoliciesConfig, ServerConfig};

/// Loads and provides access to the service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── server.yaml    # Bind address, port, CORS origin, database path
/// └── policies.yaml  # Policy bands seeded into an empty store
/// ```
///
/// # Example
///
/// ```no_run
/// use increment_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("Listening on port {}", loader.server().port);
/// # Ok::<(), increment_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing or is not valid YAML for
    /// its structure, or if a seed policy fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let server = Self::load_yaml::<ServerConfig>(&path.join("server.yaml"))?;

        let policies_path = path.join("policies.yaml");
        let policies = Self::load_yaml::<PoliciesConfig>(&policies_path)?.policies;
        Self::validate_policies(&policies_path, &policies)?;

        Ok(Self {
            config: AppConfig::new(server, policies),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Rejects seed policies that the API itself would refuse.
    fn validate_policies(path: &Path, policies: &[NewPolicy]) -> EngineResult<()> {
        for (index, policy) in policies.iter().enumerate() {
            policy
                .validate()
                .map_err(|e| EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("policy #{}: {}", index + 1, e),
                })?;
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns mutable configuration, for command-line overrides.
    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        self.config.server()
    }

    /// Returns the policies seeded into an empty store.
    pub fn default_policies(&self) -> &[NewPolicy] {
        self.config.default_policies()
    }
}
