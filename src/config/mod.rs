//! Configuration loading and management for the Increment Engine.
//!
//! This module loads the service configuration from YAML files: server
//! settings and the default policy bands seeded into an empty store.
//!
//! # Example
//!
//! ```no_run
//! use increment_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Database: {}", config.server().database_path);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, PoliciesConfig, ServerConfig};
