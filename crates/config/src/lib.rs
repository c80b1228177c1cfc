//! Connection configuration for the rack-scale management client.
//!
//! This crate provides the configuration types and a loader that merges
//! explicit settings, environment variables and an optional `.env` file.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{Config, ConnectionConfig};
