//! Configuration for the `DashScope` chat adapter
//!
//! Loaded once at startup from TOML, with `{{ env.VAR }}` expansion so
//! secrets stay out of config files.

#![allow(clippy::must_use_candidate)]

pub mod client;
mod env;
pub mod reflection;

use std::path::Path;

use serde::Deserialize;

pub use client::ClientConfig;
pub use reflection::ReflectionConfig;

/// Top-level adapter configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// `DashScope` connection settings
    #[serde(default)]
    pub client: ClientConfig,
    /// Reflection (self-critique) settings
    #[serde(default)]
    pub reflection: ReflectionConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, or TOML parsing fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded = env::expand_env(&raw)
            .map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self =
            toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        Ok(config)
    }
}
