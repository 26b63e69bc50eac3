// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management for the dashboard server
//!
//! This module provides functionality for loading, validating, and applying
//! configuration settings. The configuration is backed by a YAML file and
//! validated against a JSON schema before being deserialized.
//!
//! ## Configuration Structure
//!
//! - `server`: Settings for the HTTP server (binding, TLS, redirect root, CORS)
//! - `discord`: OAuth application credentials and Discord endpoints
//! - `session`: Session token signing settings
//! - `backend`: Location of the external data backend
//!
//! ## Override order
//!
//! File values are overridden by environment variables ([`Config::apply_env`]),
//! which are in turn overridden by command line arguments ([`Config::apply_args`]).
//!
//! ## Usage
//!
//! ```no_run
//! use nego_dashboard::config::Config;
//! use std::path::Path;
//!
//! // Load config from file, creates a default if not found
//! let mut config = Config::from_file(Path::new("config.yaml")).unwrap();
//! config.apply_env();
//! config.apply_args(Some(8081), None, None, None);
//!
//! println!("Server port: {}", config.server.port);
//! ```

pub mod backend;
pub mod discord;
pub mod server;
pub mod session;
pub mod utils;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, error};
use serde::{Deserialize, Serialize};

pub use backend::BackendConfig;
pub use discord::DiscordConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;
pub use utils::{is_valid_ip_address, output_config_schema, validate_specific_rules};

/// JSON schema every configuration file is validated against
pub const CONFIG_SCHEMA: &str = include_str!("../../resources/config.schema.json");

/// Root configuration structure for the dashboard server.
///
/// Each section uses default values when not explicitly specified in the
/// configuration file, so an empty file is a valid (development) configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Discord OAuth application settings.
    ///
    /// The client secret is required for the code exchange; the default is
    /// empty and must be provided through the file or `DISCORD_CLIENT_SECRET`.
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Session token signing settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// External data backend settings.
    #[serde(default)]
    pub backend: BackendConfig,
}

impl Config {
    /// Helper method to create a sample config file when validation fails
    fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let sample_path = path.with_extension("sample.yaml");
        debug!("Creating sample configuration file at {:?}", sample_path);

        if let Some(parent) = sample_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create parent directory for sample config at {:?}",
                        parent
                    )
                })?;
            }
        }

        Self::default()
            .save_to_file(&sample_path)
            .with_context(|| format!("Failed to save sample config to {:?}", sample_path))?;

        error!(
            "Sample configuration file created at {:?}\nPlease edit and rename it",
            sample_path
        );
        Ok(())
    }

    /// Load configuration from a file
    ///
    /// A missing file is created with default values. A file that fails schema
    /// validation, deserialization or [`validate_specific_rules`] produces a
    /// `*.sample.yaml` file next to it and an error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "Configuration file not found at {:?}, creating default",
                path
            );
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;

        let config = Self::from_yaml_str(&contents).map_err(|err| {
            if let Err(sample_err) = Self::create_sample_config(path) {
                error!("Failed to create sample config: {}", sample_err);
            }
            err.context(format!("Invalid configuration in {}", path.display()))
        })?;

        Ok(config)
    }

    /// Parse, schema-validate and rule-check a YAML document
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        // An empty document is a valid configuration made only of defaults
        let yaml_value: serde_yml::Value = if contents.trim().is_empty() {
            serde_yml::Value::Mapping(Default::default())
        } else {
            serde_yml::from_str(contents).context("Failed to parse YAML configuration")?
        };

        let json_value = serde_json::to_value(&yaml_value)
            .context("Failed to convert YAML to JSON for validation")?;

        let schema: serde_json::Value =
            serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

        let validator = jsonschema::draft202012::options()
            .should_validate_formats(true)
            .build(&schema)?;

        debug!("Validating configuration against schema");
        if let Err(error) = validator.validate(&json_value) {
            error!("Configuration validation error before deserialization");
            anyhow::bail!("Configuration validation failed: {}", error);
        }

        let config: Config = serde_json::from_value(json_value)
            .context("Failed to deserialize configuration")?;

        validate_specific_rules(&config)?;

        Ok(config)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml =
            serde_yml::to_string(self).context("Failed to serialize configuration to YAML")?;

        let mut file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create config file at {:?}", path.as_ref()))?;

        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Apply the deployment environment variables used by the dashboard.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `DISCORD_CLIENT_ID` | `discord.client_id` |
    /// | `DISCORD_CLIENT_SECRET` | `discord.client_secret` |
    /// | `DISCORD_REDIRECT_URL` | `discord.redirect_uri` |
    /// | `JWT_SECRET` | `session.jwt_secret` |
    /// | `NEXT_PUBLIC_API_URL` | `backend.api_base_url` |
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Same as [`Config::apply_env`] with an explicit variable lookup
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(client_id) = non_empty("DISCORD_CLIENT_ID") {
            debug!("Overriding Discord client id from environment");
            self.discord.client_id = client_id;
        }
        if let Some(client_secret) = non_empty("DISCORD_CLIENT_SECRET") {
            debug!("Overriding Discord client secret from environment");
            self.discord.client_secret = client_secret;
        }
        if let Some(redirect_uri) = non_empty("DISCORD_REDIRECT_URL") {
            debug!("Overriding Discord redirect uri from environment: {}", redirect_uri);
            self.discord.redirect_uri = redirect_uri;
        }
        if let Some(secret) = non_empty("JWT_SECRET") {
            debug!("Overriding JWT secret from environment");
            self.session.jwt_secret = secret;
        }
        if let Some(api_url) = non_empty("NEXT_PUBLIC_API_URL") {
            debug!("Overriding backend url from environment: {}", api_url);
            self.backend.api_base_url = api_url;
        }
    }

    /// Apply command line arguments to override configuration values.
    ///
    /// Only arguments that were explicitly provided override the existing
    /// configuration.
    ///
    /// # Parameters
    ///
    /// * `web_port` - TCP port for the HTTP server
    /// * `web_address` - Network address for the HTTP server to bind to
    /// * `jwt_secret` - Secret used to sign session tokens
    /// * `backend_url` - Base URL of the external data backend
    pub fn apply_args(
        &mut self,
        web_port: Option<u16>,
        web_address: Option<String>,
        jwt_secret: Option<String>,
        backend_url: Option<String>,
    ) {
        if let Some(web_port) = web_port {
            debug!("Overriding port from command line: {}", web_port);
            self.server.port = web_port;
        }

        if let Some(web_address) = web_address {
            debug!("Overriding address from command line: {}", web_address);
            self.server.address = web_address;
        }

        if let Some(secret) = jwt_secret {
            debug!("Overriding JWT secret from command line");
            self.session.jwt_secret = secret;
        }

        if let Some(backend_url) = backend_url {
            debug!("Overriding backend url from command line: {}", backend_url);
            self.backend.api_base_url = backend_url;
        }
    }

    /// Run the schema-independent validation rules on an in-memory configuration
    pub fn validate(&self) -> Result<()> {
        validate_specific_rules(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::from_yaml_str("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.discord.scope, "identify guilds");
        assert_eq!(config.backend.timeout_secs, 5);
    }

    #[test]
    fn schema_rejects_unknown_sections() {
        let err = Config::from_yaml_str("unknown:\n  value: 1\n").unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn environment_overrides_are_applied() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("DISCORD_CLIENT_ID", "1234"),
            ("DISCORD_CLIENT_SECRET", "s3cret"),
            ("DISCORD_REDIRECT_URL", "https://nego.example/api/_auth/callback"),
            ("JWT_SECRET", "a-long-enough-jwt-secret"),
            ("NEXT_PUBLIC_API_URL", "https://backend.example"),
        ]);
        let mut config = Config::default();
        config.apply_env_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.discord.client_id, "1234");
        assert_eq!(config.discord.client_secret, "s3cret");
        assert_eq!(
            config.discord.redirect_uri,
            "https://nego.example/api/_auth/callback"
        );
        assert_eq!(config.session.jwt_secret, "a-long-enough-jwt-secret");
        assert_eq!(config.backend.api_base_url, "https://backend.example");
    }

    #[test]
    fn empty_environment_values_are_ignored() {
        let mut config = Config::default();
        let before = config.session.jwt_secret.clone();
        config.apply_env_from(|key| (key == "JWT_SECRET").then(String::new));
        assert_eq!(config.session.jwt_secret, before);
    }
}
