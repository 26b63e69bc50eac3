// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! This module provides utility functions for working with configuration
//! settings, including validation and schema output.

use anyhow::{Context, Result};
use base64::Engine;
use log::{debug, warn};
use url::Url;

use super::{Config, CONFIG_SCHEMA};

/// Minimum length of the session signing secret
const MIN_SECRET_LEN: usize = 16;

/// Output the embedded JSON schema to the console.
///
/// This function is called when the `--show-config-schema` flag is provided
/// on the command line.
///
/// # Example
///
/// ```bash
/// ./nego_dashboard --show-config-schema > config_schema.json
/// ```
pub fn output_config_schema() -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

    let formatted_schema =
        serde_json::to_string_pretty(&schema).context("Failed to format JSON schema")?;

    println!("{}", formatted_schema);

    Ok(())
}

/// Check if a string is a valid IP address
///
/// Validates that a string represents a valid IPv4 or IPv6 address,
/// or is one of the special values like "localhost" or "0.0.0.0".
pub fn is_valid_ip_address(addr: &str) -> bool {
    if addr.parse::<std::net::IpAddr>().is_ok() {
        return true;
    }

    matches!(addr, "localhost" | "::" | "::0" | "0.0.0.0")
}

/// Validates the configuration against rules that aren't covered by the JSON schema.
///
/// # Validation Rules
///
/// - **SSL Configuration**: a certificate requires a key (and vice versa), both valid base64
/// - **Port Range**: the server port is within 1-65534
/// - **URLs**: Discord and backend endpoints are absolute URLs
/// - **Timeouts**: outbound timeouts are at least one second
/// - **Session secret**: long enough for HS256
pub fn validate_specific_rules(config: &Config) -> Result<()> {
    debug!("Performing additional validation checks");

    if let Some(cert) = &config.server.cert {
        if config.server.key.is_none() {
            anyhow::bail!("SSL certificate provided without a key");
        }
        base64::engine::general_purpose::STANDARD
            .decode(cert)
            .map(|_| ())
            .context("SSL certificate is not valid base64")?;
    }

    if let Some(key) = &config.server.key {
        if config.server.cert.is_none() {
            anyhow::bail!("SSL key provided without a certificate");
        }
        base64::engine::general_purpose::STANDARD
            .decode(key)
            .map(|_| ())
            .context("SSL key is not valid base64")?;
    }

    if config.server.port < 1 || config.server.port > 65534 {
        anyhow::bail!("Invalid port number: {}", config.server.port);
    }

    if !is_valid_ip_address(&config.server.address) {
        // Hostnames are accepted by Rocket, only flag them
        warn!(
            "Potentially invalid address format: {}",
            config.server.address
        );
    }

    for (name, value) in [
        ("discord.authorize_url", &config.discord.authorize_url),
        ("discord.api_base_url", &config.discord.api_base_url),
        ("discord.redirect_uri", &config.discord.redirect_uri),
        ("backend.api_base_url", &config.backend.api_base_url),
    ] {
        Url::parse(value).with_context(|| format!("{} is not a valid URL: {}", name, value))?;
    }

    if config.discord.timeout_secs == 0 || config.backend.timeout_secs == 0 {
        anyhow::bail!("Outbound timeouts must be at least one second");
    }

    if config.session.jwt_secret.len() < MIN_SECRET_LEN {
        anyhow::bail!(
            "session.jwt_secret must be at least {} characters long",
            MIN_SECRET_LEN
        );
    }

    if config.discord.client_id.is_empty() || config.discord.client_secret.is_empty() {
        warn!("Discord client credentials are not configured, logins will fail");
    }

    Ok(())
}
