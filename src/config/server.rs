// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! HTTP server configuration

use serde::{Deserialize, Serialize};

/// Configuration for the dashboard HTTP server.
///
/// ### TLS Configuration
///
/// For HTTPS, both `cert` and `key` must be provided as Base64-encoded PEM
/// files. If either is missing the server runs without TLS, which is the usual
/// setup behind a reverse proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The TCP port the server listens on. Default is 8080.
    #[serde(default = "default_port")]
    pub port: u16,

    /// The network address the server binds to. Default is "127.0.0.1".
    #[serde(default = "default_address")]
    pub address: String,

    /// The server name reported in the `Server` header.
    #[serde(default = "default_name")]
    pub name: String,

    /// SSL/TLS certificate in PEM format, Base64 encoded.
    #[serde(default)]
    pub cert: Option<String>,

    /// SSL/TLS private key in PEM format, Base64 encoded.
    #[serde(default)]
    pub key: Option<String>,

    /// Where the browser lands after the OAuth callback.
    ///
    /// The callback appends `?token=…` or `?error=auth_failed` to this value.
    #[serde(default = "default_app_root")]
    pub app_root: String,

    /// Value of the `Access-Control-Allow-Origin` header.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

fn default_port() -> u16 {
    8080
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_name() -> String {
    format!("NegoDashboard/{}", env!("CARGO_PKG_VERSION"))
}

fn default_app_root() -> String {
    "/".to_string()
}

fn default_allowed_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            address: default_address(),
            name: default_name(),
            cert: None,
            key: None,
            app_root: default_app_root(),
            allowed_origin: default_allowed_origin(),
        }
    }
}
