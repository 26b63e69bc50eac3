// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Discord OAuth application configuration
//!
//! The defaults point at the public Discord API. Tests and staging setups
//! override `api_base_url` to talk to a mock provider.

use serde::{Deserialize, Serialize};

/// Discord OAuth 2.0 application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// OAuth client identifier of the Discord application.
    #[serde(default)]
    pub client_id: String,

    /// OAuth client secret of the Discord application.
    #[serde(default)]
    pub client_secret: String,

    /// Callback address registered with Discord.
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    /// Authorization endpoint the browser is sent to.
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,

    /// Base URL for the token exchange and `users/@me` calls.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Space separated OAuth scopes.
    #[serde(default = "default_scope")]
    pub scope: String,

    /// Timeout applied to each outbound call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_redirect_uri() -> String {
    "http://localhost:8080/api/_auth/callback".to_string()
}

fn default_authorize_url() -> String {
    "https://discord.com/api/oauth2/authorize".to_string()
}

fn default_api_base_url() -> String {
    "https://discord.com/api".to_string()
}

fn default_scope() -> String {
    "identify guilds".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: default_redirect_uri(),
            authorize_url: default_authorize_url(),
            api_base_url: default_api_base_url(),
            scope: default_scope(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
