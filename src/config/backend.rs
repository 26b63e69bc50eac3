// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! External data backend configuration

use serde::{Deserialize, Serialize};

/// Location of the backend that owns balances, card collections and
/// battlepass progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL, without trailing `/api`.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Timeout applied to each backend call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
