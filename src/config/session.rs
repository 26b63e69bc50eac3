// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Session token configuration

use base64::Engine;
use serde::{Deserialize, Serialize};

/// Settings used to sign and verify session tokens.
///
/// The token lifetime is not configurable: every session token is valid for
/// 24 hours from issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// HMAC secret for HS256 session token signing and verification.
    ///
    /// Defaults to 32 random bytes, Base64 encoded. Because the default file is
    /// written on first start, the generated secret survives restarts.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Value of the `iss` claim; tokens from another issuer are rejected.
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

/// Generate a random secret for session token signing.
fn default_jwt_secret() -> String {
    use rand::Rng;
    let mut rng = rand::rng();
    let secret: [u8; 32] = rng.random();
    base64::engine::general_purpose::STANDARD.encode(secret)
}

fn default_issuer() -> String {
    "nego-dashboard".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            issuer: default_issuer(),
        }
    }
}
