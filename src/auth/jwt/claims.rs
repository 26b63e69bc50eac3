// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! JWT claim structure for session tokens
//!
//! Besides the registered claims the token embeds the identity fields under
//! the camelCase names the dashboard frontend already reads.

use serde::{Deserialize, Serialize};

use crate::auth::identity::IdentityAssertion;

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject, the Discord user id
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at timestamp (seconds since the Unix epoch)
    pub iat: i64,

    /// Expiration timestamp (seconds since the Unix epoch)
    pub exp: i64,

    /// Unique token identifier
    pub jti: String,

    pub id: String,
    pub username: String,
    pub discriminator: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(rename = "globalName", default)]
    pub global_name: Option<String>,
    #[serde(rename = "avatarURL")]
    pub avatar_url: String,
}

impl From<SessionClaims> for IdentityAssertion {
    fn from(claims: SessionClaims) -> Self {
        IdentityAssertion {
            id: claims.id,
            username: claims.username,
            discriminator: claims.discriminator,
            global_name: claims.global_name,
            avatar: claims.avatar,
            avatar_url: claims.avatar_url,
        }
    }
}
