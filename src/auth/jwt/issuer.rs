// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Session token issuer

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use log::debug;

use super::claims::SessionClaims;
use crate::auth::error::AuthError;
use crate::auth::identity::IdentityAssertion;

/// Signed session token together with its expiry
#[derive(Debug, Clone)]
pub struct SessionToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl SessionToken {
    /// Encoded JWT
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

/// Signs session tokens with HS256
pub struct JwtIssuer {
    signing_key: EncodingKey,
    algorithm: Algorithm,
    issuer: String,
    lifetime: Duration,
}

impl JwtIssuer {
    /// Create a new JwtIssuer with the given secret
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        JwtIssuer {
            signing_key: EncodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            issuer: String::new(),
            lifetime,
        }
    }

    /// Sets the issuer name used in JWT claims
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Sign a token for `identity` issued now
    pub fn issue(&self, identity: &IdentityAssertion) -> Result<SessionToken, AuthError> {
        self.issue_at(identity, Utc::now())
    }

    /// Sign a token for `identity` as if it had been issued at `issued_at`
    ///
    /// ### Parameters
    ///
    /// * `identity` - The identity the token asserts
    /// * `issued_at` - Value of the `iat` claim; `exp` is derived from it
    ///
    /// ### Returns
    ///
    /// The encoded token and its expiry time
    pub fn issue_at(
        &self,
        identity: &IdentityAssertion,
        issued_at: DateTime<Utc>,
    ) -> Result<SessionToken, AuthError> {
        let expires_at = issued_at + self.lifetime;
        let claims = SessionClaims {
            sub: identity.id.clone(),
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            id: identity.id.clone(),
            username: identity.username.clone(),
            discriminator: identity.discriminator.clone(),
            avatar: identity.avatar.clone(),
            global_name: identity.global_name.clone(),
            avatar_url: identity.avatar_url.clone(),
        };

        let value = encode(&Header::new(self.algorithm), &claims, &self.signing_key)
            .map_err(|e| AuthError::ExchangeFailed(format!("failed to sign token: {}", e)))?;
        debug!(
            "Issued session token {} for user {} valid until {}",
            claims.jti, identity.id, expires_at
        );

        Ok(SessionToken { value, expires_at })
    }
}
