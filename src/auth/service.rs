// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Session token service
//!
//! Ties the identity provider to the JWT issuer and validator. The service is
//! built once at startup and shared read-only between requests.

use std::sync::Arc;

use chrono::Duration;
use log::{debug, error, info};
use url::Url;

use super::discord::DiscordProvider;
use super::error::AuthError;
use super::identity::IdentityAssertion;
use super::jwt::{JwtIssuer, JwtValidator, SessionToken};
use super::provider::IdentityProvider;
use crate::config::Config;

/// Validity window of every session token
pub const SESSION_LIFETIME: Duration = Duration::hours(24);

/// Issues and verifies session tokens
pub struct SessionTokenService {
    provider: Arc<dyn IdentityProvider>,
    issuer: JwtIssuer,
    validator: JwtValidator,
}

impl SessionTokenService {
    /// Create a service around an arbitrary identity provider
    ///
    /// ### Parameters
    ///
    /// * `provider` - OAuth provider used by [`complete_login`](Self::complete_login)
    /// * `secret` - HMAC secret shared by signing and verification
    /// * `issuer` - value written to and expected in the `iss` claim
    pub fn new(provider: Arc<dyn IdentityProvider>, secret: &[u8], issuer: &str) -> Self {
        Self {
            provider,
            issuer: JwtIssuer::new(secret, SESSION_LIFETIME).with_issuer(issuer),
            validator: JwtValidator::new(secret).with_issuer(issuer),
        }
    }

    /// Create the production service talking to Discord
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = DiscordProvider::new(config.discord.clone())?;
        Ok(Self::new(
            Arc::new(provider),
            config.session.jwt_secret.as_bytes(),
            &config.session.issuer,
        ))
    }

    /// Authorization URL the browser should be redirected to
    pub fn begin_login(&self) -> Result<Url, AuthError> {
        self.provider.authorize_url()
    }

    /// Trade an authorization code for a signed session token
    ///
    /// The token exchange and the profile fetch run one after the other and
    /// both must succeed. Failures are logged here and reduced to
    /// [`AuthError::ExchangeFailed`].
    ///
    /// ### Parameters
    ///
    /// * `code` - The authorization code Discord appended to the callback URL
    ///
    /// ### Returns
    ///
    /// A session token valid for [`SESSION_LIFETIME`]
    pub async fn complete_login(&self, code: &str) -> Result<SessionToken, AuthError> {
        if code.is_empty() {
            return Err(AuthError::Missing);
        }

        let access_token = self.provider.exchange_code(code).await.map_err(|e| {
            error!("Authorization code exchange failed: {}", e);
            e
        })?;
        let user = self.provider.fetch_user(&access_token).await.map_err(|e| {
            error!("Fetching the Discord profile failed: {}", e);
            e
        })?;

        let identity = IdentityAssertion::from(user);
        let token = self.mint(&identity)?;
        info!("User {} ({}) logged in", identity.username, identity.id);
        Ok(token)
    }

    /// Sign a session token for an already verified identity
    pub fn mint(&self, identity: &IdentityAssertion) -> Result<SessionToken, AuthError> {
        self.issuer.issue(identity)
    }

    /// Check a presented token and recover the identity it carries
    ///
    /// ### Parameters
    ///
    /// * `token` - The token as presented, if any; blank counts as absent
    ///
    /// ### Returns
    ///
    /// The identity, [`AuthError::Missing`] without a token, or
    /// [`AuthError::Invalid`] when it fails verification
    pub fn verify(&self, token: Option<&str>) -> Result<IdentityAssertion, AuthError> {
        let token = match token.map(str::trim) {
            Some(token) if !token.is_empty() => token,
            _ => return Err(AuthError::Missing),
        };

        self.validator
            .validate(token)
            .map(IdentityAssertion::from)
            .map_err(|e| {
                debug!("Rejected session token: {}", e);
                e
            })
    }

    #[cfg(test)]
    pub(crate) fn issuer(&self) -> &JwtIssuer {
        &self.issuer
    }
}
