// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Identity provider abstraction
//!
//! The session service only needs three things from an OAuth provider: where
//! to send the browser, how to trade a one-time code for an access token, and
//! how to read the profile behind that access token.

use async_trait::async_trait;
use url::Url;

use super::error::AuthError;
use super::identity::DiscordUser;

/// An OAuth 2.0 authorization-code identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authorization URL the browser is redirected to
    fn authorize_url(&self) -> Result<Url, AuthError>;

    /// Exchange a one-time authorization code for a provider access token
    async fn exchange_code(&self, code: &str) -> Result<String, AuthError>;

    /// Fetch the profile of the access token's owner
    async fn fetch_user(&self, access_token: &str) -> Result<DiscordUser, AuthError>;
}
