// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Discord implementation of [`IdentityProvider`]
//!
//! Both outbound calls share one `reqwest::Client` built with the configured
//! timeout. Non-2xx answers are turned into [`AuthError::ExchangeFailed`]
//! after the provider's error body has been logged.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use serde::Deserialize;
use url::Url;

use super::error::AuthError;
use super::identity::DiscordUser;
use super::provider::IdentityProvider;
use crate::config::DiscordConfig;

/// Successful answer of `POST /oauth2/token`
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

/// Discord OAuth 2.0 client
pub struct DiscordProvider {
    http: reqwest::Client,
    config: DiscordConfig,
}

impl DiscordProvider {
    /// Create a provider from the `discord` configuration section
    pub fn new(config: DiscordConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base_url.trim_end_matches('/'), path)
    }

    /// Turn a non-success response into an error, logging the body server side
    async fn reject(stage: &str, response: reqwest::Response) -> AuthError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!("Discord {} failed with {}: {}", stage, status, body);
        AuthError::ExchangeFailed(format!("{} returned {}", stage, status))
    }
}

#[async_trait]
impl IdentityProvider for DiscordProvider {
    fn authorize_url(&self) -> Result<Url, AuthError> {
        Url::parse_with_params(
            &self.config.authorize_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", self.config.scope.as_str()),
            ],
        )
        .map_err(|e| AuthError::ExchangeFailed(format!("invalid authorize url: {}", e)))
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("scope", self.config.scope.as_str()),
        ];

        let response = self
            .http
            .post(self.endpoint("oauth2/token"))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!("Discord token exchange request failed: {}", e);
                AuthError::from(e)
            })?;

        if !response.status().is_success() {
            return Err(Self::reject("token exchange", response).await);
        }

        let token: TokenResponse = response.json().await?;
        debug!(
            "Discord token exchange succeeded ({})",
            token.token_type.as_deref().unwrap_or("unknown token type")
        );
        Ok(token.access_token)
    }

    async fn fetch_user(&self, access_token: &str) -> Result<DiscordUser, AuthError> {
        let response = self
            .http
            .get(self.endpoint("users/@me"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                error!("Discord profile request failed: {}", e);
                AuthError::from(e)
            })?;

        if !response.status().is_success() {
            return Err(Self::reject("profile fetch", response).await);
        }

        Ok(response.json().await?)
    }
}
