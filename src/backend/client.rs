// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! HTTP client for the external backend
//!
//! All lookups are keyed by the Discord id of a verified session. Requests
//! share one `reqwest::Client` with the configured timeout and are never
//! retried.

use std::time::Duration;

use log::{debug, error};
use serde::de::DeserializeOwned;

use super::error::BackendError;
use super::models::{Balance, BattlepassData, Card, ClaimAllResponse, ClaimRequest, Envelope};
use crate::config::BackendConfig;
use crate::progression::RewardTrack;

/// Typed client over the backend's `/api/user` endpoints
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/user/{}", self.base_url, path)
    }

    /// Decode an envelope, turning error statuses into [`BackendError::Status`]
    async fn envelope<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<Envelope<T>, BackendError> {
        let http_status = response.status();
        if !http_status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Backend {} answered {}: {}", path, http_status, body);
            let message = serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| http_status.to_string());
            return Err(BackendError::Status {
                status: http_status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            error!("Backend {} returned an undecodable body: {}", path, e);
            BackendError::from(e)
        })?;
        if envelope.status != 200 {
            let message = envelope.message.clone().unwrap_or_default();
            error!("Backend {} reported status {}: {}", path, envelope.status, message);
            return Err(BackendError::Status {
                status: envelope.status,
                message,
            });
        }
        Ok(envelope)
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        debug!("GET backend {}", path);
        let response = self.http.get(self.url(path)).send().await.map_err(|e| {
            error!("Backend request {} failed: {}", path, e);
            BackendError::from(e)
        })?;
        Self::envelope::<T>(path, response)
            .await?
            .data
            .ok_or_else(|| BackendError::MissingData(path.to_string()))
    }

    /// Currency balance of a user
    pub async fn balance(&self, user_id: &str) -> Result<Balance, BackendError> {
        self.get_data(&format!("balance/{}", user_id)).await
    }

    /// Every card the user owns
    pub async fn card_collection(&self, user_id: &str) -> Result<Vec<Card>, BackendError> {
        self.get_data(&format!("card_collection/{}", user_id)).await
    }

    /// Season, progress and tier table of a user
    pub async fn battlepass(&self, user_id: &str) -> Result<BattlepassData, BackendError> {
        self.get_data(&format!("battlepass/{}", user_id)).await
    }

    /// Claim one tier on one track
    ///
    /// ### Parameters
    ///
    /// * `user_id` - Discord id of the verified session
    /// * `level` - Tier level to claim
    /// * `track` - Free or premium reward of that tier
    ///
    /// ### Returns
    ///
    /// `Ok(())` once the backend has acknowledged the claim
    pub async fn claim(
        &self,
        user_id: &str,
        level: u32,
        track: RewardTrack,
    ) -> Result<(), BackendError> {
        let path = format!("battlepass/{}/claim", user_id);
        debug!("POST backend {} level {} {}", path, level, track);
        let body = ClaimRequest {
            level,
            reward_type: track,
        };
        let response = self
            .http
            .post(self.url(&path))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Backend request {} failed: {}", path, e);
                BackendError::from(e)
            })?;
        Self::envelope::<serde_json::Value>(&path, response).await?;
        Ok(())
    }

    /// Claim every reward currently available, returns the number claimed
    pub async fn claim_all(&self, user_id: &str) -> Result<u32, BackendError> {
        let path = format!("battlepass/{}/claim-all", user_id);
        debug!("POST backend {}", path);
        let response = self.http.post(self.url(&path)).send().await.map_err(|e| {
            error!("Backend request {} failed: {}", path, e);
            BackendError::from(e)
        })?;

        let http_status = response.status();
        if !http_status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Backend {} answered {}: {}", path, http_status, body);
            return Err(BackendError::Status {
                status: http_status.as_u16(),
                message: http_status.to_string(),
            });
        }

        let answer: ClaimAllResponse = response.json().await?;
        if answer.status != 200 {
            return Err(BackendError::Status {
                status: answer.status,
                message: answer.message.unwrap_or_default(),
            });
        }
        Ok(answer.claimed_count)
    }
}
