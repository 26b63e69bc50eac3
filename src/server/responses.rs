// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! JSON response bodies and the API error responder

use log::{debug, error};
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::{json, Json};
use rocket::Request;
use serde::Serialize;

use crate::auth::AuthError;
use crate::backend::BackendError;
use crate::progression::RewardTrack;

/// Success envelope `{status, message?, data}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            status: 200,
            message: None,
            data,
        })
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Json<Self> {
        Json(Self {
            status: 200,
            message: Some(message.into()),
            data,
        })
    }
}

/// Errors returned by the dashboard API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("level {level} {track} reward is not claimable")]
    NotClaimable { level: u32, track: RewardTrack },
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::Auth(e) => e.status(),
            ApiError::Backend(_) => Status::BadGateway,
            ApiError::NotClaimable { .. } => Status::Conflict,
            ApiError::MethodNotAllowed => Status::MethodNotAllowed,
            ApiError::BadRequest(_) => Status::BadRequest,
        }
    }

    /// Message sent to the client, upstream details stay in the log
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Auth(e) => e.public_message().to_string(),
            ApiError::Backend(_) => "Backend request failed".to_string(),
            ApiError::NotClaimable { level, track } => {
                format!("Level {} {} reward cannot be claimed", level, track)
            }
            ApiError::MethodNotAllowed => "Method Not Allowed".to_string(),
            ApiError::BadRequest(message) => message.clone(),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        match &self {
            ApiError::Backend(e) => error!("{} {}: {}", request.method(), request.uri(), e),
            other => debug!("{} {}: {}", request.method(), request.uri(), other),
        }
        let body = json!({
            "status": status.code,
            "message": self.public_message(),
        });
        (status, Json(body)).respond_to(request)
    }
}
