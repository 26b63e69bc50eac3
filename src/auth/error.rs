// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use rocket::http::Status;

/// Failures of the session token flow.
///
/// The `String` payloads carry diagnostic detail for the server log only;
/// HTTP responses use [`AuthError::public_message`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No code or token was supplied
    #[error("missing authentication parameter")]
    Missing,
    /// Signature check failed, the token is malformed or it has expired
    #[error("invalid or expired token: {0}")]
    Invalid(String),
    /// The identity provider was unreachable or rejected the exchange
    #[error("identity provider exchange failed: {0}")]
    ExchangeFailed(String),
    /// The server cannot verify sessions, e.g. the token service is not managed
    #[error("session verification unavailable: {0}")]
    Unavailable(String),
}

impl AuthError {
    /// HTTP status the error surfaces as
    pub fn status(&self) -> Status {
        match self {
            AuthError::Missing => Status::BadRequest,
            AuthError::Invalid(_) => Status::Unauthorized,
            AuthError::ExchangeFailed(_) => Status::BadGateway,
            AuthError::Unavailable(_) => Status::InternalServerError,
        }
    }

    /// Message safe to return to the browser
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::Missing => "No token provided",
            AuthError::Invalid(_) => "Invalid or expired token",
            AuthError::ExchangeFailed(_) => "auth_failed",
            AuthError::Unavailable(_) => "Internal Server Error",
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::ExchangeFailed(err.to_string())
    }
}
