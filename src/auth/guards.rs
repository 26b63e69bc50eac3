// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rocket request guard for session tokens
//!
//! [`Session`] is the single place where a request's token is read. The token
//! is taken from the `Authorization: Bearer <token>` header, or from the
//! `token` query parameter the login redirect hands to the browser.
//!
//! | Condition | HTTP Status |
//! |-----------|-------------|
//! | No token in header nor query | 400 Bad Request |
//! | Bad signature, malformed or expired | 401 Unauthorized |
//! | Session service not managed | 500 Internal Server Error |

use std::sync::Arc;

use log::error;
use rocket::request::{FromRequest, Outcome, Request};
use rocket::State;

use super::error::AuthError;
use super::identity::IdentityAssertion;
use super::service::SessionTokenService;

/// A verified session
pub struct Session {
    /// Identity carried by the token
    pub identity: IdentityAssertion,
    /// The raw JWT token string
    pub token: String,
}

/// Extract the presented token, header first
///
/// An empty bearer value falls through to the query parameter.
fn presented_token(request: &Request<'_>) -> Option<String> {
    if let Some(header) = request.headers().get_one("Authorization") {
        if let Some(token) = header.strip_prefix("Bearer ").map(str::trim) {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    request
        .query_value::<String>("token")
        .and_then(|value| value.ok())
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Session {
    type Error = AuthError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let service = match request.guard::<&State<Arc<SessionTokenService>>>().await {
            Outcome::Success(service) => service,
            _ => {
                error!("Session guard used without a managed SessionTokenService");
                let err = AuthError::Unavailable("session service not configured".to_string());
                return Outcome::Error((err.status(), err));
            }
        };

        let token = presented_token(request);
        match service.verify(token.as_deref()) {
            Ok(identity) => Outcome::Success(Session {
                identity,
                token: token.unwrap_or_default(),
            }),
            Err(e) => Outcome::Error((e.status(), e)),
        }
    }
}
