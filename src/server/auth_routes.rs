// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Discord login endpoints mounted under `/api/_auth`
//!
//! | Route | Result |
//! |-------|--------|
//! | `GET /login` | 302 to the Discord authorization page |
//! | `GET /callback?code=` | 302 to the app root with `token` or `error=auth_failed` |
//! | `GET /user` | identity of the presented token |
//! | `POST /logout` | acknowledgement only, tokens are stateless |
//!
//! Other methods on `/user` and `/logout` answer 405.

use std::sync::Arc;

use log::warn;
use rocket::http::Status;
use rocket::response::Redirect;
use rocket::serde::json::{json, Json, Value};
use rocket::{delete, get, patch, post, put, routes, Route, State};

use super::responses::ApiError;
use crate::auth::{AuthError, Session, SessionTokenService};
use crate::config::Config;

pub fn routes() -> Vec<Route> {
    routes![
        login,
        callback,
        user,
        user_post,
        user_put,
        user_patch,
        user_delete,
        logout,
        logout_get,
        logout_put,
        logout_patch,
        logout_delete,
    ]
}

/// Location under the application root carrying one query parameter
fn app_redirect(app_root: &str, key: &str, value: &str) -> String {
    let value: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();
    format!("{}?{}={}", app_root, key, value)
}

#[get("/login")]
pub fn login(sessions: &State<Arc<SessionTokenService>>) -> Result<Redirect, ApiError> {
    let url = sessions.begin_login()?;
    Ok(Redirect::found(url.to_string()))
}

#[get("/callback?<code>")]
pub async fn callback(
    code: Option<String>,
    sessions: &State<Arc<SessionTokenService>>,
    config: &State<Arc<Config>>,
) -> Result<Redirect, (Status, &'static str)> {
    let code = match code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => return Err((Status::BadRequest, "No code provided.")),
    };

    let app_root = &config.server.app_root;
    match sessions.complete_login(&code).await {
        Ok(token) => Ok(Redirect::found(app_redirect(app_root, "token", token.as_str()))),
        Err(e) => {
            warn!("Login failed: {}", e);
            Ok(Redirect::found(app_redirect(app_root, "error", "auth_failed")))
        }
    }
}

#[get("/user")]
pub fn user(session: Result<Session, AuthError>) -> Result<Json<Value>, ApiError> {
    let identity = session?.identity;
    Ok(Json(json!({
        "status": 200,
        "message": "Token valid",
        "id": identity.id,
        "username": identity.username,
        "discriminator": identity.discriminator,
        "avatarURL": identity.avatar_url,
        "globalName": identity.global_name,
    })))
}

#[post("/user")]
pub fn user_post() -> ApiError {
    ApiError::MethodNotAllowed
}

#[put("/user")]
pub fn user_put() -> ApiError {
    ApiError::MethodNotAllowed
}

#[patch("/user")]
pub fn user_patch() -> ApiError {
    ApiError::MethodNotAllowed
}

#[delete("/user")]
pub fn user_delete() -> ApiError {
    ApiError::MethodNotAllowed
}

#[post("/logout")]
pub fn logout() -> Json<Value> {
    Json(json!({ "message": "Logged out successfully" }))
}

fn logout_not_allowed() -> (Status, Json<Value>) {
    (
        Status::MethodNotAllowed,
        Json(json!({ "error": "Method not allowed" })),
    )
}

#[get("/logout")]
pub fn logout_get() -> (Status, Json<Value>) {
    logout_not_allowed()
}

#[put("/logout")]
pub fn logout_put() -> (Status, Json<Value>) {
    logout_not_allowed()
}

#[patch("/logout")]
pub fn logout_patch() -> (Status, Json<Value>) {
    logout_not_allowed()
}

#[delete("/logout")]
pub fn logout_delete() -> (Status, Json<Value>) {
    logout_not_allowed()
}
