// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};
use rocket::{catch, Request};

/// JSON `{status, message}` body for every error Rocket produces itself
#[catch(default)]
pub fn default_catcher(status: Status, _request: &Request<'_>) -> (Status, Json<Value>) {
    (
        status,
        Json(json!({
            "status": status.code,
            "message": status.reason().unwrap_or("Unknown Error"),
        })),
    )
}
