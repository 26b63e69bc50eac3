// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Cross-Origin Resource Sharing (CORS) support

use std::path::PathBuf;

use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Header;
use rocket::{options, Request, Response};

/// Adds CORS headers to every response
///
/// The dashboard frontend may be served from another origin than the API,
/// `allowed_origin` comes from `server.allowed_origin`.
pub struct CORS {
    pub allowed_origin: String,
}

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    /// Add the CORS headers to every response
    ///
    /// ### Parameters
    ///
    /// * `_request` - The request that generated this response (unused)
    /// * `response` - The response to modify with CORS headers
    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new(
            "Access-Control-Allow-Origin",
            self.allowed_origin.clone(),
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, PATCH, DELETE, OPTIONS",
        ));
        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "Authorization, Content-Type",
        ));

        // Browsers refuse credentials together with a wildcard origin
        if self.allowed_origin != "*" {
            response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
        }
    }
}

/// CORS preflight
#[options("/<_path..>")]
pub async fn options(_path: PathBuf) {}
