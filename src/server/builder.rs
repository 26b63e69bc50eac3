// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rocket server builder and configuration
//!
//! This module provides functions to build and configure the Rocket server
//! instance with all necessary routes, fairings, and state management.

use std::sync::Arc;

use anyhow::{Context, Result};
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use log::{debug, info};
use rocket::config::LogLevel;
use rocket::data::{Limits, ToByteUnit};
use rocket::figment::Figment;
use rocket::{catchers, routes, Build, Rocket};

use super::catchers::default_catcher;
use super::cors::{options, CORS};
use super::{api, auth_routes};
use crate::auth::SessionTokenService;
use crate::backend::BackendClient;
use crate::config::Config;

/// Build the Rocket figment from the `server` section
///
/// When both `cert` and `key` are set they are decoded from base64 and TLS
/// is enabled.
pub fn figment_from_config(config: &Config) -> Result<Figment> {
    let server = &config.server;
    let mut figment = rocket::Config::figment()
        .merge(("ident", server.name.clone()))
        .merge(("limits", Limits::new().limit("json", 1.mebibytes())))
        .merge(("address", server.address.clone()))
        .merge(("port", server.port))
        .merge(("log_level", LogLevel::Normal));

    if let (Some(cert), Some(key)) = (&server.cert, &server.key) {
        debug!("SSL certificates found in configuration, enabling TLS");
        let cert_data = BASE64_STANDARD
            .decode(cert)
            .context("server.cert is not valid base64")?;
        let key_data = BASE64_STANDARD
            .decode(key)
            .context("server.key is not valid base64")?;
        figment = figment
            .merge(("tls.certs", cert_data))
            .merge(("tls.key", key_data));
        info!("TLS enabled for web server");
    }

    Ok(figment)
}

/// Build a Rocket instance talking to Discord and the configured backend
///
/// ### Parameters
///
/// * `figment` - Rocket configuration, usually from [`figment_from_config`]
/// * `config` - The validated application configuration
///
/// ### Returns
///
/// An unlaunched Rocket, or an error when the HTTP clients cannot be built
pub fn build_rocket(figment: Figment, config: Arc<Config>) -> Result<Rocket<Build>> {
    let sessions = SessionTokenService::from_config(&config)
        .context("Failed to create the session token service")?;
    let backend =
        BackendClient::new(&config.backend).context("Failed to create the backend client")?;
    Ok(assemble(figment, config, Arc::new(sessions), Arc::new(backend)))
}

/// Mount routes and register managed state
pub fn assemble(
    figment: Figment,
    config: Arc<Config>,
    sessions: Arc<SessionTokenService>,
    backend: Arc<BackendClient>,
) -> Rocket<Build> {
    let cors = CORS {
        allowed_origin: config.server.allowed_origin.clone(),
    };

    rocket::custom(figment)
        .attach(cors)
        .mount("/", routes![options])
        .mount("/api/_auth", auth_routes::routes())
        .mount("/api/me", api::routes())
        .register("/", catchers![default_catcher])
        .manage(sessions)
        .manage(backend)
        .manage(config)
}
