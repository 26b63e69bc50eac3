// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Web server
//!
//! Rocket application exposing the Discord login flow under `/api/_auth`
//! and the session-gated dashboard API under `/api/me`.

pub mod api;
pub mod auth_routes;
pub mod builder;
pub mod catchers;
pub mod cors;
pub mod responses;

pub use builder::{assemble, build_rocket, figment_from_config};
pub use cors::CORS;
pub use responses::{ApiError, ApiResponse};
