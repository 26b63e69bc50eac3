// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Nego dashboard library
//!
//! Discord OAuth login with stateless session tokens, battlepass progression
//! arithmetic, and a session-gated API over the external Nego backend.
//!
//! ## Modules
//!
//! - [`auth`]: Discord login flow, session tokens and the `Session` guard
//! - [`backend`]: typed client for the external backend
//! - [`collection`]: card filtering, paging and artwork normalisation
//! - [`config`]: YAML configuration with schema validation
//! - [`progression`]: XP curve, tier table and claim eligibility
//! - [`server`]: Rocket application

pub mod auth;
pub mod backend;
pub mod collection;
pub mod config;
pub mod progression;
pub mod server;
