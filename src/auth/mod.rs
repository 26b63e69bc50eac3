// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Discord login and session tokens
//!
//! This module handles the OAuth 2.0 authorization-code flow against Discord
//! and the stateless HS256 session tokens minted once it succeeds.
//!
//! ## Sub-modules
//!
//! - `discord`: production [`IdentityProvider`] talking to Discord
//! - `error`: [`AuthError`] and its HTTP mapping
//! - `guards`: the [`Session`] request guard
//! - `identity`: Discord profile and [`IdentityAssertion`]
//! - `jwt`: token claims, signing and validation
//! - `provider`: the [`IdentityProvider`] trait
//! - `service`: [`SessionTokenService`]

pub mod discord;
pub mod error;
pub mod guards;
pub mod identity;
pub mod jwt;
pub mod provider;
pub mod service;

pub use discord::DiscordProvider;
pub use error::AuthError;
pub use guards::Session;
pub use identity::{avatar_url, DiscordUser, IdentityAssertion, DEFAULT_AVATAR_URL};
pub use jwt::{JwtIssuer, JwtValidator, SessionClaims, SessionToken};
pub use provider::IdentityProvider;
pub use service::{SessionTokenService, SESSION_LIFETIME};
