// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Helpers shared by the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use nego_dashboard::auth::{IdentityAssertion, SessionTokenService, DEFAULT_AVATAR_URL};
use nego_dashboard::config::Config;
use nego_dashboard::server::build_rocket;
use rocket::config::LogLevel;
use rocket::local::asynchronous::Client;

pub const JWT_SECRET: &str = "integration-test-secret-0123456789";

/// Configuration pointing Discord and the backend at mock servers
pub fn test_config(discord_uri: &str, backend_uri: &str) -> Config {
    let mut config = Config::default();
    config.discord.client_id = "1234".to_string();
    config.discord.client_secret = "discord-secret".to_string();
    config.discord.redirect_uri = "http://localhost:8080/api/_auth/callback".to_string();
    config.discord.api_base_url = discord_uri.to_string();
    config.session.jwt_secret = JWT_SECRET.to_string();
    config.backend.api_base_url = backend_uri.to_string();
    config
}

pub fn get_figment() -> rocket::figment::Figment {
    rocket::Config::figment()
        .merge(("address", "127.0.0.1"))
        .merge(("port", 0))
        .merge(("log_level", LogLevel::Off))
}

pub async fn client(config: Config) -> Client {
    let rocket = build_rocket(get_figment(), Arc::new(config)).expect("valid configuration");
    Client::tracked(rocket).await.expect("valid rocket instance")
}

pub fn identity(id: &str) -> IdentityAssertion {
    IdentityAssertion {
        id: id.to_string(),
        username: "nego".to_string(),
        discriminator: "0".to_string(),
        global_name: Some("Nego".to_string()),
        avatar: None,
        avatar_url: DEFAULT_AVATAR_URL.to_string(),
    }
}

/// Session token for `id`, signed the way the server signs them
pub fn token_for(config: &Config, id: &str) -> String {
    SessionTokenService::from_config(config)
        .expect("session service")
        .mint(&identity(id))
        .expect("signed token")
        .into_string()
}
