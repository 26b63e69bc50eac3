// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Identity data asserted by Discord
//!
//! [`DiscordUser`] is the wire shape of `GET /users/@me`; [`IdentityAssertion`]
//! is what the rest of the crate works with once the avatar URL is derived.

use serde::{Deserialize, Serialize};

/// Avatar shown for accounts without a custom avatar
pub const DEFAULT_AVATAR_URL: &str = "https://cdn.discordapp.com/embed/avatars/0.png";

const AVATAR_CDN_BASE: &str = "https://cdn.discordapp.com/avatars";

/// Profile returned by Discord's `users/@me` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    #[serde(default = "default_discriminator")]
    pub discriminator: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub global_name: Option<String>,
}

/// Accounts migrated to unique usernames report "0"
fn default_discriminator() -> String {
    "0".to_string()
}

/// Verified profile data bound into a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityAssertion {
    /// Discord snowflake, used to key every backend lookup
    pub id: String,
    pub username: String,
    pub discriminator: String,
    pub global_name: Option<String>,
    /// Raw avatar hash, if the user set one
    pub avatar: Option<String>,
    /// Displayable avatar, falls back to [`DEFAULT_AVATAR_URL`]
    pub avatar_url: String,
}

/// Build the CDN URL for an avatar hash, or the default avatar when unset
pub fn avatar_url(user_id: &str, avatar: Option<&str>) -> String {
    match avatar {
        Some(hash) if !hash.is_empty() => format!("{}/{}/{}.png", AVATAR_CDN_BASE, user_id, hash),
        _ => DEFAULT_AVATAR_URL.to_string(),
    }
}

impl From<DiscordUser> for IdentityAssertion {
    fn from(user: DiscordUser) -> Self {
        let avatar_url = avatar_url(&user.id, user.avatar.as_deref());
        IdentityAssertion {
            id: user.id,
            username: user.username,
            discriminator: user.discriminator,
            // Discord sends an empty string for some legacy accounts
            global_name: user.global_name.filter(|name| !name.is_empty()),
            avatar: user.avatar,
            avatar_url,
        }
    }
}
