// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Wire types of the external backend

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::progression::{ProgressionState, RewardTrack};

/// Envelope wrapping every backend answer
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Currency counters of a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(default)]
    pub coin: i64,
    #[serde(default)]
    pub credit: i64,
    #[serde(default)]
    pub dice: i64,
    #[serde(default, rename = "box")]
    pub boxes: i64,
}

/// A collected card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: Value,
    pub display_name: String,
    #[serde(default)]
    pub raw_name: String,
    #[serde(default)]
    pub title: Option<String>,
    pub rarity: u8,
    #[serde(default)]
    pub rarity_icon: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Number of copies owned
    #[serde(default)]
    pub dupe: u32,
}

/// Current battlepass season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub season_id: Value,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Payload of `GET /api/user/battlepass/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct BattlepassData {
    pub season: Season,
    pub progress: ProgressionState,
    #[serde(default)]
    pub rewards_config: Map<String, Value>,
}

/// Body of `POST /api/user/battlepass/{id}/claim`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub level: u32,
    pub reward_type: RewardTrack,
}

/// Answer of `POST /api/user/battlepass/{id}/claim-all`
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimAllResponse {
    pub status: u16,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub claimed_count: u32,
}
