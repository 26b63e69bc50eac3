// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Reward tiers and claim eligibility

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reward track a tier can be claimed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardTrack {
    Free,
    Premium,
}

impl fmt::Display for RewardTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewardTrack::Free => write!(f, "free"),
            RewardTrack::Premium => write!(f, "premium"),
        }
    }
}

/// Errors raised while building a [`TierTable`]
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TierTableError {
    #[error("tier key '{0}' is not a level number")]
    InvalidLevel(String),
    #[error("tier {level}: {track} reward '{kind}' has a zero quantity")]
    ZeroQuantity {
        level: u32,
        track: RewardTrack,
        kind: String,
    },
    #[error("tier {level}: malformed rewards: {reason}")]
    Malformed { level: u32, reason: String },
}

/// Reward kind tag to quantity, e.g. `{"coin": 500, "dice": 2}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RewardBundle(BTreeMap<String, u64>);

impl RewardBundle {
    /// Build a bundle, rejecting zero quantities
    pub fn new<I, K>(entries: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        let mut items = BTreeMap::new();
        for (kind, quantity) in entries {
            let kind = kind.into();
            if quantity == 0 {
                return Err(kind);
            }
            items.insert(kind, quantity);
        }
        Ok(Self(items))
    }

    pub fn quantity(&self, kind: &str) -> Option<u64> {
        self.0.get(kind).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(kind, quantity)| (kind.as_str(), *quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Human readable summary such as `500 coins, 2 dice`
    pub fn describe(&self) -> String {
        if self.0.is_empty() {
            return "No rewards".to_string();
        }
        self.iter()
            .map(|(kind, quantity)| format!("{} {}", quantity, display_name(kind)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Plural label of a reward kind tag; unknown tags are shown as-is
pub fn display_name(kind: &str) -> &str {
    match kind {
        "coin" => "coins",
        "dice" => "dice",
        "credit" => "credits",
        "box" => "boxes",
        other => other,
    }
}

/// One rung of the reward ladder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewardTier {
    pub level: u32,
    pub free: Option<RewardBundle>,
    pub premium: Option<RewardBundle>,
}

impl RewardTier {
    pub fn bundle(&self, track: RewardTrack) -> Option<&RewardBundle> {
        match track {
            RewardTrack::Free => self.free.as_ref(),
            RewardTrack::Premium => self.premium.as_ref(),
        }
    }
}

/// Wire shape of one `rewards_config` entry
#[derive(Debug, Deserialize)]
struct RawTier {
    #[serde(default)]
    free: Option<HashMap<String, u64>>,
    #[serde(default)]
    premium: Option<HashMap<String, u64>>,
}

/// Tiers ordered by level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierTable {
    tiers: BTreeMap<u32, RewardTier>,
}

impl TierTable {
    /// Build a table from tiers, the last tier wins on duplicate levels
    pub fn new(tiers: impl IntoIterator<Item = RewardTier>) -> Self {
        Self {
            tiers: tiers.into_iter().map(|tier| (tier.level, tier)).collect(),
        }
    }

    /// Build a table from the backend's `rewards_config` object
    ///
    /// Keys are decimal level strings; each value holds optional `free` and
    /// `premium` bundles. `null` bundles mean the track has no reward there.
    pub fn from_rewards_config(config: &serde_json::Map<String, Value>) -> Result<Self, TierTableError> {
        let mut tiers = BTreeMap::new();
        for (key, value) in config {
            let level: u32 = key
                .trim()
                .parse()
                .map_err(|_| TierTableError::InvalidLevel(key.clone()))?;

            let raw: RawTier = match value {
                Value::Null => RawTier {
                    free: None,
                    premium: None,
                },
                other => serde_json::from_value(other.clone()).map_err(|e| {
                    TierTableError::Malformed {
                        level,
                        reason: e.to_string(),
                    }
                })?,
            };

            let free = Self::bundle_from(level, RewardTrack::Free, raw.free)?;
            let premium = Self::bundle_from(level, RewardTrack::Premium, raw.premium)?;
            tiers.insert(level, RewardTier { level, free, premium });
        }
        Ok(Self { tiers })
    }

    fn bundle_from(
        level: u32,
        track: RewardTrack,
        raw: Option<HashMap<String, u64>>,
    ) -> Result<Option<RewardBundle>, TierTableError> {
        match raw {
            None => Ok(None),
            Some(items) => RewardBundle::new(items)
                .map(Some)
                .map_err(|kind| TierTableError::ZeroQuantity { level, track, kind }),
        }
    }

    pub fn get(&self, level: u32) -> Option<&RewardTier> {
        self.tiers.get(&level)
    }

    /// Tiers in ascending level order
    pub fn iter(&self) -> impl Iterator<Item = &RewardTier> {
        self.tiers.values()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

/// Which tracks of a tier can be claimed right now
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClaimEligibility {
    pub can_claim_free: bool,
    pub can_claim_premium: bool,
}

impl ClaimEligibility {
    pub fn allows(&self, track: RewardTrack) -> bool {
        match track {
            RewardTrack::Free => self.can_claim_free,
            RewardTrack::Premium => self.can_claim_premium,
        }
    }

    pub fn count(&self) -> usize {
        usize::from(self.can_claim_free) + usize::from(self.can_claim_premium)
    }
}

/// Decide whether `tier` can be claimed on each track
///
/// A track is claimable once the tier is reached, while it still has an
/// unclaimed bundle. Premium also requires a premium pass.
///
/// ### Parameters
///
/// * `level` - The user's current level, from [`level_for`](super::level_for)
/// * `claimed_free` - Tier levels already claimed on the free track
/// * `claimed_premium` - Tier levels already claimed on the premium track
/// * `tier` - The tier being examined
/// * `has_premium` - Whether the user owns the premium pass
///
/// ### Returns
///
/// One flag per track
pub fn claim_eligibility(
    level: u32,
    claimed_free: &BTreeSet<u32>,
    claimed_premium: &BTreeSet<u32>,
    tier: &RewardTier,
    has_premium: bool,
) -> ClaimEligibility {
    let reached = level >= tier.level;
    ClaimEligibility {
        can_claim_free: reached && tier.free.is_some() && !claimed_free.contains(&tier.level),
        can_claim_premium: reached
            && has_premium
            && tier.premium.is_some()
            && !claimed_premium.contains(&tier.level),
    }
}
