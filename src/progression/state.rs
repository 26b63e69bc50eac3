// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Per-user progression and its rendering against a tier table

use std::collections::BTreeSet;

use log::warn;
use serde::{Deserialize, Serialize};

use super::curve::{level_for, LevelProgress};
use super::tiers::{claim_eligibility, ClaimEligibility, RewardBundle, RewardTier, RewardTrack, TierTable};

/// Progress record owned by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    #[serde(default)]
    pub current_xp: i64,
    #[serde(default)]
    pub has_premium: bool,
    #[serde(default)]
    pub claimed_free: BTreeSet<u32>,
    #[serde(default)]
    pub claimed_premium: BTreeSet<u32>,
}

impl ProgressionState {
    pub fn level_progress(&self) -> LevelProgress {
        level_for(self.current_xp)
    }

    pub fn claimed(&self, track: RewardTrack) -> &BTreeSet<u32> {
        match track {
            RewardTrack::Free => &self.claimed_free,
            RewardTrack::Premium => &self.claimed_premium,
        }
    }

    /// Copy of the state with a confirmed claim recorded
    pub fn with_claim(&self, level: u32, track: RewardTrack) -> Self {
        let mut next = self.clone();
        match track {
            RewardTrack::Free => next.claimed_free.insert(level),
            RewardTrack::Premium => next.claimed_premium.insert(level),
        };
        next
    }

    /// Claims recorded above the level the XP total reaches
    pub fn inconsistent_claims(&self) -> Vec<(u32, RewardTrack)> {
        let level = self.level_progress().level;
        let free = self
            .claimed_free
            .iter()
            .filter(|&&tier| tier > level)
            .map(|&tier| (tier, RewardTrack::Free));
        let premium = self
            .claimed_premium
            .iter()
            .filter(|&&tier| tier > level)
            .map(|&tier| (tier, RewardTrack::Premium));
        free.chain(premium).collect()
    }

    /// Eligibility of one tier for this state
    pub fn eligibility(&self, tier: &RewardTier) -> ClaimEligibility {
        claim_eligibility(
            self.level_progress().level,
            &self.claimed_free,
            &self.claimed_premium,
            tier,
            self.has_premium,
        )
    }
}

/// One tier as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierView {
    pub level: u32,
    pub free: Option<RewardBundle>,
    pub premium: Option<RewardBundle>,
    pub reached: bool,
    pub current: bool,
    pub free_claimed: bool,
    pub premium_claimed: bool,
    #[serde(flatten)]
    pub eligibility: ClaimEligibility,
}

/// A user's battlepass, computed from their progression and the tier table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattlepassView {
    pub current_xp: i64,
    pub has_premium: bool,
    pub level: u32,
    pub xp_into_level: u64,
    pub xp_required_for_next: u64,
    /// Completion of the current level in percent
    pub progress: f64,
    /// Rewards that can be claimed right now, over both tracks
    pub claimable: usize,
    pub tiers: Vec<TierView>,
}

impl BattlepassView {
    pub fn build(state: &ProgressionState, table: &TierTable) -> Self {
        let progress = state.level_progress();

        for (tier, track) in state.inconsistent_claims() {
            warn!(
                "Tier {} is claimed on the {} track but the user is only level {}",
                tier, track, progress.level
            );
        }

        let tiers: Vec<TierView> = table
            .iter()
            .map(|tier| TierView {
                level: tier.level,
                free: tier.free.clone(),
                premium: tier.premium.clone(),
                reached: progress.level >= tier.level,
                current: progress.level == tier.level,
                free_claimed: state.claimed_free.contains(&tier.level),
                premium_claimed: state.claimed_premium.contains(&tier.level),
                eligibility: state.eligibility(tier),
            })
            .collect();

        Self {
            current_xp: state.current_xp,
            has_premium: state.has_premium,
            level: progress.level,
            xp_into_level: progress.xp_into_level,
            xp_required_for_next: progress.xp_required_for_next,
            progress: progress.fraction(),
            claimable: tiers.iter().map(|tier| tier.eligibility.count()).sum(),
            tiers,
        }
    }

    pub fn tier(&self, level: u32) -> Option<&TierView> {
        self.tiers.iter().find(|tier| tier.level == level)
    }
}
