// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Battlepass progression
//!
//! Pure level and XP arithmetic plus reward-claim eligibility. Nothing here
//! performs I/O; the backend supplies the [`ProgressionState`] and the
//! [`TierTable`] and this module only computes on them.

pub mod curve;
pub mod state;
pub mod tiers;

pub use curve::{level_for, progress_fraction, xp_requirement_for_level, LevelProgress, MAX_LEVEL};
pub use state::{BattlepassView, ProgressionState, TierView};
pub use tiers::{
    claim_eligibility, display_name, ClaimEligibility, RewardBundle, RewardTier, RewardTrack,
    TierTable, TierTableError,
};
