// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! XP curve
//!
//! Level is a pure function of cumulative XP. The cost of reaching a level
//! grows by 10 XP per level up to level 80, then by 5 XP per level with the
//! increment capped at 100.

use serde::Serialize;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 100;

/// XP needed to advance from level 1 to level 2 when nothing has been earned
const FIRST_LEVEL_REQUIREMENT: u64 = 100;

/// XP needed to go from `level - 1` to `level`
///
/// ### Returns
///
/// `0` for levels 0 and 1, which are reached without any XP.
pub fn xp_requirement_for_level(level: u32) -> u64 {
    let level = u64::from(level);
    match level {
        0 | 1 => 0,
        2..=20 => 90 + 10 * level,
        21..=50 => 290 + 10 * (level - 20),
        51..=80 => 590 + 10 * (level - 50),
        _ => 890 + (5 * (level - 80)).min(100),
    }
}

/// Position of a total XP amount on the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    pub level: u32,
    /// XP earned since the current level was reached
    pub xp_into_level: u64,
    /// XP still separating the current level from the next, `0` at [`MAX_LEVEL`]
    pub xp_required_for_next: u64,
}

impl LevelProgress {
    pub fn is_max_level(&self) -> bool {
        self.level >= MAX_LEVEL
    }

    /// Completion of the current level in percent, in `[0, 100]`
    pub fn fraction(&self) -> f64 {
        if self.xp_required_for_next == 0 {
            return 100.0;
        }
        (100.0 * self.xp_into_level as f64 / self.xp_required_for_next as f64).min(100.0)
    }
}

/// Walk the curve for `total_xp`
///
/// Non-positive totals (the backend reports negative XP for some reset
/// accounts) are level 1 with no progress.
pub fn level_for(total_xp: i64) -> LevelProgress {
    if total_xp <= 0 {
        return LevelProgress {
            level: 1,
            xp_into_level: 0,
            xp_required_for_next: FIRST_LEVEL_REQUIREMENT,
        };
    }

    let total = total_xp as u64;
    let mut level = 1;
    let mut used = 0u64;
    while level < MAX_LEVEL {
        let requirement = xp_requirement_for_level(level + 1);
        if used + requirement > total {
            break;
        }
        used += requirement;
        level += 1;
    }

    let xp_required_for_next = if level >= MAX_LEVEL {
        0
    } else {
        xp_requirement_for_level(level + 1)
    };

    LevelProgress {
        level,
        xp_into_level: total - used,
        xp_required_for_next,
    }
}

/// Completion of the current level in percent for a total XP amount
pub fn progress_fraction(total_xp: i64) -> f64 {
    level_for(total_xp).fraction()
}
