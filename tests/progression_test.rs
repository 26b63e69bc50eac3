// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the nego-dashboard project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Battlepass progression rendered against realistic tier tables

use std::collections::BTreeSet;

use approx::assert_relative_eq;
use nego_dashboard::progression::{
    claim_eligibility, level_for, xp_requirement_for_level, BattlepassView, ProgressionState,
    RewardBundle, RewardTier, RewardTrack, TierTable, MAX_LEVEL,
};
use serde_json::json;

fn full_table() -> TierTable {
    TierTable::new((1..=MAX_LEVEL).map(|level| RewardTier {
        level,
        free: Some(RewardBundle::new([("coin", u64::from(level) * 10)]).unwrap()),
        premium: (level % 5 == 0).then(|| RewardBundle::new([("box", 1)]).unwrap()),
    }))
}

fn xp_to_reach(level: u32) -> i64 {
    (2..=level).map(xp_requirement_for_level).sum::<u64>() as i64
}

#[test]
fn test_fresh_account() {
    let state = ProgressionState::default();
    let view = BattlepassView::build(&state, &full_table());
    assert_eq!(view.level, 1);
    assert_eq!(view.xp_into_level, 0);
    assert_eq!(view.xp_required_for_next, 100);
    assert_relative_eq!(view.progress, 0.0);
    // Level 1 free reward is immediately claimable
    assert_eq!(view.claimable, 1);
    assert!(view.tier(1).unwrap().current);
}

#[test]
fn test_max_level_account() {
    let state = ProgressionState {
        current_xp: xp_to_reach(MAX_LEVEL) + 5_000,
        has_premium: true,
        claimed_free: (1..=MAX_LEVEL).collect(),
        claimed_premium: BTreeSet::new(),
    };
    let view = BattlepassView::build(&state, &full_table());
    assert_eq!(view.level, MAX_LEVEL);
    assert_eq!(view.xp_required_for_next, 0);
    assert_relative_eq!(view.progress, 100.0);
    // Only the premium bundles of every fifth tier remain
    assert_eq!(view.claimable, 20);
}

#[test]
fn test_premium_never_claimable_without_pass() {
    let table = full_table();
    for xp in [0, 500, 12_345, xp_to_reach(60), i64::MAX] {
        let state = ProgressionState {
            current_xp: xp,
            ..ProgressionState::default()
        };
        let level = level_for(xp).level;
        for tier in table.iter() {
            let eligibility =
                claim_eligibility(level, &state.claimed_free, &state.claimed_premium, tier, false);
            assert!(!eligibility.can_claim_premium);
        }
        let view = BattlepassView::build(&state, &table);
        assert!(view.tiers.iter().all(|tier| !tier.eligibility.can_claim_premium));
    }
}

#[test]
fn test_with_claim_consumes_eligibility() {
    let table = full_table();
    let state = ProgressionState {
        current_xp: xp_to_reach(10),
        has_premium: true,
        ..ProgressionState::default()
    };
    let tier = table.get(10).unwrap();
    assert!(state.eligibility(tier).can_claim_premium);

    let after = state.with_claim(10, RewardTrack::Premium);
    assert!(!after.eligibility(tier).can_claim_premium);
    assert!(after.eligibility(tier).can_claim_free);
    assert!(state.claimed_premium.is_empty(), "with_claim leaves the source state untouched");

    let before = BattlepassView::build(&state, &table).claimable;
    let remaining = BattlepassView::build(&after, &table).claimable;
    assert_eq!(before - 1, remaining);
}

#[test]
fn test_claims_above_level_are_reported_not_rewritten() {
    let state = ProgressionState {
        current_xp: 150,
        has_premium: false,
        claimed_free: [1, 2, 7].into_iter().collect(),
        claimed_premium: [9].into_iter().collect(),
    };
    assert_eq!(
        state.inconsistent_claims(),
        vec![(7, RewardTrack::Free), (9, RewardTrack::Premium)]
    );

    let view = BattlepassView::build(&state, &full_table());
    assert!(view.tier(7).unwrap().free_claimed);
    assert!(view.tier(9).unwrap().premium_claimed);
}

#[test]
fn test_backend_rewards_config() {
    let config = json!({
        "1": {"free": {"coin": 100}, "premium": {"coin": 250, "dice": 1}},
        "2": {"free": null, "premium": {"credit": 20}},
        "3": null
    });
    let table = TierTable::from_rewards_config(config.as_object().unwrap()).unwrap();
    let state = ProgressionState {
        current_xp: 500,
        has_premium: true,
        ..ProgressionState::default()
    };
    let view = BattlepassView::build(&state, &table);
    assert_eq!(view.level, 5);
    // 1 free + 1 premium at tier 1, premium at tier 2, nothing at tier 3
    assert_eq!(view.claimable, 3);
    assert_eq!(
        view.tier(1).unwrap().premium.as_ref().unwrap().describe(),
        "250 coins, 1 dice"
    );
}
