//! Property tests for evaluator module
//!
//! Covers: drop table tie-break, target selection, heal rounding,
//! evaluation ordering and failure isolation

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::effect::{ItemChance, RecoverTarget, Trigger};
use crate::evaluator::{heal_amount, select_by_roll, select_targets, EffectEvaluator, EvaluatorConfig};
use crate::guest::{Guest, GuestId, PartyMember};
use crate::range::WeightedRangeSet;

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

/// Generate a drop table's chances
fn chances_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0..=100u32, 0..=5)
}

/// Generate a party as (hp, max_hp) pairs
fn party_strategy() -> impl Strategy<Value = Vec<PartyMember>> {
    prop::collection::vec((1..=999i32, 0..=999i32), 1..=6).prop_map(|members| {
        members
            .into_iter()
            .enumerate()
            .map(|(i, (max_hp, hp))| PartyMember::new(format!("M{}", i), hp.min(max_hp), max_hp))
            .collect()
    })
}

fn table(chances: &[u32]) -> Vec<ItemChance> {
    chances
        .iter()
        .enumerate()
        .map(|(i, &chance)| ItemChance {
            chance,
            item_id: WeightedRangeSet::single(i as i32),
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// The selected entry is the first whose running total reaches the roll,
    /// and nothing is selected when the table total is below the roll
    #[test]
    fn prop_select_by_roll_matches_cumulative_walk(chances in chances_strategy(), roll in 1..=100u32) {
        let t = table(&chances);
        let total: u32 = chances.iter().sum();
        let selected = select_by_roll(&t, roll).map(|e| e.item_id.nth_value(0) as usize);

        if total < roll {
            prop_assert_eq!(selected, None);
        } else {
            let index = selected.unwrap();
            let before: u32 = chances[..index].iter().sum();
            prop_assert!(before < roll);
            prop_assert!(before + chances[index] >= roll);
        }
    }

    /// lowest/highest pick the first member holding the extreme current HP
    #[test]
    fn prop_extreme_targets_pick_first_extreme(party in party_strategy()) {
        let mut rng = StdRng::seed_from_u64(0);
        let min_hp = party.iter().map(|m| m.hp).min().unwrap();
        let max_hp = party.iter().map(|m| m.hp).max().unwrap();

        let lowest = select_targets(&party, RecoverTarget::Lowest, &mut rng);
        prop_assert_eq!(lowest.len(), 1);
        prop_assert_eq!(lowest[0], party.iter().position(|m| m.hp == min_hp).unwrap());

        let highest = select_targets(&party, RecoverTarget::Highest, &mut rng);
        prop_assert_eq!(highest.len(), 1);
        prop_assert_eq!(highest[0], party.iter().position(|m| m.hp == max_hp).unwrap());
    }

    /// random always picks exactly one valid member; all picks everyone
    #[test]
    fn prop_random_and_all_targets(party in party_strategy(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let random = select_targets(&party, RecoverTarget::Random, &mut rng);
        prop_assert_eq!(random.len(), 1);
        prop_assert!(random[0] < party.len());

        let all = select_targets(&party, RecoverTarget::All, &mut rng);
        prop_assert_eq!(all.to_vec(), (0..party.len()).collect::<Vec<_>>());
    }

    /// Heal amount is the smallest integer not below max_hp * pct / 100
    #[test]
    fn prop_heal_amount_is_ceiling(max_hp in 0..=9999i32, pct in 0..=100i32) {
        let heal = heal_amount(max_hp, pct) as i64;
        let exact = max_hp as i64 * pct as i64;
        prop_assert!(heal * 100 >= exact);
        prop_assert!((heal - 1) * 100 < exact || heal == 0);
    }

    /// Recovery never pushes HP past max, and recorded amounts match the change
    #[test]
    fn prop_recovery_respects_max_hp(party in party_strategy(), pct in 1..=100i32, seed in any::<u64>()) {
        let guests = vec![Guest::new(1, "Pip", &format!("end_combat|recover_hp|all|{}|sings.", pct))];
        let before: Vec<i32> = party.iter().map(|m| m.hp).collect();
        let mut party = party;
        let mut rng = StdRng::seed_from_u64(seed);

        let evaluation = EffectEvaluator::default().evaluate(&Trigger::EndCombat, &guests, &mut party, &mut rng);

        prop_assert_eq!(evaluation.recoveries.len(), party.len());
        for recovery in &evaluation.recoveries {
            let member = &party[recovery.member_index];
            prop_assert!(member.hp <= member.max_hp);
            prop_assert_eq!(member.hp - before[recovery.member_index], recovery.amount);
        }
    }

    /// Rewards come out grouped by guest in roster order
    #[test]
    fn prop_rewards_follow_roster_order(guest_count in 1..=4usize, seed in any::<u64>()) {
        let guests: Vec<Guest> = (0..guest_count)
            .map(|i| Guest::new(i as i32 + 1, format!("G{}", i), "end_combat|get_item|1-3|100:10-12&end_combat|get_item|1|100:99"))
            .collect();
        let mut party: Vec<PartyMember> = Vec::new();
        let mut rng = StdRng::seed_from_u64(seed);

        let evaluation = EffectEvaluator::new(EvaluatorConfig { max_guests: 4 })
            .evaluate(&Trigger::EndCombat, &guests, &mut party, &mut rng);

        let sources: Vec<GuestId> = evaluation.rewards.outcomes().iter().map(|o| o.source_guest).collect();
        let expected: Vec<GuestId> = (0..guest_count)
            .flat_map(|i| [GuestId(i as i32 + 1), GuestId(i as i32 + 1)])
            .collect();
        prop_assert_eq!(sources, expected);

        for pair in evaluation.rewards.outcomes().chunks(2) {
            prop_assert!((10..=12).contains(&pair[0].item_id));
            prop_assert!((1..=3).contains(&pair[0].amount));
            prop_assert_eq!(pair[1].item_id, 99);
        }
    }
}

/// Chances [30, 30] with a forced roll of 65 drop nothing
#[test]
fn test_forced_roll_past_cumulative_total() {
    let t = table(&[30, 30]);
    assert!(select_by_roll(&t, 65).is_none());
}

/// Drop frequency for a 25% table converges with a fixed seed
#[test]
fn test_drop_rate_converges() {
    let guests = vec![Guest::new(1, "Rex", "end_combat|get_item|1|25:7")];
    let mut party: Vec<PartyMember> = Vec::new();
    let mut rng = StdRng::seed_from_u64(424242);
    let evaluator = EffectEvaluator::default();

    let runs = 20_000;
    let drops: usize = (0..runs)
        .map(|_| {
            evaluator
                .evaluate(&Trigger::EndCombat, &guests, &mut party, &mut rng)
                .rewards
                .len()
        })
        .sum();
    let rate = drops as f64 / runs as f64;
    assert!((rate - 0.25).abs() < 0.02, "drop rate {:.3}", rate);
}
