//! Property tests for effect module
//!
//! Covers: descriptor parsing correctness, idempotence, failure isolation

use proptest::prelude::*;

use crate::effect::ast::{Effect, RecoverTarget, Trigger};
use crate::effect::parser::{parse_descriptor, parse_descriptors};

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

/// Generate a valid range spec
fn range_spec_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            (0..=500i32).prop_map(|v| v.to_string()),
            (0..=500i32, 1..=10i32).prop_map(|(low, width)| format!("{}-{}", low, low + width)),
        ],
        1..=3,
    )
    .prop_map(|segments| segments.join(","))
}

/// Generate a valid item table
fn item_table_strategy() -> impl Strategy<Value = (Vec<u32>, String)> {
    prop::collection::vec((0..=100u32, range_spec_strategy()), 1..=4).prop_map(|pairs| {
        let chances = pairs.iter().map(|(c, _)| *c).collect();
        let text = pairs
            .iter()
            .map(|(c, items)| format!("{}:{}", c, items))
            .collect::<Vec<_>>()
            .join("^");
        (chances, text)
    })
}

fn target_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("all"), Just("lowest"), Just("highest"), Just("random")]
}

/// Generate a valid get_item descriptor with its expected chances
fn grant_item_strategy() -> impl Strategy<Value = (String, Vec<u32>)> {
    (range_spec_strategy(), item_table_strategy()).prop_map(|(quantity, (chances, table))| {
        (format!("end_combat|get_item|{}|{}", quantity, table), chances)
    })
}

/// Generate a valid recover_hp descriptor
fn recover_hp_strategy() -> impl Strategy<Value = String> {
    (target_strategy(), range_spec_strategy(), "[a-zA-Z .!]{0,24}").prop_map(
        |(target, percent, message)| format!("end_combat|recover_hp|{}|{}|{}", target, percent, message),
    )
}

fn descriptor_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        grant_item_strategy().prop_map(|(text, _)| text),
        recover_hp_strategy(),
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// get_item tables keep their declared order and chances
    #[test]
    fn prop_item_table_order_preserved((text, chances) in grant_item_strategy()) {
        let descriptor = parse_descriptor(&text).unwrap();
        prop_assert_eq!(&descriptor.trigger, &Trigger::EndCombat);
        match descriptor.effect {
            Effect::GrantItem { item_table, .. } => {
                let parsed: Vec<u32> = item_table.iter().map(|e| e.chance).collect();
                prop_assert_eq!(parsed, chances);
            }
            other => prop_assert!(false, "Expected GrantItem, got {:?}", other),
        }
    }

    /// recover_hp targets parse to their keyword
    #[test]
    fn prop_recover_target_round_trip(text in recover_hp_strategy()) {
        let descriptor = parse_descriptor(&text).unwrap();
        let keyword = text.split('|').nth(2).unwrap();
        match descriptor.effect {
            Effect::RecoverHp { target, .. } => {
                prop_assert_eq!(Some(target), RecoverTarget::from_keyword(keyword));
            }
            other => prop_assert!(false, "Expected RecoverHp, got {:?}", other),
        }
    }

    /// Parsing the same code twice yields structurally equal lists
    #[test]
    fn prop_parse_is_idempotent(descriptors in prop::collection::vec(descriptor_strategy(), 0..=5)) {
        let code = descriptors.join("&");
        let first = parse_descriptors(&code);
        let second = parse_descriptors(&code);
        prop_assert_eq!(first.len(), descriptors.len());
        prop_assert_eq!(first, second);
    }

    /// A malformed descriptor never takes its neighbours down with it
    #[test]
    fn prop_malformed_descriptor_is_isolated(
        before in descriptor_strategy(),
        after in descriptor_strategy(),
        garbage in prop_oneof![
            Just("end_combat|get_item|abc|100:1"),
            Just("end_combat|get_item|1|500:1"),
            Just("end_combat|recover_hp|nobody|10|x"),
            Just("end_combat|recover_hp|all|1-x|x"),
            Just("end_combat"),
        ],
    ) {
        let code = format!("{}&{}&{}", before, garbage, after);
        let parsed = parse_descriptors(&code);
        prop_assert_eq!(parsed.len(), 2);
        prop_assert_eq!(&parsed[0], &parse_descriptor(&before).unwrap());
        prop_assert_eq!(&parsed[1], &parse_descriptor(&after).unwrap());
    }
}
