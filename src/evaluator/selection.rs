//! Drop table rolls and recovery target selection

use crate::effect::{ItemChance, RecoverTarget};
use crate::guest::Combatant;
use crate::rng::RandomSource;
use smallvec::SmallVec;

/// Indices into the party slice
pub type TargetIndices = SmallVec<[usize; 4]>;

/// Roll 1..=100 and pick from the table
#[inline]
pub fn roll_item_table<'a, R: RandomSource + ?Sized>(
    table: &'a [ItemChance],
    rng: &mut R,
) -> Option<&'a ItemChance> {
    let roll = rng.int_between(1, 100) as u32;
    select_by_roll(table, roll)
}

/// First entry whose cumulative chance reaches `roll`.
///
/// Returns `None` when the whole table sums to less than the roll.
pub fn select_by_roll(table: &[ItemChance], roll: u32) -> Option<&ItemChance> {
    let mut cumulative = 0u32;
    for entry in table {
        cumulative += entry.chance;
        if cumulative >= roll {
            return Some(entry);
        }
    }
    None
}

/// Party members an HP recovery applies to, in party order
pub fn select_targets<C: Combatant, R: RandomSource + ?Sized>(
    party: &[C],
    target: RecoverTarget,
    rng: &mut R,
) -> TargetIndices {
    if party.is_empty() {
        return TargetIndices::new();
    }

    match target {
        RecoverTarget::All => (0..party.len()).collect(),
        RecoverTarget::Lowest => extreme_hp(party, |candidate, best| candidate < best)
            .into_iter()
            .collect(),
        RecoverTarget::Highest => extreme_hp(party, |candidate, best| candidate > best)
            .into_iter()
            .collect(),
        RecoverTarget::Random => {
            let index = rng.int_between(0, party.len() as i64 - 1) as usize;
            std::iter::once(index).collect()
        }
    }
}

/// Index of the member whose current HP beats every earlier one; ties keep the first
fn extreme_hp<C: Combatant>(party: &[C], beats: impl Fn(i32, i32) -> bool) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for (index, member) in party.iter().enumerate() {
        let hp = member.hp();
        match best {
            Some((_, best_hp)) if !beats(hp, best_hp) => {}
            _ => best = Some((index, hp)),
        }
    }
    best.map(|(index, _)| index)
}

/// `ceil(max_hp * percent / 100)`
#[inline]
pub fn heal_amount(max_hp: i32, percent: i32) -> i32 {
    let product = max_hp as i64 * percent as i64;
    let ceil = product.div_euclid(100) + i64::from(product.rem_euclid(100) > 0);
    ceil.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
