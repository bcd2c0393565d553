//! Reward collection for one evaluation pass

use crate::config::ItemCatalog;
use crate::guest::{Guest, GuestId};
use tracing::warn;

/// One item grant produced by a guest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardOutcome {
    pub item_id: i32,
    pub amount: i32,
    pub source_guest: GuestId,
}

/// Item grants in evaluation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardsAccumulator {
    outcomes: Vec<RewardOutcome>,
}

impl RewardsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: RewardOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[RewardOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Total amount granted of one item across all guests
    pub fn total_for(&self, item_id: i32) -> i64 {
        self.outcomes
            .iter()
            .filter(|o| o.item_id == item_id)
            .map(|o| i64::from(o.amount))
            .sum()
    }

    pub fn into_vec(self) -> Vec<RewardOutcome> {
        self.outcomes
    }

    /// One display line per outcome, e.g. "Rex found 3 Potions!".
    ///
    /// Outcomes naming an item missing from the catalog are logged and left out,
    /// as are outcomes with a non-positive amount.
    pub fn render_messages(&self, catalog: &ItemCatalog, guests: &[Guest]) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.outcomes.len());

        for outcome in &self.outcomes {
            let Some(item) = catalog.get(outcome.item_id) else {
                warn!(
                    item_id = outcome.item_id,
                    guest = %outcome.source_guest,
                    "reward names unknown item"
                );
                continue;
            };
            if outcome.amount <= 0 {
                continue;
            }

            let guest_name = guests
                .iter()
                .find(|g| g.id == outcome.source_guest)
                .map(|g| g.name.as_str())
                .unwrap_or("A guest");

            lines.push(format!(
                "{} found {} {}!",
                guest_name,
                outcome.amount,
                item.display_name(outcome.amount)
            ));
        }

        lines
    }
}

impl<'a> IntoIterator for &'a RewardsAccumulator {
    type Item = &'a RewardOutcome;
    type IntoIter = std::slice::Iter<'a, RewardOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
