//! End-of-combat guest effect evaluation

use crate::config::GuestSettings;
use crate::effect::{Effect, EffectDescriptor, ItemChance, RecoverTarget, Trigger};
use crate::evaluator::selection::{heal_amount, roll_item_table, select_targets};
use crate::guest::{Combatant, Guest, GuestId};
use crate::range::WeightedRangeSet;
use crate::rewards::{RewardOutcome, RewardsAccumulator};
use crate::rng::RandomSource;
use tracing::{debug, debug_span, warn};

/// Evaluator limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
    pub max_guests: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self { max_guests: 4 }
    }
}

impl From<&GuestSettings> for EvaluatorConfig {
    fn from(settings: &GuestSettings) -> Self {
        Self {
            max_guests: settings.max_guests,
        }
    }
}

/// HP actually restored to one party member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HpRecovery {
    pub guest: GuestId,
    pub member_index: usize,
    pub amount: i32,
}

/// Everything one evaluation pass produced, in evaluation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub rewards: RewardsAccumulator,
    pub messages: Vec<String>,
    pub recoveries: Vec<HpRecovery>,
}

/// Resolves guest effect descriptors into rewards and HP recovery
#[derive(Debug, Clone, Default)]
pub struct EffectEvaluator {
    config: EvaluatorConfig,
}

impl EffectEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Run every guest's descriptors that fire on `trigger`.
    ///
    /// Guests are visited in roster order and descriptors in parse order.
    /// Party HP is the only state mutated outside the returned evaluation.
    pub fn evaluate<C: Combatant, R: RandomSource + ?Sized>(
        &self,
        trigger: &Trigger,
        guests: &[Guest],
        party: &mut [C],
        rng: &mut R,
    ) -> Evaluation {
        let mut evaluation = Evaluation::default();

        if guests.len() > self.config.max_guests {
            warn!(
                guests = guests.len(),
                max_guests = self.config.max_guests,
                "guest roster exceeds the configured maximum, ignoring the rest"
            );
        }

        for guest in guests.iter().take(self.config.max_guests) {
            let _span =
                debug_span!("guest_effects", guest = %guest.id, name = %guest.name).entered();

            for descriptor in guest.descriptors() {
                if !descriptor.fires_on(trigger) {
                    debug!(descriptor = %descriptor, "descriptor does not fire on {}", trigger);
                    continue;
                }
                self.apply_descriptor(guest, descriptor, party, rng, &mut evaluation);
            }
        }

        evaluation
    }

    fn apply_descriptor<C: Combatant, R: RandomSource + ?Sized>(
        &self,
        guest: &Guest,
        descriptor: &EffectDescriptor,
        party: &mut [C],
        rng: &mut R,
        evaluation: &mut Evaluation,
    ) {
        match &descriptor.effect {
            Effect::GrantItem {
                quantity,
                item_table,
            } => {
                if let Some(outcome) = grant_item(guest, quantity, item_table, rng) {
                    evaluation.rewards.push(outcome);
                }
            }
            Effect::RecoverHp {
                target,
                percent_hp,
                message,
            } => recover_hp(guest, *target, percent_hp, message, party, rng, evaluation),
            Effect::Unknown { .. } => {}
        }
    }
}

fn grant_item<R: RandomSource + ?Sized>(
    guest: &Guest,
    quantity: &WeightedRangeSet,
    item_table: &[ItemChance],
    rng: &mut R,
) -> Option<RewardOutcome> {
    let amount = quantity.sample(rng);

    let Some(entry) = roll_item_table(item_table, rng) else {
        debug!("no drop this time");
        return None;
    };
    let item_id = entry.item_id.sample(rng);

    Some(RewardOutcome {
        item_id,
        amount,
        source_guest: guest.id,
    })
}

fn recover_hp<C: Combatant, R: RandomSource + ?Sized>(
    guest: &Guest,
    target: RecoverTarget,
    percent_hp: &WeightedRangeSet,
    message: &str,
    party: &mut [C],
    rng: &mut R,
    evaluation: &mut Evaluation,
) {
    let targets = select_targets(party, target, rng);
    if targets.is_empty() {
        debug!("no party members to recover");
        return;
    }

    let percent = percent_hp.sample(rng);

    for &index in &targets {
        let member = &mut party[index];
        let before = member.hp();
        let heal = heal_amount(member.max_hp(), percent);
        member.gain_hp(heal);
        evaluation.recoveries.push(HpRecovery {
            guest: guest.id,
            member_index: index,
            amount: member.hp() - before,
        });
    }

    let recipient = match target {
        RecoverTarget::All => "The party".to_string(),
        _ => party[targets[0]].name().to_string(),
    };

    let mut line = guest.name.clone();
    if !message.is_empty() {
        line.push(' ');
        line.push_str(message);
    }
    line.push_str(&format!(" {} recovered {}% HP!", recipient, percent));
    evaluation.messages.push(line);
}
