//! BattleRewards - pre-rendered result of one end-of-combat pass
//!
//! Holds the evaluation output in Rust memory together with display lines
//! rendered against the item catalog, so a host can read it without
//! re-deriving names or plurals.

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::{PyDict, PyList};

use crate::config::ItemCatalog;
use crate::evaluator::{Evaluation, HpRecovery};
use crate::guest::{Combatant, Guest};
use crate::rewards::RewardOutcome;

/// Rewards and messages produced by guests at the end of one battle
#[cfg_attr(feature = "python", pyclass)]
#[derive(Debug, Clone)]
pub struct BattleRewards {
    rewards: Vec<RewardOutcome>,
    recoveries: Vec<HpRecovery>,
    /// Item lines first, then recovery lines, each in evaluation order
    messages: Vec<String>,
    /// Party HP after recovery, in party order
    party_hp: Vec<i32>,
}

impl BattleRewards {
    pub fn new<C: Combatant>(
        evaluation: Evaluation,
        catalog: &ItemCatalog,
        guests: &[Guest],
        party: &[C],
    ) -> Self {
        let mut messages = evaluation.rewards.render_messages(catalog, guests);
        messages.extend(evaluation.messages);

        Self {
            rewards: evaluation.rewards.into_vec(),
            recoveries: evaluation.recoveries,
            messages,
            party_hp: party.iter().map(|member| member.hp()).collect(),
        }
    }

    pub fn rewards(&self) -> &[RewardOutcome] {
        &self.rewards
    }

    pub fn recoveries(&self) -> &[HpRecovery] {
        &self.recoveries
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn party_hp(&self) -> &[i32] {
        &self.party_hp
    }

    /// Sum of all granted item amounts
    pub fn total_items(&self) -> i64 {
        self.rewards.iter().map(|r| i64::from(r.amount)).sum()
    }
}

// ============================================================================
// PyMethods Implementation
// ============================================================================

#[cfg(feature = "python")]
#[pymethods]
impl BattleRewards {
    /// Granted items as a list of {"item_id", "amount", "guest_id"} dicts
    #[getter(rewards)]
    fn py_rewards(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let list = PyList::empty(py);
        for reward in &self.rewards {
            let dict = PyDict::new(py);
            dict.set_item("item_id", reward.item_id)?;
            dict.set_item("amount", reward.amount)?;
            dict.set_item("guest_id", reward.source_guest.0)?;
            list.append(dict)?;
        }
        Ok(list.into())
    }

    /// HP recoveries as a list of {"guest_id", "member_index", "amount"} dicts
    #[getter(recoveries)]
    fn py_recoveries(&self, py: Python<'_>) -> PyResult<Py<PyAny>> {
        let list = PyList::empty(py);
        for recovery in &self.recoveries {
            let dict = PyDict::new(py);
            dict.set_item("guest_id", recovery.guest.0)?;
            dict.set_item("member_index", recovery.member_index)?;
            dict.set_item("amount", recovery.amount)?;
            list.append(dict)?;
        }
        Ok(list.into())
    }

    /// Display lines to show after the battle
    #[getter(messages)]
    fn py_messages(&self) -> Vec<String> {
        self.messages.clone()
    }

    /// Party HP after recovery, in the order the party was passed in
    #[getter(party_hp)]
    fn py_party_hp(&self) -> Vec<i32> {
        self.party_hp.clone()
    }

    #[getter(total_items)]
    fn py_total_items(&self) -> i64 {
        self.total_items()
    }

    fn __len__(&self) -> usize {
        self.rewards.len()
    }
}
