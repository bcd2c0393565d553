//! Party Guests Core - guest companion effect engine
//!
//! Guests are non-combatant party companions whose actor notes carry an
//! effect code such as `end_combat|get_item|1-3|50:10^50:20-22`. This crate
//! parses those codes, evaluates them at the end of a battle, and renders
//! the resulting rewards. Python bindings are available behind the `python`
//! feature via PyO3.

pub mod config;
pub mod effect;
pub mod error;
pub mod evaluator;
pub mod guest;
pub mod logging;
pub mod range;
pub mod rewards;
pub mod rng;

pub use effect::{EffectDescriptor, Trigger};
pub use error::{GuestEffectError, Result};
pub use evaluator::{BattleRewards, EffectEvaluator, Evaluation, EvaluatorConfig};
pub use guest::{Combatant, Guest, GuestId, PartyMember};
pub use range::WeightedRangeSet;
pub use rewards::{RewardOutcome, RewardsAccumulator};
pub use rng::RandomSource;

#[cfg(feature = "python")]
mod python {
    use crate::config::{self, ItemCatalog};
    use crate::effect::{try_parse_descriptors, Trigger};
    use crate::error::GuestEffectError;
    use crate::evaluator::{BattleRewards, EffectEvaluator, EvaluatorConfig};
    use crate::guest::{Guest, PartyMember};
    use crate::logging;
    use once_cell::sync::OnceCell;
    use parking_lot::RwLock;
    use pyo3::prelude::*;
    use pyo3::types::PyDict;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tracing::{info, warn};

    // ============================================================================
    // Cached Configuration
    // ============================================================================

    /// Cached configuration: item catalog, parsed guests and evaluator
    struct CachedConfig {
        catalog: ItemCatalog,
        guests: HashMap<i32, Guest>,
        evaluator: EffectEvaluator,
    }

    /// Global cached configuration
    static CACHED_CONFIG: OnceCell<Arc<RwLock<CachedConfig>>> = OnceCell::new();

    // ============================================================================
    // Python Functions
    // ============================================================================

    /// Initialize the game configuration (call once at startup, again after data reloads)
    ///
    /// Every actor's effect code is parsed here, so battles never parse text.
    ///
    /// # Arguments
    /// * `config` - {"items": {...}, "actors": {...}, "settings": {...}}
    /// * `log_level` - Optional engine log level ("warn" by default)
    #[pyfunction]
    #[pyo3(signature = (config, log_level=None))]
    fn init_config(config: &Bound<'_, PyDict>, log_level: Option<&str>) -> PyResult<()> {
        logging::init_tracing(log_level);

        let items = config::deserialize_items(config)?;
        let actors = config::deserialize_actors(config)?;
        let settings = config::deserialize_settings(config)?;

        let guests: HashMap<i32, Guest> = actors
            .iter()
            .map(|actor| (actor.id, Guest::from_actor(actor, &settings)))
            .collect();

        info!(
            items = items.len(),
            actors = guests.len(),
            max_guests = settings.max_guests,
            "guest config loaded"
        );

        let cached = CachedConfig {
            catalog: items.into_iter().collect(),
            guests,
            evaluator: EffectEvaluator::new(EvaluatorConfig::from(&settings)),
        };

        // If already initialized, update the config
        if let Some(existing) = CACHED_CONFIG.get() {
            let mut guard = existing.write();
            *guard = cached;
        } else {
            let _ = CACHED_CONFIG.set(Arc::new(RwLock::new(cached)));
        }

        Ok(())
    }

    /// Check if config is initialized
    #[pyfunction]
    fn is_config_initialized() -> bool {
        CACHED_CONFIG.get().is_some()
    }

    /// Evaluate every guest's end-of-combat effects
    ///
    /// # Arguments
    /// * `guest_ids` - Actor ids of the current guests, in roster order
    /// * `party` - Battle members as (name, hp, max_hp) tuples
    /// * `seed` - Optional RNG seed for reproducible results
    ///
    /// # Returns
    /// A BattleRewards object with granted items, messages and party HP
    ///
    /// # Raises
    /// RuntimeError if `init_config` was not called first
    #[pyfunction]
    #[pyo3(signature = (guest_ids, party, seed=None))]
    fn evaluate_end_of_combat(
        guest_ids: Vec<i32>,
        party: Vec<(String, i32, i32)>,
        seed: Option<u64>,
    ) -> PyResult<BattleRewards> {
        let config_arc = CACHED_CONFIG
            .get()
            .ok_or(GuestEffectError::ConfigNotInitialized)?
            .clone();
        let config = config_arc.read();

        let guests: Vec<Guest> = guest_ids
            .iter()
            .filter_map(|id| {
                let guest = config.guests.get(id).cloned();
                if guest.is_none() {
                    warn!(actor_id = *id, "guest is not a known actor, skipping");
                }
                guest
            })
            .collect();

        let mut members: Vec<PartyMember> = party
            .into_iter()
            .map(|(name, hp, max_hp)| PartyMember::new(name, hp, max_hp))
            .collect();

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let evaluation =
            config
                .evaluator
                .evaluate(&Trigger::EndCombat, &guests, &mut members, &mut rng);

        Ok(BattleRewards::new(evaluation, &config.catalog, &guests, &members))
    }

    /// Validate an effect code, returning each descriptor in canonical form
    ///
    /// # Raises
    /// ValueError describing the first malformed descriptor
    #[pyfunction]
    fn parse_effect_code(code: &str) -> PyResult<Vec<String>> {
        let descriptors = try_parse_descriptors(code)?;
        Ok(descriptors.iter().map(ToString::to_string).collect())
    }

    // ============================================================================
    // Python Module Definition
    // ============================================================================

    /// Python module definition
    #[pymodule]
    fn party_guests_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(init_config, m)?)?;
        m.add_function(wrap_pyfunction!(is_config_initialized, m)?)?;
        m.add_function(wrap_pyfunction!(evaluate_end_of_combat, m)?)?;
        m.add_function(wrap_pyfunction!(parse_effect_code, m)?)?;
        m.add_class::<BattleRewards>()?;
        Ok(())
    }
}
