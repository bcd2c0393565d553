//! Guests and the combat party they support

mod party;

pub use party::*;

use crate::config::{ActorConfig, GuestSettings};
use crate::effect::{cache, EffectDescriptor};
use std::fmt;
use std::sync::Arc;

/// Actor id of a guest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuestId(pub i32);

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-combatant companion and the effects it provides.
///
/// Descriptors are parsed once when the guest is built and never change.
#[derive(Debug, Clone)]
pub struct Guest {
    pub id: GuestId,
    pub name: String,
    descriptors: Arc<[EffectDescriptor]>,
}

impl Guest {
    /// Build a guest from a raw effect code. Malformed descriptors are logged and dropped.
    pub fn new(id: i32, name: impl Into<String>, effect_code: &str) -> Self {
        Self {
            id: GuestId(id),
            name: name.into(),
            descriptors: cache::get_or_parse(effect_code),
        }
    }

    /// Build a guest from an actor entry, reading its effect code tag.
    ///
    /// An actor without the tag becomes a guest with no effects.
    pub fn from_actor(actor: &ActorConfig, settings: &GuestSettings) -> Self {
        let code = actor.effect_code(&settings.effects_tag).unwrap_or_default();
        Self::new(actor.id, actor.name.clone(), &code)
    }

    pub fn descriptors(&self) -> &[EffectDescriptor] {
        &self.descriptors
    }

    pub fn has_effects(&self) -> bool {
        !self.descriptors.is_empty()
    }
}
