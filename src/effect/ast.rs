//! Typed representation of guest effect descriptors

use crate::range::WeightedRangeSet;
use smallvec::SmallVec;
use std::fmt;

/// Game moment at which a descriptor fires
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// "end_combat"
    EndCombat,
    /// Any keyword this engine does not know; never matched
    Unknown(String),
}

impl Trigger {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_lowercase().as_str() {
            "end_combat" => Trigger::EndCombat,
            _ => Trigger::Unknown(keyword.to_string()),
        }
    }

    pub fn keyword(&self) -> &str {
        match self {
            Trigger::EndCombat => "end_combat",
            Trigger::Unknown(keyword) => keyword,
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Who receives an HP recovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecoverTarget {
    /// Every party member
    All,
    /// The member with the lowest current HP
    Lowest,
    /// The member with the highest current HP
    Highest,
    /// One member picked uniformly at random
    Random,
}

impl RecoverTarget {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "all" => Some(RecoverTarget::All),
            "lowest" => Some(RecoverTarget::Lowest),
            "highest" => Some(RecoverTarget::Highest),
            "random" => Some(RecoverTarget::Random),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            RecoverTarget::All => "all",
            RecoverTarget::Lowest => "lowest",
            RecoverTarget::Highest => "highest",
            RecoverTarget::Random => "random",
        }
    }
}

/// One row of an item drop table: "chance:itemRange"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemChance {
    /// Percent chance, 0 to 100
    pub chance: u32,
    pub item_id: WeightedRangeSet,
}

/// Ordered item drop table
pub type ItemTable = SmallVec<[ItemChance; 4]>;

/// Kind-specific part of a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// "get_item"
    GrantItem {
        quantity: WeightedRangeSet,
        item_table: ItemTable,
    },
    /// "recover_hp"
    RecoverHp {
        target: RecoverTarget,
        percent_hp: WeightedRangeSet,
        message: String,
    },
    /// Unrecognised kind keyword; evaluates to nothing
    Unknown { kind: String },
}

impl Effect {
    pub fn kind(&self) -> &str {
        match self {
            Effect::GrantItem { .. } => "get_item",
            Effect::RecoverHp { .. } => "recover_hp",
            Effect::Unknown { kind } => kind,
        }
    }
}

/// One parsed effect rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectDescriptor {
    pub trigger: Trigger,
    pub effect: Effect,
}

impl EffectDescriptor {
    /// Whether the evaluator should act on this descriptor for `trigger`
    #[inline]
    pub fn fires_on(&self, trigger: &Trigger) -> bool {
        !matches!(self.trigger, Trigger::Unknown(_))
            && self.trigger == *trigger
            && !matches!(self.effect, Effect::Unknown { .. })
    }
}

impl fmt::Display for EffectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.trigger, self.effect.kind())?;
        match &self.effect {
            Effect::GrantItem {
                quantity,
                item_table,
            } => {
                write!(f, "|{}|", quantity)?;
                for (i, entry) in item_table.iter().enumerate() {
                    if i > 0 {
                        f.write_str("^")?;
                    }
                    write!(f, "{}:{}", entry.chance, entry.item_id)?;
                }
                Ok(())
            }
            Effect::RecoverHp {
                target,
                percent_hp,
                message,
            } => write!(f, "|{}|{}|{}", target.keyword(), percent_hp, message),
            Effect::Unknown { .. } => Ok(()),
        }
    }
}
