//! Combat party members as seen by guest effects

/// A party member HP recovery can target
pub trait Combatant {
    fn name(&self) -> &str;
    fn hp(&self) -> i32;
    fn max_hp(&self) -> i32;
    /// Add `amount` HP, keeping the result within `[0, max_hp]`
    fn gain_hp(&mut self, amount: i32);
}

/// Plain in-memory party member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyMember {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
}

impl PartyMember {
    pub fn new(name: impl Into<String>, hp: i32, max_hp: i32) -> Self {
        Self {
            name: name.into(),
            hp: hp.clamp(0, max_hp.max(0)),
            max_hp: max_hp.max(0),
        }
    }
}

impl Combatant for PartyMember {
    fn name(&self) -> &str {
        &self.name
    }

    fn hp(&self) -> i32 {
        self.hp
    }

    fn max_hp(&self) -> i32 {
        self.max_hp
    }

    fn gain_hp(&mut self, amount: i32) {
        self.hp = self.hp.saturating_add(amount).clamp(0, self.max_hp);
    }
}
