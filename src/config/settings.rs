//! Plugin-level settings

use serde::Deserialize;

/// Guest feature settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuestSettings {
    /// Guests beyond this count are ignored during evaluation
    #[serde(default = "default_max_guests")]
    pub max_guests: usize,
    /// Note tag holding a guest's effect code
    #[serde(default = "default_effects_tag")]
    pub effects_tag: String,
}

fn default_max_guests() -> usize {
    4
}

fn default_effects_tag() -> String {
    "guest_effects".to_string()
}

impl Default for GuestSettings {
    fn default() -> Self {
        Self {
            max_guests: default_max_guests(),
            effects_tag: default_effects_tag(),
        }
    }
}
