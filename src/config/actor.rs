//! Actor configuration structures

use crate::config::meta::meta_text;
use serde::Deserialize;

/// Actor database entry
#[derive(Debug, Clone, Deserialize)]
pub struct ActorConfig {
    pub id: i32,
    pub name: String,
    /// Free-text note holding metadata tags
    #[serde(default)]
    pub note: String,
}

impl ActorConfig {
    /// Raw effect code stored under `tag` in the note, if any
    pub fn effect_code(&self, tag: &str) -> Option<String> {
        meta_text(&self.note, tag)
    }
}
