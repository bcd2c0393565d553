//! Item catalog structures

use crate::config::meta::meta_text;
use serde::Deserialize;
use std::collections::HashMap;

/// Item database entry
#[derive(Debug, Clone, Deserialize)]
pub struct ItemConfig {
    pub id: i32,
    pub name: String,
    /// Explicit plural display name, e.g. "Gold Coins" for "Coin"
    #[serde(default)]
    pub plural_name: Option<String>,
    /// Free-text note; may carry a `<plural_name:...>` tag
    #[serde(default)]
    pub note: String,
}

impl ItemConfig {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            plural_name: None,
            note: String::new(),
        }
    }

    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural_name = Some(plural.into());
        self
    }

    /// Plural display name.
    ///
    /// The configured override wins, then a `<plural_name:...>` note tag,
    /// otherwise the singular name with a trailing "s". Irregular plurals
    /// need an override.
    pub fn plural_name(&self) -> String {
        self.plural_name
            .clone()
            .or_else(|| meta_text(&self.note, "plural_name"))
            .unwrap_or_else(|| format!("{}s", self.name))
    }

    /// Name to show next to `amount`
    pub fn display_name(&self, amount: i32) -> String {
        if amount == 1 {
            self.name.clone()
        } else {
            self.plural_name()
        }
    }
}

/// Item id → item lookup
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<i32, ItemConfig>,
}

impl ItemCatalog {
    pub fn new(items: HashMap<i32, ItemConfig>) -> Self {
        Self { items }
    }

    pub fn get(&self, id: i32) -> Option<&ItemConfig> {
        self.items.get(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<ItemConfig> for ItemCatalog {
    fn from_iter<I: IntoIterator<Item = ItemConfig>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(|item| (item.id, item)).collect(),
        }
    }
}
