//! Note metadata extraction
//!
//! Database notes carry tags such as `<plural_name:Gold Coins>` or
//! `<guest_effects:end_combat|get_item|1|100:5>`. A tag with a colon holds a
//! text value; a bare `<tag>` is a flag.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static META_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([^<>:]+)(:?)([^>]*)>").expect("meta tag pattern is valid"));

/// Value attached to a metadata tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    /// `<tag>`
    Flag,
    /// `<tag:value>`
    Text(String),
}

impl MetaValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(text) => Some(text),
            MetaValue::Flag => None,
        }
    }
}

/// Extract every metadata tag from a note. Later tags override earlier ones.
pub fn extract_metadata(note: &str) -> HashMap<String, MetaValue> {
    let mut meta = HashMap::new();
    for caps in META_TAG.captures_iter(note) {
        let key = caps[1].to_string();
        let value = if caps[2].is_empty() {
            MetaValue::Flag
        } else {
            MetaValue::Text(caps[3].to_string())
        };
        meta.insert(key, value);
    }
    meta
}

/// Look up one text-valued tag in a note
pub fn meta_text(note: &str, key: &str) -> Option<String> {
    extract_metadata(note)
        .remove(key)
        .and_then(|value| value.as_text().map(str::to_string))
}
