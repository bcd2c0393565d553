//! Configuration module for game data structures
//!
//! This module handles loading the item catalog, actor notes and guest
//! settings, either from JSON or (with the `python` feature) from Python dicts.

mod actor;
mod item;
pub mod meta;
mod settings;

pub use actor::*;
pub use item::*;
pub use meta::{extract_metadata, MetaValue};
pub use settings::*;

use crate::error::Result;
use serde::Deserialize;

/// Everything the engine needs from the host's database
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub items: Vec<ItemConfig>,
    #[serde(default)]
    pub actors: Vec<ActorConfig>,
    #[serde(default)]
    pub settings: GuestSettings,
}

impl GameConfig {
    /// Load from a JSON document shaped like `{"items": [...], "actors": [...], "settings": {...}}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn catalog(&self) -> ItemCatalog {
        self.items.iter().cloned().collect()
    }

    pub fn actor(&self, id: i32) -> Option<&ActorConfig> {
        self.actors.iter().find(|actor| actor.id == id)
    }
}

#[cfg(feature = "python")]
pub use python::*;

#[cfg(feature = "python")]
mod python {
    use super::{ActorConfig, GuestSettings, ItemConfig};
    use crate::error::GuestEffectError;
    use pyo3::types::{PyAnyMethods, PyDict, PyDictMethods};
    use pyo3::Bound;

    /// Helper to get attribute from either dict or object
    fn get_attr<'py>(
        obj: &Bound<'py, pyo3::PyAny>,
        name: &str,
    ) -> pyo3::PyResult<Bound<'py, pyo3::PyAny>> {
        if let Ok(dict) = obj.downcast::<PyDict>() {
            dict.get_item(name)?
                .ok_or_else(|| pyo3::exceptions::PyKeyError::new_err(name.to_string()))
        } else {
            obj.getattr(name)
        }
    }

    /// Helper to get optional attribute from either dict or object
    fn get_attr_opt<'py>(
        obj: &Bound<'py, pyo3::PyAny>,
        name: &str,
    ) -> Option<Bound<'py, pyo3::PyAny>> {
        let value = if let Ok(dict) = obj.downcast::<PyDict>() {
            dict.get_item(name).ok().flatten()
        } else {
            obj.getattr(name).ok()
        };
        value.filter(|v| !v.is_none())
    }

    /// Deserialize items from Python config dict
    /// Expected format: {"items": {id: ItemConfig, ...}}
    pub fn deserialize_items(config: &Bound<'_, PyDict>) -> pyo3::PyResult<Vec<ItemConfig>> {
        let items_dict = config
            .get_item("items")?
            .ok_or_else(|| GuestEffectError::DeserializationError("items not found".to_string()))?;

        let items_dict: Bound<'_, PyDict> = items_dict.extract()?;
        let mut items = Vec::with_capacity(items_dict.len());

        for (_, value) in items_dict.iter() {
            items.push(extract_item(&value)?);
        }

        Ok(items)
    }

    fn extract_item(obj: &Bound<'_, pyo3::PyAny>) -> pyo3::PyResult<ItemConfig> {
        let id: i32 = get_attr(obj, "id")?.extract()?;
        let name: String = get_attr(obj, "name")?.extract()?;
        let plural_name: Option<String> =
            get_attr_opt(obj, "plural_name").and_then(|v| v.extract().ok());
        let note: String = get_attr_opt(obj, "note")
            .and_then(|v| v.extract().ok())
            .unwrap_or_default();

        Ok(ItemConfig {
            id,
            name,
            plural_name,
            note,
        })
    }

    /// Deserialize actors from Python config dict
    /// Expected format: {"actors": {id: ActorConfig, ...}}
    pub fn deserialize_actors(config: &Bound<'_, PyDict>) -> pyo3::PyResult<Vec<ActorConfig>> {
        let actors_dict = config
            .get_item("actors")?
            .ok_or_else(|| GuestEffectError::DeserializationError("actors not found".to_string()))?;

        let actors_dict: Bound<'_, PyDict> = actors_dict.extract()?;
        let mut actors = Vec::with_capacity(actors_dict.len());

        for (_, value) in actors_dict.iter() {
            let id: i32 = get_attr(&value, "id")?.extract()?;
            let name: String = get_attr(&value, "name")?.extract()?;
            let note: String = get_attr_opt(&value, "note")
                .and_then(|v| v.extract().ok())
                .unwrap_or_default();
            actors.push(ActorConfig { id, name, note });
        }

        Ok(actors)
    }

    /// Deserialize guest settings; every field is optional
    pub fn deserialize_settings(config: &Bound<'_, PyDict>) -> pyo3::PyResult<GuestSettings> {
        let mut settings = GuestSettings::default();

        if let Some(obj) = config.get_item("settings")?.filter(|v| !v.is_none()) {
            if let Some(max_guests) =
                get_attr_opt(&obj, "max_guests").and_then(|v| v.extract::<usize>().ok())
            {
                settings.max_guests = max_guests;
            }
            // Support both "effects_tag" and "effectsTag" field names
            if let Some(tag) = get_attr_opt(&obj, "effects_tag")
                .or_else(|| get_attr_opt(&obj, "effectsTag"))
                .and_then(|v| v.extract::<String>().ok())
            {
                settings.effects_tag = tag;
            }
        }

        Ok(settings)
    }
}
