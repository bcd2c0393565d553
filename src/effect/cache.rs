//! Effect code parsing cache - several actors often share one effect template

use crate::effect::ast::EffectDescriptor;
use crate::effect::parser;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

/// Global effect code cache with fast hashing (ahash)
static EFFECT_CACHE: Lazy<RwLock<AHashMap<String, Arc<[EffectDescriptor]>>>> =
    Lazy::new(|| RwLock::new(AHashMap::with_capacity(64)));

/// Get or parse an effect code, using the cache for repeated codes.
///
/// Parsing is lenient: malformed descriptors are logged once, when the code
/// is first seen, and left out of the cached list.
#[inline]
pub fn get_or_parse(code: &str) -> Arc<[EffectDescriptor]> {
    // Fast path: check read lock first
    {
        let cache = EFFECT_CACHE.read();
        if let Some(descriptors) = cache.get(code) {
            return Arc::clone(descriptors);
        }
    }

    // Slow path: parse and cache
    let descriptors: Arc<[EffectDescriptor]> = parser::parse_descriptors(code).into();

    let mut cache = EFFECT_CACHE.write();
    Arc::clone(
        cache
            .entry(code.to_string())
            .or_insert_with(|| Arc::clone(&descriptors)),
    )
}

/// Clear the effect cache (useful for testing)
#[allow(dead_code)]
pub fn clear_cache() {
    let mut cache = EFFECT_CACHE.write();
    cache.clear();
}

/// Get cache statistics
#[allow(dead_code)]
pub fn cache_size() -> usize {
    let cache = EFFECT_CACHE.read();
    cache.len()
}
