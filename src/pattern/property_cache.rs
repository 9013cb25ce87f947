//! Thread-local cache of resolved Unicode property sets
//!
//! Resolving a property from the Unicode tables is expensive compared to
//! cloning the resulting ranges, and the same handful of properties tend to
//! show up in every pattern of a build. Resolved sets are cached per thread;
//! entries are never mutated after insertion and callers always receive a
//! clone.

use ahash::RandomState;
use hashbrown::HashMap;
use std::cell::RefCell;

use super::code_point_set::CodePointSet;

thread_local! {
    /// Thread-local cache of resolved property sets, keyed by canonical query
    static PROPERTY_CACHE: RefCell<HashMap<String, CodePointSet, RandomState>> =
        RefCell::new(HashMap::with_hasher(RandomState::new()));
}

/// Get a cached property set or resolve and cache it
///
/// `resolve` is only called on a cache miss. Failed resolutions are not
/// cached.
///
/// # Arguments
/// * `key` - Canonical query, e.g. `General_Category=Letter`
/// * `resolve` - Loads the set from the Unicode tables
#[inline]
pub fn get_or_resolve<F>(key: &str, resolve: F) -> Option<CodePointSet>
where
    F: FnOnce() -> Option<CodePointSet>,
{
    let cached = PROPERTY_CACHE.with(|cache| cache.borrow().get(key).cloned());
    if cached.is_some() {
        log_debug!("property cache hit: {}", key);
        return cached;
    }

    let set = resolve()?;
    PROPERTY_CACHE.with(|cache| {
        cache.borrow_mut().insert(key.to_string(), set.clone());
    });
    Some(set)
}

/// Clear the property cache
///
/// Call this to free memory if many distinct properties have been resolved.
pub fn clear_cache() {
    PROPERTY_CACHE.with(|cache| cache.borrow_mut().clear());
}

/// Get the number of cached property sets
pub fn cache_size() -> usize {
    PROPERTY_CACHE.with(|cache| cache.borrow().len())
}
