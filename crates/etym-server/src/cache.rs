//! TTL response cache keyed by the normalized (lowercased) word.
//!
//! Negative results are cached too, so a repeated miss is served without
//! re-fetching. Staleness within the TTL is acceptable by design of the
//! surrounding shell; the resolver itself holds no cache.

use std::time::Duration;

use etym_core::Lookup;
use moka::sync::Cache;

const MAX_ENTRIES: u64 = 10_000;

pub struct LookupCache {
    inner: Cache<String, Lookup>,
}

impl LookupCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(MAX_ENTRIES)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub fn get(&self, word: &str) -> Option<Lookup> {
        self.inner.get(&word.to_lowercase())
    }

    pub fn insert(&self, word: &str, lookup: Lookup) {
        self.inner.insert(word.to_lowercase(), lookup);
    }
}
