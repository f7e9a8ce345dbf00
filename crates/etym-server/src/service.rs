//! Shared server state: the resolver plus the shell-owned cache and rate
//! limiter. The resolver is called as a black box; the shell never
//! inspects its retry internals.

use std::time::Duration;

use etym_engine::Resolver;

use crate::cache::LookupCache;
use crate::ratelimit::RateLimiter;

pub struct EtymologyService {
    pub resolver: Resolver,
    pub cache: LookupCache,
    pub limiter: RateLimiter,
}

impl EtymologyService {
    pub fn new(resolver: Resolver, cache_ttl: Duration, per_minute: u32, per_day: u32) -> Self {
        Self {
            resolver,
            cache: LookupCache::new(cache_ttl),
            limiter: RateLimiter::new(per_minute, per_day),
        }
    }
}
