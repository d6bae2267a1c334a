//! Bounded, expiring, least-recently-used cache for resolution results.
//!
//! Entries expire lazily at read time; there is no background sweep. Eviction
//! on overflow is governed by recency alone, not by validity, which bounds
//! memory independent of TTL misconfiguration. A single mutex guards each
//! whole read-check-evict and write-evict sequence, so the cache is safe to
//! share across concurrent enumeration callers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::config::Settings;
use crate::models::CacheStats;

struct CacheEntry {
    addresses: Vec<String>,
    stored_at: Instant,
    ttl: Duration,
    last_used: u64,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) > self.ttl
    }
}

struct CacheState {
    entries: HashMap<String, CacheEntry>,
    // Monotone counter; bumped on every get/set touch. The entry with the
    // smallest value is the least recently used.
    clock: u64,
}

impl CacheState {
    fn touch(&mut self, key: &str) {
        self.clock += 1;
        if let Some(entry) = self.entries.get_mut(key) {
            entry.last_used = self.clock;
        }
    }

    fn evict_lru(&mut self) {
        if let Some(oldest) = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone())
        {
            self.entries.remove(&oldest);
            debug!("Cache full, evicted: {oldest}");
        }
    }
}

/// LRU cache for DNS query results.
///
/// Cloning is cheap and all clones share the same underlying store via `Arc`.
#[derive(Clone)]
pub struct DnsCache {
    inner: Arc<Mutex<CacheState>>,
    max_size: usize,
    default_ttl: Duration,
}

impl DnsCache {
    /// Creates an empty cache with the given capacity and default TTL.
    pub fn new(max_size: usize, default_ttl: Duration) -> Self {
        info!(
            "DNS cache initialized (max_size={max_size}, default_ttl={}s)",
            default_ttl.as_secs()
        );
        DnsCache {
            inner: Arc::new(Mutex::new(CacheState {
                entries: HashMap::new(),
                clock: 0,
            })),
            max_size,
            default_ttl,
        }
    }

    /// Creates a cache sized per `dns.cache_size` / `dns.ttl`.
    pub fn with_settings(settings: &Settings) -> Self {
        Self::new(settings.dns.cache_size, settings.dns.default_ttl())
    }

    fn make_key(hostname: &str, record_type: &str) -> String {
        format!(
            "{}:{}",
            hostname.to_ascii_lowercase(),
            record_type.to_ascii_uppercase()
        )
    }

    /// Returns the cached addresses for the hostname/record-type pair.
    ///
    /// Expired entries are removed on the spot and reported as absent. A hit
    /// marks the entry most recently used.
    pub fn get(&self, hostname: &str, record_type: &str) -> Option<Vec<String>> {
        let key = Self::make_key(hostname, record_type);
        let mut state = self.inner.lock().ok()?;

        let entry = match state.entries.get(&key) {
            Some(entry) => entry,
            None => {
                debug!("Cache miss: {key}");
                return None;
            }
        };

        if entry.is_expired(Instant::now()) {
            state.entries.remove(&key);
            debug!("Cache expired: {key}");
            return None;
        }

        let addresses = entry.addresses.clone();
        state.touch(&key);
        debug!("Cache hit: {key} -> {addresses:?}");
        Some(addresses)
    }

    /// Inserts or refreshes an entry, then evicts the least-recently-used
    /// entry if the store exceeds capacity. `ttl` of `None` uses the
    /// configured default.
    pub fn set(
        &self,
        hostname: &str,
        addresses: Vec<String>,
        record_type: &str,
        ttl: Option<Duration>,
    ) {
        let key = Self::make_key(hostname, record_type);
        let cache_ttl = ttl.unwrap_or(self.default_ttl);

        if let Ok(mut state) = self.inner.lock() {
            state.clock += 1;
            let last_used = state.clock;
            state.entries.insert(
                key.clone(),
                CacheEntry {
                    addresses,
                    stored_at: Instant::now(),
                    ttl: cache_ttl,
                    last_used,
                },
            );

            if state.entries.len() > self.max_size {
                state.evict_lru();
            }

            debug!("Cached: {key} (TTL={}s)", cache_ttl.as_secs());
        }
    }

    /// Removes one entry, if present.
    pub fn remove(&self, hostname: &str, record_type: &str) {
        let key = Self::make_key(hostname, record_type);
        if let Ok(mut state) = self.inner.lock() {
            if state.entries.remove(&key).is_some() {
                debug!("Removed from cache: {key}");
            }
        }
    }

    /// Removes every entry.
    pub fn clear(&self) {
        if let Ok(mut state) = self.inner.lock() {
            let count = state.entries.len();
            state.entries.clear();
            info!("Cache cleared ({count} entries removed)");
        }
    }

    /// Counts total, valid, and expired entries against the TTL invariant at
    /// call time. Does not remove anything.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let (total, expired) = match self.inner.lock() {
            Ok(state) => {
                let expired = state
                    .entries
                    .values()
                    .filter(|entry| entry.is_expired(now))
                    .count();
                (state.entries.len(), expired)
            }
            Err(_) => (0, 0),
        };
        CacheStats {
            total_entries: total,
            valid_entries: total - expired,
            expired_entries: expired,
            max_size: self.max_size,
        }
    }
}
