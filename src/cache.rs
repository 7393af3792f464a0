//! Explicit caches backing the client factory and the accessor facade.
//!
//! The handle lives in a [`TtlSlot`] (one value, time-boxed reuse) and every
//! accessor owns its own [`MemoCache`] keyed by a digest of its declared
//! arguments. Both are plain objects handed to their owners, so lifecycle
//! and invalidation stay visible to callers and to tests.

use std::{
    collections::HashMap,
    future::Future,
    hash::{DefaultHasher, Hash, Hasher},
    sync::RwLock,
    time::{Duration, Instant}
};

use crate::error::AppResult;

/// Digest a tuple of accessor arguments into a cache key
pub fn memo_key<K: Hash + ?Sized>(args: &K) -> u64 {
    let mut hasher = DefaultHasher::new();
    args.hash(&mut hasher);
    hasher.finish()
}

/// Argument-keyed memoization cache for a single accessor
pub struct MemoCache<V> {
    entries:  RwLock<HashMap<u64, V>>,
    max_size: usize
}

impl<V: Clone> MemoCache<V> {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries:  RwLock::new(HashMap::with_capacity(max_size.min(64))),
            max_size
        }
    }

    pub fn lookup(&self, key: u64) -> Option<V> {
        self.entries.read().ok()?.get(&key).cloned()
    }

    pub fn store(&self, key: u64, value: V) {
        if let Ok(mut entries) = self.entries.write() {
            // Simple eviction: clear half when full
            if entries.len() >= self.max_size {
                let keys: Vec<_> = entries.keys().take(self.max_size / 2).copied().collect();
                for key in keys {
                    entries.remove(&key);
                }
            }
            entries.insert(key, value);
        }
    }

    /// Return the cached value for `key`, or await `load`, remembering its
    /// result. Failed loads are not remembered.
    pub async fn get_or_load<F, Fut>(&self, key: u64, load: F) -> AppResult<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<V>>
    {
        if let Some(hit) = self.lookup(key) {
            return Ok(hit);
        }
        let value = load().await?;
        self.store(key, value.clone());
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Time-boxed single-slot cache
pub struct TtlSlot<T> {
    slot: RwLock<Option<SlotEntry<T>>>,
    ttl:  Duration
}

struct SlotEntry<T> {
    value:     T,
    stored_at: Instant
}

impl<T: Clone> TtlSlot<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl
        }
    }

    /// Stored value if the window has not elapsed
    pub fn get(&self) -> Option<T> {
        let guard = self.slot.read().ok()?;
        let entry = guard.as_ref()?;
        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub fn put(&self, value: T) {
        if let Ok(mut guard) = self.slot.write() {
            *guard = Some(SlotEntry {
                value,
                stored_at: Instant::now()
            });
        }
    }

    /// Drop the stored value before its window elapses
    pub fn clear(&self) {
        if let Ok(mut guard) = self.slot.write() {
            *guard = None;
        }
    }
}
