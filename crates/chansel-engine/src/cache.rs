//! Per-session provider caches.
//!
//! Each strategy gets exactly one slot, keyed by its identifier, and is the
//! only reader or writer of that slot. The owner of [`ProviderCaches`] can
//! only wipe everything at once, which happens when the browser session is
//! recreated.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Discovered layout facts for one provider (row positions, resolved URLs).
#[derive(Debug, Clone, Default)]
pub struct ProviderCache {
    entries: HashMap<String, Value>,
}

impl ProviderCache {
    /// Fetch and decode an entry. An entry that no longer decodes as `T`
    /// reads as missing.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.entries
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn insert<T: Serialize>(&mut self, key: impl Into<String>, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.entries.insert(key.into(), v);
            }
            Err(e) => debug!("Skipping unserializable cache entry: {}", e),
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Default)]
pub struct ProviderCaches {
    slots: HashMap<String, ProviderCache>,
}

impl ProviderCaches {
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot owned by `strategy_id`, created empty on first use.
    pub fn slot_mut(&mut self, strategy_id: &str) -> &mut ProviderCache {
        self.slots.entry(strategy_id.to_string()).or_default()
    }

    pub fn slot(&self, strategy_id: &str) -> Option<&ProviderCache> {
        self.slots.get(strategy_id)
    }

    /// Wipe every slot. Idempotent.
    pub fn clear_all(&mut self) {
        debug!("Clearing {} provider cache slot(s)", self.slots.len());
        self.slots.clear();
    }

    /// True when no slot holds any entry.
    pub fn is_empty(&self) -> bool {
        self.slots.values().all(ProviderCache::is_empty)
    }
}
