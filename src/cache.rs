use dashmap::DashMap;

/// Freshness window shared by both resource kinds: a cached response younger
/// than one minute is served without touching the upstream provider.
pub const FRESHNESS_WINDOW_MS: u64 = 60_000;

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}

/// Returns true iff an entry fetched at `fetched_at_ms` is still fresh at
/// `now_ms`. The boundary is exclusive: an entry exactly `window_ms` old is
/// stale.
pub fn is_fresh(fetched_at_ms: u64, now_ms: u64, window_ms: u64) -> bool {
    now_ms.saturating_sub(fetched_at_ms) < window_ms
}

#[derive(Clone, Debug)]
struct CacheEntry<V> {
    value: V,
    fetched_at_ms: u64,
}

/// Time-windowed response cache keyed by a request identifier (postal code,
/// ticker symbol).
///
/// Value and fetch timestamp are stored as a single entry per key, so one can
/// never be observed without the other. Entries are only ever overwritten,
/// never removed: the map grows with the set of distinct keys requested over
/// the process lifetime.
///
/// Concurrent `put`s on the same key are last-writer-wins. The cache does not
/// deduplicate concurrent misses; two handlers racing on a stale key may both
/// fetch upstream and both write.
pub struct TtlCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    window_ms: u64,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(window_ms: u64) -> Self {
        Self {
            entries: DashMap::new(),
            window_ms,
        }
    }

    /// Pure lookup: returns the stored value and its fetch timestamp, fresh
    /// or not. Never mutates the map.
    pub fn get(&self, key: &str) -> Option<(V, u64)> {
        self.entries
            .get(key)
            .map(|e| (e.value.clone(), e.fetched_at_ms))
    }

    /// Returns the stored value only if it is still fresh at `now_ms`.
    pub fn get_fresh(&self, key: &str, now_ms: u64) -> Option<V> {
        self.get(key).and_then(|(value, fetched_at_ms)| {
            is_fresh(fetched_at_ms, now_ms, self.window_ms).then_some(value)
        })
    }

    /// Stores `value` under `key`, overwriting any prior entry.
    pub fn put(&self, key: &str, value: V, now_ms: u64) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                fetched_at_ms: now_ms,
            },
        );
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
