//! Per-source cache of decoded scans and derived azimuth edges.

use lru::LruCache;
use polar_grid::PolarScan;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// A decoded scan plus its azimuth cell edges, shared between the cache and
/// in-flight builds.
#[derive(Debug)]
pub struct ScanRecord {
    pub scan: PolarScan,
    pub edges: Vec<f64>,
}

/// Shared handle to a cached scan record.
pub type ScanEntry = Arc<ScanRecord>;

/// Cache statistics snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Maps source identifiers to decoded scans.
///
/// The baseline policy retains entries for the whole session: interactive
/// scan stepping revisits a small set of sources, and decoding is the
/// expensive step worth keeping. Deployments paging through long archives
/// can set a bound to get LRU eviction instead.
pub struct ScanCache {
    entries: LruCache<String, ScanEntry>,
    hits: u64,
    misses: u64,
}

impl ScanCache {
    /// Create a cache, unbounded when `max_entries` is `None`.
    pub fn new(max_entries: Option<usize>) -> Self {
        let entries = match max_entries.and_then(NonZeroUsize::new) {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };
        Self {
            entries,
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a scan, counting the hit or miss.
    pub fn get(&mut self, source_id: &str) -> Option<ScanEntry> {
        match self.entries.get(source_id) {
            Some(entry) => {
                self.hits += 1;
                Some(Arc::clone(entry))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insert a freshly decoded scan. Callers insert only after a successful
    /// decode, so a failed load never pollutes the cache.
    pub fn insert(&mut self, source_id: String, entry: ScanEntry) {
        self.entries.put(source_id, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}
