use std::hash::Hash;
use std::sync::Mutex;

use rustc_hash::FxHashMap;

use crate::traits::NeighbourLookup;

/// Memoizing wrapper around a [`NeighbourLookup`].
///
/// The first lookup of a node calls the inner strategy and stores the result;
/// later lookups of the same node are answered from the cache. Entries are
/// never evicted, so only wrap lookups whose answers do not change.
pub struct CachedNeighbours<T, N> {
    inner: N,
    cache: Mutex<FxHashMap<T, Vec<T>>>,
}

impl<T, N> CachedNeighbours<T, N> {
    /// Wrap `inner` with an empty cache.
    pub fn new(inner: N) -> Self {
        Self {
            inner,
            cache: Mutex::new(FxHashMap::default()),
        }
    }

    /// Number of nodes whose neighbours are cached.
    pub fn len(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether nothing is cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// The wrapped lookup.
    pub fn inner(&self) -> &N {
        &self.inner
    }

    /// Drop the cache and return the wrapped lookup.
    pub fn into_inner(self) -> N {
        self.inner
    }
}

impl<T, N> NeighbourLookup<T> for CachedNeighbours<T, N>
where
    T: Eq + Hash + Clone,
    N: NeighbourLookup<T>,
{
    fn neighbours(&self, node: &T, buf: &mut Vec<T>) {
        {
            let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(ns) = cache.get(node) {
                buf.extend(ns.iter().cloned());
                return;
            }
        }
        // The lock is not held while the inner lookup runs; two threads
        // missing on the same node both compute it and the first store wins.
        let mut ns = Vec::new();
        self.inner.neighbours(node, &mut ns);
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        let ns = cache.entry(node.clone()).or_insert(ns);
        buf.extend(ns.iter().cloned());
    }
}
