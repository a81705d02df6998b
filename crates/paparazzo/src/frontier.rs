use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Per-node bookkeeping for one search invocation.
#[derive(Debug, Clone)]
pub(crate) struct NodeRecord<T> {
    pub(crate) node: T,
    pub(crate) g: f64,
    pub(crate) h: f64,
    /// Slot of the predecessor on the best known path. `None` only for the start.
    pub(crate) parent: Option<usize>,
    pub(crate) open: bool,
    pub(crate) closed: bool,
}

impl<T> NodeRecord<T> {
    #[inline]
    pub(crate) fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// Frontier entry, ordered by `f`, then `h`, then discovery order.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenKey {
    pub(crate) f: f64,
    pub(crate) h: f64,
    pub(crate) slot: usize,
}

impl Ord for OpenKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then_with(|| self.h.total_cmp(&other.h))
            .then_with(|| self.slot.cmp(&other.slot))
    }
}

impl PartialOrd for OpenKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenKey {}

// ---------------------------------------------------------------------------
// SearchState
// ---------------------------------------------------------------------------

/// Everything one search owns: node records, the node-to-slot index, and the
/// ordered open set. Dropped when the search returns.
///
/// Records live in an arena and are addressed by slot; slots are handed out in
/// discovery order and never reused within one search.
pub(crate) struct SearchState<T> {
    records: Vec<NodeRecord<T>>,
    index: FxHashMap<T, usize>,
    open: BTreeSet<OpenKey>,
}

impl<T: Eq + Hash + Clone> SearchState<T> {
    pub(crate) fn new() -> Self {
        Self {
            records: Vec::new(),
            index: FxHashMap::default(),
            open: BTreeSet::new(),
        }
    }

    #[inline]
    pub(crate) fn slot_of(&self, node: &T) -> Option<usize> {
        self.index.get(node).copied()
    }

    #[inline]
    pub(crate) fn record(&self, slot: usize) -> &NodeRecord<T> {
        &self.records[slot]
    }

    /// Number of nodes discovered so far.
    #[inline]
    pub(crate) fn discovered(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub(crate) fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Register a newly discovered node and put it in the open set.
    pub(crate) fn discover(&mut self, node: T, g: f64, h: f64, parent: Option<usize>) -> usize {
        let slot = self.records.len();
        self.index.insert(node.clone(), slot);
        self.records.push(NodeRecord {
            node,
            g,
            h,
            parent,
            open: true,
            closed: false,
        });
        self.open.insert(OpenKey { f: g + h, h, slot });
        slot
    }

    /// Set new costs and parent for `slot`, placing it in the open set exactly once.
    pub(crate) fn reopen(&mut self, slot: usize, g: f64, h: f64, parent: usize) {
        let rec = &mut self.records[slot];
        if rec.open {
            let old = OpenKey {
                f: rec.f(),
                h: rec.h,
                slot,
            };
            self.open.remove(&old);
        }
        rec.g = g;
        rec.h = h;
        rec.parent = Some(parent);
        rec.open = true;
        self.open.insert(OpenKey { f: g + h, h, slot });
    }

    /// Remove and return the slot with the lowest key.
    pub(crate) fn pop_min(&mut self) -> Option<usize> {
        let key = self.open.pop_first()?;
        self.records[key.slot].open = false;
        Some(key.slot)
    }

    pub(crate) fn close(&mut self, slot: usize) {
        let rec = &mut self.records[slot];
        rec.open = false;
        rec.closed = true;
    }

    /// Walk parent links from `slot` back to the start and return the nodes in
    /// start-to-`slot` order.
    pub(crate) fn trace_back(&self, slot: usize) -> Vec<T> {
        let mut nodes = Vec::new();
        let mut cur = Some(slot);
        while let Some(s) = cur {
            let rec = &self.records[s];
            nodes.push(rec.node.clone());
            cur = rec.parent;
        }
        nodes.reverse();
        nodes
    }
}
