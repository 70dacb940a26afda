//! Ordered multiset backed by a skip list.
//!
//! A probabilistically balanced ordered container: expected O(log N)
//! insert/remove/search, driven by a caller-supplied three-way comparator.
//! Nodes live in an index-based arena rather than behind raw pointers, and
//! removed nodes are cached in per-level free lists so heavy insert/remove
//! cycles do not churn the allocator.
//!
//! The container is used both as a general ordered index and as scratch
//! storage while compiling motif patterns, where it is filled, drained in
//! comparator order, and left empty again.

use std::cmp::Ordering;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Hard cap on node levels. With promotion probability 1/4 this comfortably
/// covers containers far larger than anything the record formats produce.
pub const MAX_LEVEL: usize = 16;

/// Default baseline for the node pool: how many base-level nodes to cache.
pub const DEFAULT_SAVE_BUDGET: usize = 32;

/// Arena index of the head sentinel.
const HEAD: u32 = 0;

/// Null link.
const NIL: u32 = u32::MAX;

/// Whether equal payloads may coexist in the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duplicates {
    Allow,
    Reject,
}

/// Outcome of [`SkipList::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Insert {
    Inserted,
    /// An equal payload was already present and the policy rejects
    /// duplicates; the container was not modified.
    Duplicate,
}

/// Visitor verdict for [`SkipList::for_each`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// Remove the node just visited.
    pub delete: bool,
    /// Stop iterating after this node.
    pub stop: bool,
}

impl Visit {
    pub const CONTINUE: Visit = Visit {
        delete: false,
        stop: false,
    };
    pub const DELETE: Visit = Visit {
        delete: true,
        stop: false,
    };
    pub const STOP: Visit = Visit {
        delete: false,
        stop: true,
    };
    pub const DELETE_AND_STOP: Visit = Visit {
        delete: true,
        stop: true,
    };
}

struct Node<T> {
    /// `None` for the head sentinel and for free/retired slots.
    payload: Option<T>,
    /// One forward link per level this node participates in.
    forward: Vec<u32>,
}

/// Comparator-driven ordered multiset.
pub struct SkipList<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    nodes: Vec<Node<T>>,
    /// Number of levels currently in use (at least 1).
    level: usize,
    len: usize,
    cmp: C,
    duplicates: Duplicates,
    rng: SmallRng,
    /// Free arena slots, one list per node level.
    pool: Vec<Vec<u32>>,
    /// Cap on each free list, derived from the save budget.
    pool_cap: Vec<usize>,
}

impl<T, C> SkipList<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Create an empty container with the default node-pool budget.
    pub fn new(cmp: C, duplicates: Duplicates) -> Self {
        Self::with_save_budget(cmp, duplicates, DEFAULT_SAVE_BUDGET)
    }

    /// Create an empty container caching up to `budget` base-level nodes.
    pub fn with_save_budget(cmp: C, duplicates: Duplicates, budget: usize) -> Self {
        let head = Node {
            payload: None,
            forward: vec![NIL; MAX_LEVEL],
        };
        Self {
            nodes: vec![head],
            level: 1,
            len: 0,
            cmp,
            duplicates,
            rng: SmallRng::from_os_rng(),
            pool: vec![Vec::new(); MAX_LEVEL],
            pool_cap: Self::derive_caps(budget),
        }
    }

    /// Deterministic level draws, for tests.
    pub fn with_rng_seed(cmp: C, duplicates: Duplicates, seed: u64) -> Self {
        let mut list = Self::new(cmp, duplicates);
        list.rng = SmallRng::seed_from_u64(seed);
        list
    }

    /// Each level caches roughly 3/4 as many nodes as the one below,
    /// matching how scarce high-level nodes are.
    fn derive_caps(budget: usize) -> Vec<usize> {
        let mut caps = Vec::with_capacity(MAX_LEVEL);
        let mut cap = budget;
        for _ in 0..MAX_LEVEL {
            caps.push(cap);
            cap = cap * 3 / 4;
        }
        caps
    }

    /// Lower (or raise) the node-pool budget, immediately freeing any
    /// cached nodes over the new per-level caps.
    pub fn set_save_budget(&mut self, budget: usize) {
        self.pool_cap = Self::derive_caps(budget);
        for (lvl, free) in self.pool.iter_mut().enumerate() {
            while free.len() > self.pool_cap[lvl] {
                if let Some(idx) = free.pop() {
                    // Retire the slot: payload is already gone, drop the
                    // link storage too.
                    self.nodes[idx as usize].forward = Vec::new();
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn draw_level(&mut self) -> usize {
        let mut level = 1;
        while level < MAX_LEVEL && self.rng.random_ratio(1, 4) {
            level += 1;
        }
        level
    }

    fn alloc_node(&mut self, level: usize, payload: T) -> u32 {
        if let Some(idx) = self.pool[level - 1].pop() {
            let node = &mut self.nodes[idx as usize];
            node.payload = Some(payload);
            node.forward.clear();
            node.forward.resize(level, NIL);
            idx
        } else {
            self.nodes.push(Node {
                payload: Some(payload),
                forward: vec![NIL; level],
            });
            (self.nodes.len() - 1) as u32
        }
    }

    /// Return a removed node's slot to the pool for its level, or retire it
    /// when that level's cache is full.
    fn recycle(&mut self, idx: u32) {
        let level = self.nodes[idx as usize].forward.len();
        if self.pool[level - 1].len() < self.pool_cap[level - 1] {
            self.nodes[idx as usize].forward.fill(NIL);
            self.pool[level - 1].push(idx);
        } else {
            self.nodes[idx as usize].forward = Vec::new();
        }
    }

    /// Drop empty top levels after a removal.
    fn shrink_level(&mut self) {
        while self.level > 1 && self.nodes[HEAD as usize].forward[self.level - 1] == NIL {
            self.level -= 1;
        }
    }

    /// Walk down from the top level, recording the last node visited per
    /// level (the update vector). Afterwards `update[0]`'s base-level
    /// successor is the first node not less than `key`.
    fn find_update(&self, key: &T) -> [u32; MAX_LEVEL] {
        let mut update = [HEAD; MAX_LEVEL];
        let mut x = HEAD;
        for lvl in (0..self.level).rev() {
            loop {
                let next = self.nodes[x as usize].forward[lvl];
                if next == NIL {
                    break;
                }
                let next_payload = self.nodes[next as usize]
                    .payload
                    .as_ref()
                    .expect("linked node has a payload");
                if (self.cmp)(next_payload, key) == Ordering::Less {
                    x = next;
                } else {
                    break;
                }
            }
            update[lvl] = x;
        }
        update
    }

    /// Insert a payload at its ordered position.
    pub fn insert(&mut self, payload: T) -> Insert {
        let mut update = self.find_update(&payload);

        if self.duplicates == Duplicates::Reject {
            let next = self.nodes[update[0] as usize].forward[0];
            if next != NIL {
                let next_payload = self.nodes[next as usize]
                    .payload
                    .as_ref()
                    .expect("linked node has a payload");
                if (self.cmp)(next_payload, &payload) == Ordering::Equal {
                    return Insert::Duplicate;
                }
            }
        }

        let level = self.draw_level();
        if level > self.level {
            for item in update.iter_mut().take(level).skip(self.level) {
                *item = HEAD;
            }
            self.level = level;
        }

        let idx = self.alloc_node(level, payload);
        for lvl in 0..level {
            let pred = update[lvl] as usize;
            self.nodes[idx as usize].forward[lvl] = self.nodes[pred].forward[lvl];
            self.nodes[pred].forward[lvl] = idx;
        }
        self.len += 1;
        Insert::Inserted
    }

    /// Remove the first payload comparing equal to `key` and return it.
    pub fn remove(&mut self, key: &T) -> Option<T> {
        let update = self.find_update(key);
        let idx = self.nodes[update[0] as usize].forward[0];
        if idx == NIL {
            return None;
        }
        {
            let candidate = self.nodes[idx as usize]
                .payload
                .as_ref()
                .expect("linked node has a payload");
            if (self.cmp)(candidate, key) != Ordering::Equal {
                return None;
            }
        }
        for lvl in 0..self.level {
            let pred = update[lvl] as usize;
            if self.nodes[pred].forward[lvl] == idx {
                self.nodes[pred].forward[lvl] = self.nodes[idx as usize].forward[lvl];
            }
        }
        let payload = self.nodes[idx as usize].payload.take();
        self.recycle(idx);
        self.shrink_level();
        self.len -= 1;
        payload
    }

    /// Find the first payload comparing equal to `key`.
    pub fn search(&self, key: &T) -> Option<&T> {
        let update = self.find_update(key);
        let next = self.nodes[update[0] as usize].forward[0];
        if next == NIL {
            return None;
        }
        let payload = self.nodes[next as usize]
            .payload
            .as_ref()
            .expect("linked node has a payload");
        if (self.cmp)(payload, key) == Ordering::Equal {
            Some(payload)
        } else {
            None
        }
    }

    /// Indexed access by ordered position.
    ///
    /// Deliberately a linear walk at the base level: callers only ever
    /// drain the container front to back, never random-access it.
    pub fn nth(&self, n: usize) -> Option<&T> {
        let mut x = self.nodes[HEAD as usize].forward[0];
        let mut i = 0;
        while x != NIL {
            if i == n {
                return self.nodes[x as usize].payload.as_ref();
            }
            x = self.nodes[x as usize].forward[0];
            i += 1;
        }
        None
    }

    /// Remove and return the smallest payload.
    pub fn pop_front(&mut self) -> Option<T> {
        let idx = self.nodes[HEAD as usize].forward[0];
        if idx == NIL {
            return None;
        }
        Some(self.detach(idx))
    }

    /// Visit payloads in comparator order. The visitor may ask to delete
    /// the current node and/or stop iterating; deletions mid-traversal are
    /// safe because the successor is captured before the unsplice.
    pub fn for_each(&mut self, mut visitor: impl FnMut(&T) -> Visit) {
        let mut x = self.nodes[HEAD as usize].forward[0];
        while x != NIL {
            let next = self.nodes[x as usize].forward[0];
            let verdict = {
                let payload = self.nodes[x as usize]
                    .payload
                    .as_ref()
                    .expect("linked node has a payload");
                visitor(payload)
            };
            if verdict.delete {
                let _ = self.detach(x);
            }
            if verdict.stop {
                break;
            }
            x = next;
        }
    }

    /// Unsplice a known-linked node from every level it participates in.
    fn detach(&mut self, idx: u32) -> T {
        let node_levels = self.nodes[idx as usize].forward.len();
        for lvl in (0..node_levels).rev() {
            let mut x = HEAD;
            loop {
                let next = self.nodes[x as usize].forward[lvl];
                if next == idx {
                    self.nodes[x as usize].forward[lvl] = self.nodes[idx as usize].forward[lvl];
                    break;
                }
                debug_assert!(next != NIL, "node not linked at its own level");
                x = next;
            }
        }
        let payload = self.nodes[idx as usize]
            .payload
            .take()
            .expect("linked node has a payload");
        self.recycle(idx);
        self.shrink_level();
        self.len -= 1;
        payload
    }
}
