//! An arena-backed skip list map.
//!
//! [`SkipList`] keeps unique keys in sorted order and answers point queries
//! in expected `O(log n)` time without any rebalancing: each node is given
//! a random "tower height" at insertion, and taller towers act as express
//! lanes over the bottom-level linked list.
//!
//! Nodes live in a growable arena and link to each other by index, so the
//! whole structure is safe code and a deleted slot is recycled by the next
//! insert. The level RNG is owned by the list and can be seeded through
//! [`SkipList::with_seed`] for reproducible structure.
//!
//! ```
//! use arena_skiplist::SkipList;
//!
//! let mut sk = SkipList::new(16);
//! assert!(sk.insert(5, "five"));
//! assert!(sk.insert(3, "three"));
//! assert!(!sk.insert(5, "again")); // duplicate keys are rejected
//! assert!(sk.contains(&3));
//! assert!(sk.remove(&3));
//! assert!(!sk.contains(&3));
//! ```

mod arena;
mod level;
#[cfg(feature = "serde_support")]
mod serde;

use crate::arena::{Arena, Node, HEAD};
#[cfg(any(test, feature = "serde_support"))]
use crate::arena::Link;
use crate::level::LevelGenerator;
use std::fmt;
use std::iter::FromIterator;

/// Level ceiling used by [`Default`], comfortable up to millions of keys.
pub const DEFAULT_MAX_LEVEL: usize = 16;

/// An ordered map over unique keys, backed by a skip list.
///
/// `max_level` is fixed at construction and caps every tower height; the
/// head sentinel spans all of `0..=max_level` for the lifetime of the list.
/// `level` tracks the tallest tower currently in use and only ever grows —
/// removals never lower it, they only empty the top lanes (see [`level`]).
///
/// [`level`]: SkipList::level
pub struct SkipList<K, V> {
    arena: Arena<K, V>,
    levels: LevelGenerator,
    max_level: usize,
    level: usize,
    len: usize,
    // predecessor scratch for insert, one slot per level, reused across calls
    update: Vec<usize>,
}

impl<K: Ord, V> SkipList<K, V> {
    /// Creates an empty list with tower heights capped at `max_level`.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is zero. A one-lane skip list is a plain
    /// linked list; refusing the configuration outright beats silently
    /// degrading to `O(n)` everywhere.
    pub fn new(max_level: usize) -> Self {
        Self::with_generator(max_level, LevelGenerator::new(max_level))
    }

    /// Like [`new`](SkipList::new), but with a seeded level RNG so the
    /// node towers come out identical run after run.
    pub fn with_seed(max_level: usize, seed: u64) -> Self {
        Self::with_generator(max_level, LevelGenerator::with_seed(max_level, seed))
    }

    fn with_generator(max_level: usize, levels: LevelGenerator) -> Self {
        assert!(max_level > 0, "SkipList requires max_level >= 1");
        SkipList {
            arena: Arena::new(max_level),
            levels,
            max_level,
            level: 0,
            len: 0,
            update: vec![HEAD; max_level + 1],
        }
    }

    /// Whether `key` is present. Expected `O(log n)`, no mutation.
    pub fn contains(&self, key: &K) -> bool {
        let mut cur = HEAD;
        for i in (0..=self.level).rev() {
            while let Some(next) = self.arena[cur].forward[i] {
                if self.arena[next].key < *key {
                    cur = next;
                } else {
                    break;
                }
            }
            // the first node not less than `key` might be the match
            if let Some(next) = self.arena[cur].forward[i] {
                if self.arena[next].key == *key {
                    return true;
                }
            }
        }
        false
    }

    /// Inserts `key -> value`. Returns `false` and leaves the list
    /// untouched if `key` is already present; existing values are never
    /// overwritten.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        // Descend as in `contains`, recording at each level the last node
        // strictly before the insertion point. Those are the nodes whose
        // forward links get rewritten below.
        let mut cur = HEAD;
        for i in (0..=self.level).rev() {
            while let Some(next) = self.arena[cur].forward[i] {
                if self.arena[next].key < key {
                    cur = next;
                } else {
                    break;
                }
            }
            if let Some(next) = self.arena[cur].forward[i] {
                if self.arena[next].key == key {
                    return false;
                }
            }
            self.update[i] = cur;
        }

        let level = self.levels.random_level();
        let idx = self.arena.alloc(Node::new(key, value, level));

        // Levels above the old top were empty, so the head links straight
        // to the new node there and the node's own links stay `None`.
        for i in self.level + 1..=level {
            self.arena[HEAD].forward[i] = Some(idx);
        }
        for i in 0..=level.min(self.level) {
            let pred = self.update[i];
            self.arena[idx].forward[i] = self.arena[pred].forward[i];
            self.arena[pred].forward[i] = Some(idx);
        }
        if level > self.level {
            self.level = level;
        }
        self.len += 1;

        #[cfg(debug_assertions)]
        self.check_invariants();
        true
    }

    /// Removes `key`, returning `false` if it was absent.
    ///
    /// The current level is deliberately left as-is even when the removed
    /// node was the sole occupant of the top lanes; searches just pass
    /// through the empty levels.
    pub fn remove(&mut self, key: &K) -> bool {
        // First pass: a search that keeps the matched node instead of
        // returning a boolean, so we learn its tower height.
        let mut target = None;
        let mut cur = HEAD;
        for i in (0..=self.level).rev() {
            while let Some(next) = self.arena[cur].forward[i] {
                if self.arena[next].key < *key {
                    cur = next;
                } else {
                    break;
                }
            }
            if let Some(next) = self.arena[cur].forward[i] {
                if self.arena[next].key == *key {
                    target = Some(next);
                    break;
                }
            }
        }
        let target = match target {
            Some(idx) => idx,
            None => return false,
        };

        // Second pass: re-descend over exactly the levels the target
        // occupies, patching each predecessor past it.
        let mut cur = HEAD;
        for i in (0..=self.arena[target].level()).rev() {
            while let Some(next) = self.arena[cur].forward[i] {
                if next == target {
                    break;
                }
                cur = next;
            }
            debug_assert_eq!(self.arena[cur].forward[i], Some(target));
            self.arena[cur].forward[i] = self.arena[target].forward[i];
        }

        self.arena.release(target);
        self.len -= 1;

        #[cfg(debug_assertions)]
        self.check_invariants();
        true
    }

    /// Number of stored key/value pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The configured tower-height ceiling.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Highest level any node has reached so far. Monotone: grows with
    /// tall inserts, never shrinks on removal.
    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    /// In-order walk of the bottom level.
    #[cfg(any(test, feature = "serde_support"))]
    pub(crate) fn entries(&self) -> Entries<'_, K, V> {
        Entries {
            list: self,
            cur: self.arena[HEAD].forward[0],
        }
    }

    /// Walks the whole node graph checking the structural invariants:
    /// strictly increasing keys within every level, the tower property
    /// (a node linked at level `i` is linked at every level below), and
    /// `len` matching the bottom-level chain.
    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        let mut below: Vec<usize> = Vec::new();
        for i in 0..=self.level {
            let mut row = Vec::new();
            let mut prev: Option<&K> = None;
            let mut cur = self.arena[HEAD].forward[i];
            while let Some(idx) = cur {
                let node = &self.arena[idx];
                let key = node.key.as_key().expect("non-head node without a key");
                if let Some(prev) = prev {
                    assert!(prev < key, "level {} is not strictly increasing", i);
                }
                assert!(
                    node.level() >= i,
                    "node linked above its own tower height"
                );
                prev = Some(key);
                row.push(idx);
                cur = node.forward[i];
            }
            if i == 0 {
                assert_eq!(row.len(), self.len, "len out of sync with level 0");
            } else {
                // tower property: every resident of level i lives at i - 1
                for idx in &row {
                    assert!(
                        below.contains(idx),
                        "node at level {} missing from level {}",
                        i,
                        i - 1
                    );
                }
            }
            below = row;
        }
    }
}

impl<K: Ord, V> Default for SkipList<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEVEL)
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SkipList<K, V> {
    /// Builds a list with [`DEFAULT_MAX_LEVEL`] by inserting every pair;
    /// later duplicates of a key are dropped.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut sk = SkipList::default();
        for (key, value) in iter {
            sk.insert(key, value);
        }
        sk
    }
}

impl<K: fmt::Debug, V> fmt::Debug for SkipList<K, V> {
    /// Renders every active level top-down, e.g.
    /// `[2] head -> 3 -> 8` over `[0] head -> 3 -> 5 -> 8`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "SkipList(len: {}, level: {}/{})",
            self.len, self.level, self.max_level
        )?;
        for i in (0..=self.level).rev() {
            write!(f, "[{}] head", i)?;
            let mut cur = self.arena[HEAD].forward[i];
            while let Some(idx) = cur {
                if let Some(key) = self.arena[idx].key.as_key() {
                    write!(f, " -> {:?}", key)?;
                }
                cur = self.arena[idx].forward[i];
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over `(key, value)` pairs in key order, straight down level 0.
#[cfg(any(test, feature = "serde_support"))]
pub(crate) struct Entries<'a, K, V> {
    list: &'a SkipList<K, V>,
    cur: Link,
}

#[cfg(any(test, feature = "serde_support"))]
impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cur?;
        let node = &self.list.arena[idx];
        self.cur = node.forward[0];
        Some((
            node.key.as_key().expect("non-head node without a key"),
            node.value.as_ref().expect("non-head node without a value"),
        ))
    }
}
