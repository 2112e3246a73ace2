use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

/// Arena index of a successor node, or `None` past the last node of a level.
pub(crate) type Link = Option<usize>;

/// Slot index of the head sentinel. Allocated at construction, never released.
pub(crate) const HEAD: usize = 0;

/// A node's key slot. The head sentinel carries no key; it compares strictly
/// less than every real key and never compares equal to one.
#[derive(Debug)]
pub(crate) enum NodeKey<K> {
    Head,
    Key(K),
}

impl<K> NodeKey<K> {
    #[inline]
    pub(crate) fn as_key(&self) -> Option<&K> {
        match self {
            NodeKey::Key(k) => Some(k),
            NodeKey::Head => None,
        }
    }
}

impl<K: PartialEq> PartialEq<K> for NodeKey<K> {
    #[inline]
    fn eq(&self, other: &K) -> bool {
        match self {
            NodeKey::Key(k) => k == other,
            NodeKey::Head => false,
        }
    }
}

impl<K: PartialOrd> PartialOrd<K> for NodeKey<K> {
    #[inline]
    fn partial_cmp(&self, other: &K) -> Option<Ordering> {
        match self {
            NodeKey::Key(k) => k.partial_cmp(other),
            NodeKey::Head => Some(Ordering::Less),
        }
    }
}

/// One stored key/value pair at a fixed tower height.
///
/// A node at level `l` participates in levels `0..=l`, so `forward` has
/// `l + 1` entries, one successor link per level.
pub(crate) struct Node<K, V> {
    pub(crate) key: NodeKey<K>,
    pub(crate) value: Option<V>,
    pub(crate) forward: Vec<Link>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, level: usize) -> Self {
        Node {
            key: NodeKey::Key(key),
            value: Some(value),
            forward: vec![None; level + 1],
        }
    }

    /// The head sentinel spans every level up to `max_level` and holds no data.
    pub(crate) fn head(max_level: usize) -> Self {
        Node {
            key: NodeKey::Head,
            value: None,
            forward: vec![None; max_level + 1],
        }
    }

    /// Highest level this node is linked at.
    #[inline]
    pub(crate) fn level(&self) -> usize {
        self.forward.len() - 1
    }
}

/// Growable node store addressed by `usize` index.
///
/// Links between nodes are arena indices rather than pointers, so splicing
/// a node in or out is a plain `Option<usize>` assignment and the borrow
/// checker never sees two nodes at once. Slots freed by `release` are
/// recycled by the next `alloc`.
pub(crate) struct Arena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new(max_level: usize) -> Self {
        Arena {
            slots: vec![Some(Node::head(max_level))],
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Vacate a slot and queue it for reuse. The caller must already have
    /// unlinked the node at every level it participates in.
    pub(crate) fn release(&mut self, idx: usize) -> Node<K, V> {
        debug_assert_ne!(idx, HEAD, "the head sentinel is never released");
        let node = self.slots[idx].take().expect("released a vacant arena slot");
        self.free.push(idx);
        node
    }
}

impl<K, V> Index<usize> for Arena<K, V> {
    type Output = Node<K, V>;

    #[inline]
    fn index(&self, idx: usize) -> &Node<K, V> {
        self.slots[idx].as_ref().expect("link into a vacant arena slot")
    }
}

impl<K, V> IndexMut<usize> for Arena<K, V> {
    #[inline]
    fn index_mut(&mut self, idx: usize) -> &mut Node<K, V> {
        self.slots[idx].as_mut().expect("link into a vacant arena slot")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_compares_below_everything() {
        let head = NodeKey::<i32>::Head;
        assert!(head < i32::min_value());
        assert!(!(head == 0));
        assert_eq!(NodeKey::Key(3), 3);
        assert!(NodeKey::Key(3) < 4);
    }

    #[test]
    fn node_spans_level_plus_one() {
        let node = Node::new("k", 1u8, 4);
        assert_eq!(node.forward.len(), 5);
        assert_eq!(node.level(), 4);
        assert!(node.forward.iter().all(Option::is_none));
    }

    #[test]
    fn released_slots_are_reused() {
        let mut arena = Arena::new(3);
        let a = arena.alloc(Node::new(1, (), 0));
        let b = arena.alloc(Node::new(2, (), 1));
        assert_eq!((a, b), (1, 2));

        let node = arena.release(a);
        assert_eq!(node.key, 1);

        // alloc after release fills the vacated slot before growing
        let c = arena.alloc(Node::new(3, (), 2));
        assert_eq!(c, a);
        assert_eq!(arena[c].level(), 2);
    }
}
