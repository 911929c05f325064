use std::ptr::{self, NonNull};

use derive_more::IsVariant;

pub(crate) type Link<K, V> = Option<NodePtr<K, V>>;

/// Node colours for the balancing invariants. Nil links count as Black, see [`colour_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub(crate) enum Colour {
    Red,
    Black,
}

// NOTE: This implementation uses Box<T> rather than alloc to allocate space on the heap, because
// Box<T> has the special property that dereferencing it allows a value to be moved out of the heap.

/// A copyable handle to a heap-allocated [`Node`]. The tree owns each node exclusively through its
/// root and child links; parent links are back-references only and never imply ownership.
#[derive(Debug)]
pub(crate) struct NodePtr<K, V>(NonNull<Node<K, V>>);

impl<K, V> NodePtr<K, V> {
    pub(crate) fn from_node(node: Node<K, V>) -> NodePtr<K, V> {
        NodePtr(Box::into_non_null(Box::new(node)))
    }

    /// Reclaims the node as an owned value, freeing the allocation when it drops.
    pub(crate) fn take_node(self) -> Node<K, V> {
        // SAFETY: The pointer originates from Box::into_non_null in from_node, and the caller is
        // unlinking the node from the tree, so ownership transfers exactly once.
        unsafe { *Box::from_non_null(self.0) }
    }

    pub(crate) const fn key<'a>(&self) -> &'a K {
        // SAFETY: The node is alive for as long as it is linked into a tree.
        unsafe { &(*self.0.as_ptr()).key }
    }

    pub(crate) const fn value<'a>(&self) -> &'a V {
        // SAFETY: As for key.
        unsafe { &(*self.0.as_ptr()).value }
    }

    pub(crate) const fn value_mut<'a>(&mut self) -> &'a mut V {
        // SAFETY: As for key; exclusivity is enforced by the borrow the caller holds on the tree.
        unsafe { &mut (*self.0.as_ptr()).value }
    }

    pub(crate) const fn entry<'a>(&self) -> (&'a K, &'a V) {
        (self.key(), self.value())
    }

    pub(crate) fn left(&self) -> Link<K, V> {
        // SAFETY: As for key.
        unsafe { (*self.0.as_ptr()).left }
    }

    #[allow(clippy::mut_from_ref)]
    pub(crate) fn left_mut<'a>(&self) -> &'a mut Link<K, V> {
        // SAFETY: As for value_mut.
        unsafe { &mut (*self.0.as_ptr()).left }
    }

    pub(crate) fn right(&self) -> Link<K, V> {
        // SAFETY: As for key.
        unsafe { (*self.0.as_ptr()).right }
    }

    #[allow(clippy::mut_from_ref)]
    pub(crate) fn right_mut<'a>(&self) -> &'a mut Link<K, V> {
        // SAFETY: As for value_mut.
        unsafe { &mut (*self.0.as_ptr()).right }
    }

    pub(crate) fn parent(&self) -> Link<K, V> {
        // SAFETY: As for key.
        unsafe { (*self.0.as_ptr()).parent }
    }

    #[allow(clippy::mut_from_ref)]
    pub(crate) fn parent_mut<'a>(&self) -> &'a mut Link<K, V> {
        // SAFETY: As for value_mut.
        unsafe { &mut (*self.0.as_ptr()).parent }
    }

    pub(crate) fn colour(&self) -> Colour {
        // SAFETY: As for key.
        unsafe { (*self.0.as_ptr()).colour }
    }

    pub(crate) fn set_colour(&self, colour: Colour) {
        // SAFETY: Recolouring never moves the node; exclusivity comes from the tree borrow.
        unsafe { (*self.0.as_ptr()).colour = colour }
    }

    /// The leftmost node of the subtree rooted here: the minimum key.
    pub(crate) fn min_descendant(self) -> NodePtr<K, V> {
        let mut current = self;
        while let Some(left) = current.left() {
            current = left;
        }
        current
    }

    /// The rightmost node of the subtree rooted here: the maximum key.
    pub(crate) fn max_descendant(self) -> NodePtr<K, V> {
        let mut current = self;
        while let Some(right) = current.right() {
            current = right;
        }
        current
    }

    /// The next node in key order: the leftmost node of the right subtree, or failing that the
    /// first ancestor reached from its left side.
    pub(crate) fn successor(self) -> Link<K, V> {
        if let Some(right) = self.right() {
            return Some(right.min_descendant());
        }

        let mut current = self;
        let mut parent = self.parent();
        while let Some(node) = parent {
            if node.left() == Some(current) {
                return Some(node);
            }
            current = node;
            parent = node.parent();
        }
        None
    }

    /// Mirror of [`successor`](NodePtr::successor).
    pub(crate) fn predecessor(self) -> Link<K, V> {
        if let Some(left) = self.left() {
            return Some(left.max_descendant());
        }

        let mut current = self;
        let mut parent = self.parent();
        while let Some(node) = parent {
            if node.right() == Some(current) {
                return Some(node);
            }
            current = node;
            parent = node.parent();
        }
        None
    }

    /// Exchanges the entries of two distinct nodes in place, leaving all links and colours where
    /// they are. Used by removal so a two-child node can hand its entry to its successor.
    pub(crate) fn swap_entry(self, other: NodePtr<K, V>) {
        // SAFETY: The two nodes are distinct (a node is never its own successor), so the swapped
        // fields never alias.
        unsafe {
            ptr::swap(&raw mut (*self.0.as_ptr()).key, &raw mut (*other.0.as_ptr()).key);
            ptr::swap(&raw mut (*self.0.as_ptr()).value, &raw mut (*other.0.as_ptr()).value);
        }
    }
}

impl<K, V> Clone for NodePtr<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodePtr<K, V> {}

impl<K, V> PartialEq for NodePtr<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

pub(crate) struct Node<K, V> {
    pub key: K,
    pub value: V,
    pub colour: Colour,
    pub parent: Link<K, V>,
    pub left: Link<K, V>,
    pub right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    /// New nodes always start Red; insertion repairs any colour violation afterwards, which keeps
    /// the black-height untouched by the allocation itself.
    pub(crate) const fn new(key: K, value: V, parent: Link<K, V>) -> Node<K, V> {
        Node {
            key,
            value,
            colour: Colour::Red,
            parent,
            left: None,
            right: None,
        }
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// The colour of a possibly-nil link. Absent children behave as Black leaves for every invariant.
pub(crate) fn colour_of<K, V>(link: Link<K, V>) -> Colour {
    match link {
        Some(node) => node.colour(),
        None => Colour::Black,
    }
}
