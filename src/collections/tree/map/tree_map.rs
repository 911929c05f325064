use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::mem;
use std::ops::Index;

use super::{Colour, IntoKeys, IntoValues, InvalidRange, Iter, IterMut, Keys, KeyNotFound, Link,
    Node, NodePtr, Range, Values, ValuesMut, colour_of};
use crate::collections::tree::cmp::{Comparator, NaturalOrder};
use crate::util::option::OptionExtension;
use crate::util::result::ResultExtension;

/// A map sorted by its keys, implemented as a red-black tree.
///
/// The ordering is decided by a [`Comparator`] owned by the map, injected at construction and
/// defaulting to [`NaturalOrder`]. Entries with equal keys under that comparator are considered
/// duplicates: [`insert`](TreeMap::insert) refuses them, while [`set`](TreeMap::set) replaces the
/// value in place.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the TreeMap.
/// - `k`: The number of entries yielded by a range view.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(log n)` |
/// | `set` | `O(log n)` |
/// | `get` | `O(log n)` |
/// | `remove` | `O(log n)` |
/// | `first_entry` | `O(log n)` |
/// | `last_entry` | `O(log n)` |
/// | `range` | `O(log n + k)` |
/// | `clear` | `O(n)` |
/// | `contains_value` | `O(n)` |
///
/// The colouring invariants bound the height of the tree to `2 * log2(n + 1)`, which is what makes
/// all the point operations logarithmic in the worst case rather than degrading to `O(n)` the way
/// a plain binary search tree does under sorted insertion.
pub struct TreeMap<K, V, C: Comparator<K> = NaturalOrder> {
    pub(crate) root: Link<K, V>,
    pub(crate) len: usize,
    pub(crate) cmp: C,
    pub(crate) _phantom: PhantomData<(K, V)>,
}

// SAFETY: The raw node links are an implementation detail; a TreeMap owns its nodes exactly like a
// Box owns its contents, so the usual container bounds apply.
unsafe impl<K: Send, V: Send, C: Comparator<K> + Send> Send for TreeMap<K, V, C> {}
// SAFETY: As above; shared access only ever reads through the links.
unsafe impl<K: Sync, V: Sync, C: Comparator<K> + Sync> Sync for TreeMap<K, V, C> {}

impl<K: Ord, V> TreeMap<K, V> {
    /// Creates an empty map ordered naturally. Like [`HashMap::new`](std::collections::HashMap),
    /// this is only defined for the default strategy so the comparator type never has to be
    /// spelled out; see [`with_comparator`](TreeMap::with_comparator) for the general form.
    ///
    /// # Examples
    /// ```
    /// # use ordered_collections::collections::tree::TreeMap;
    /// let mut map = TreeMap::new();
    /// map.insert(2, "b");
    /// map.insert(1, "a");
    /// assert_eq!(map.first_entry(), Some((&1, &"a")));
    /// ```
    pub const fn new() -> TreeMap<K, V> {
        TreeMap::with_comparator(NaturalOrder)
    }
}

impl<K, V, C: Comparator<K>> TreeMap<K, V, C> {
    /// Creates an empty map ordered by the provided comparator.
    pub const fn with_comparator(cmp: C) -> TreeMap<K, V, C> {
        TreeMap {
            root: None,
            len: 0,
            cmp,
            _phantom: PhantomData,
        }
    }

    /// Returns the number of entries in the map.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the comparator the map was constructed with.
    pub const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Inserts an entry, keeping the map sorted. Returns false and leaves the map untouched if an
    /// equal key is already present; see [`set`](TreeMap::set) for replacing semantics.
    ///
    /// # Examples
    /// ```
    /// # use ordered_collections::collections::tree::TreeMap;
    /// let mut map = TreeMap::new();
    /// assert!(map.insert(15, "fifteen"));
    /// assert!(!map.insert(15, "ignored"));
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&15), Some(&"fifteen"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let mut parent = None;
        let mut went_left = false;
        let mut current = self.root;

        while let Some(node) = current {
            match self.cmp.cmp(&key, node.key()) {
                Ordering::Less => {
                    parent = Some(node);
                    went_left = true;
                    current = node.left();
                },
                Ordering::Greater => {
                    parent = Some(node);
                    went_left = false;
                    current = node.right();
                },
                Ordering::Equal => return false,
            }
        }

        let new = NodePtr::from_node(Node::new(key, value, parent));
        match parent {
            Some(node) if went_left => *node.left_mut() = Some(new),
            Some(node) => *node.right_mut() = Some(new),
            None => self.root = Some(new),
        }

        self.len += 1;
        self.insert_fixup(new);
        // SAFETY: The tree is non-empty, an entry was just linked in.
        unsafe { self.root.unreachable() }.set_colour(Colour::Black);
        true
    }

    /// Updates the value for `key` in place, or inserts the entry when the key is absent. Returns
    /// the value that was replaced, if any.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.find(&key) {
            Some(mut node) => Some(mem::replace(node.value_mut(), value)),
            None => {
                self.insert(key, value);
                None
            },
        }
    }

    /// Walks from the root to the node holding `key`, if there is one.
    fn find<Q>(&self, key: &Q) -> Link<K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let mut current = self.root;
        while let Some(node) = current {
            match self.cmp.cmp(key, node.key().borrow()) {
                Ordering::Less => current = node.left(),
                Ordering::Greater => current = node.right(),
                Ordering::Equal => return Some(node),
            }
        }
        None
    }

    pub fn get_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).map(|node| node.entry())
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).map(|node| node.value())
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).map(|mut node| node.value_mut())
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).is_some()
    }

    /// Returns true if any entry holds a value equal to `value`. Unlike the key lookups this has
    /// to visit every entry, values carry no ordering within the tree.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// The entry with the smallest key, or [`None`] when empty.
    pub fn first_entry(&self) -> Option<(&K, &V)> {
        self.root.map(|root| root.min_descendant().entry())
    }

    pub fn first(&self) -> Option<&V> {
        self.first_entry().map(|e| e.1)
    }

    /// The entry with the largest key, or [`None`] when empty.
    pub fn last_entry(&self) -> Option<(&K, &V)> {
        self.root.map(|root| root.max_descendant().entry())
    }

    pub fn last(&self) -> Option<&V> {
        self.last_entry().map(|e| e.1)
    }

    /// Removes and returns the entry with the smallest key.
    pub fn take_first_entry(&mut self) -> Option<(K, V)> {
        match self.root {
            Some(root) => Some(self.remove_node(root.min_descendant())),
            None => None,
        }
    }

    /// Removes and returns the entry with the largest key.
    pub fn take_last_entry(&mut self) -> Option<(K, V)> {
        match self.root {
            Some(root) => Some(self.remove_node(root.max_descendant())),
            None => None,
        }
    }

    /// Removes the entry for `key`, rebalancing to keep every other lookup logarithmic. Returns
    /// [`None`] and leaves the map untouched if the key is absent.
    ///
    /// # Examples
    /// ```
    /// # use ordered_collections::collections::tree::TreeMap;
    /// let mut map = TreeMap::from([(5, "five"), (10, "ten"), (15, "fifteen")]);
    /// assert_eq!(map.remove_entry(&10), Some((10, "ten")));
    /// assert_eq!(map.remove_entry(&10), None);
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        match self.find(key) {
            Some(node) => Some(self.remove_node(node)),
            None => None,
        }
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.remove_entry(key).map(|e| e.1)
    }

    /// Drops every entry and resets the length to zero. The comparator is kept.
    pub fn clear(&mut self) {
        drop_subtree(self.root.take());
        self.len = 0;
    }

    /// Returns a lazy view over the entries with keys in `[lower, upper]`, in ascending order.
    /// Fails without traversing anything if `lower` exceeds `upper` under the map's comparator.
    ///
    /// # Examples
    /// ```
    /// # use ordered_collections::collections::tree::TreeMap;
    /// let map = TreeMap::from([(1, 'a'), (3, 'b'), (4, 'c'), (5, 'd'), (8, 'e')]);
    /// let keys: Vec<i32> = map.range(&2, &5).unwrap().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [3, 4, 5]);
    /// assert!(map.range(&5, &2).is_err());
    /// ```
    pub fn range<'a, Q>(
        &'a self,
        lower: &'a Q,
        upper: &'a Q,
    ) -> Result<Range<'a, K, V, Q, C>, InvalidRange>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        if self.cmp.cmp(lower, upper) == Ordering::Greater {
            return Err(InvalidRange);
        }

        // Seek the leftmost node at or above the lower bound; subtrees entirely below it are
        // never visited.
        let mut from = None;
        let mut current = self.root;
        while let Some(node) = current {
            if self.cmp.cmp(node.key().borrow(), lower) == Ordering::Less {
                current = node.right();
            } else {
                from = Some(node);
                current = node.left();
            }
        }

        Ok(Range {
            next: from,
            upper,
            cmp: &self.cmp,
            _phantom: PhantomData,
        })
    }

    /// Returns an iterator over all entries in ascending key order, as references.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    /// Returns an iterator over all entries in ascending key order, with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.into_iter()
    }

    /// Returns an iterator over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// Returns an iterator over the values, in the order of their keys.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Returns an iterator over mutable values, in the order of their keys.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.iter_mut())
    }

    /// Consumes the map, yielding its keys in ascending order.
    pub fn into_keys(self) -> IntoKeys<K, V, C> {
        IntoKeys(self.into_iter())
    }

    /// Consumes the map, yielding its values in the order of their keys.
    pub fn into_values(self) -> IntoValues<K, V, C> {
        IntoValues(self.into_iter())
    }

    /// Removes `node` from the tree, rebalances, and returns its entry.
    fn remove_node(&mut self, node: NodePtr<K, V>) -> (K, V) {
        // A node with two children trades entries with its in-order successor, which cannot have
        // a left child, so the node actually spliced out always has at most one child.
        let target = match (node.left(), node.right()) {
            (Some(_), Some(right)) => {
                let successor = right.min_descendant();
                node.swap_entry(successor);
                successor
            },
            _ => node,
        };

        let child = target.left().or(target.right());
        let parent = target.parent();

        match parent {
            None => self.root = child,
            Some(parent) if parent.left() == Some(target) => *parent.left_mut() = child,
            Some(parent) => *parent.right_mut() = child,
        }
        if let Some(child) = child {
            *child.parent_mut() = parent;
        }

        // Splicing out a Red node changes no black-heights; splicing out a Black one leaves the
        // unlinked side a Black short, which the fixup walk repays.
        if target.colour().is_black() {
            self.remove_fixup(child, parent);
        }

        self.len -= 1;
        target.take_node().into_entry()
    }

    /// Restores the colouring invariants after a Red node was inserted. Walks upward only, so the
    /// loop is bounded by the height of the tree.
    fn insert_fixup(&mut self, mut node: NodePtr<K, V>) {
        while let Some(parent) = node.parent()
            && parent.colour().is_red()
        {
            // A Red parent is never the root (the root is Black), so the grandparent exists.
            // SAFETY: As above.
            let grandparent = unsafe { parent.parent().unreachable() };

            if grandparent.left() == Some(parent) {
                match grandparent.right() {
                    // A Red uncle means both sides of the grandparent gain a Black; the potential
                    // violation moves up to the grandparent and the walk continues there.
                    Some(uncle) if uncle.colour().is_red() => {
                        parent.set_colour(Colour::Black);
                        uncle.set_colour(Colour::Black);
                        grandparent.set_colour(Colour::Red);
                        node = grandparent;
                    },
                    // Black or absent uncle: rotate the red pair outward and recolour, which
                    // repairs the violation for good.
                    _ => {
                        if parent.right() == Some(node) {
                            // Inner grandchild; rotate at the parent to reduce to the outer case.
                            node = parent;
                            self.rotate_left(node);
                        }
                        // SAFETY: node just became (or already was) an outer left grandchild, so
                        // both its parent and grandparent exist.
                        let parent = unsafe { node.parent().unreachable() };
                        let grandparent = unsafe { parent.parent().unreachable() };
                        parent.set_colour(Colour::Black);
                        grandparent.set_colour(Colour::Red);
                        self.rotate_right(grandparent);
                    },
                }
            } else {
                // Mirror image: the parent hangs off the grandparent's right side.
                match grandparent.left() {
                    Some(uncle) if uncle.colour().is_red() => {
                        parent.set_colour(Colour::Black);
                        uncle.set_colour(Colour::Black);
                        grandparent.set_colour(Colour::Red);
                        node = grandparent;
                    },
                    _ => {
                        if parent.left() == Some(node) {
                            node = parent;
                            self.rotate_right(node);
                        }
                        // SAFETY: As in the left-hand case.
                        let parent = unsafe { node.parent().unreachable() };
                        let grandparent = unsafe { parent.parent().unreachable() };
                        parent.set_colour(Colour::Black);
                        grandparent.set_colour(Colour::Red);
                        self.rotate_left(grandparent);
                    },
                }
            }
        }
    }

    /// Restores uniform black-height after a Black node was spliced out. `node` (possibly nil)
    /// carries the deficiency; its parent is tracked separately because nil links have no
    /// back-reference.
    fn remove_fixup(&mut self, mut node: Link<K, V>, mut parent: Link<K, V>) {
        while node != self.root && colour_of(node).is_black() {
            let Some(p) = parent else { break };

            if p.left() == node {
                // The deficient side is a Black short, so the sibling subtree holds at least one
                // real node on every configuration below.
                // SAFETY: As above.
                let mut sibling = unsafe { p.right().unreachable() };

                if sibling.colour().is_red() {
                    // Red sibling: rotate it above the parent to expose a Black sibling.
                    sibling.set_colour(Colour::Black);
                    p.set_colour(Colour::Red);
                    self.rotate_left(p);
                    // SAFETY: The rotation moved a real node into the sibling position.
                    sibling = unsafe { p.right().unreachable() };
                }

                if colour_of(sibling.left()).is_black() && colour_of(sibling.right()).is_black() {
                    // Both nephews Black: recolour the sibling and move the deficiency up.
                    sibling.set_colour(Colour::Red);
                    node = Some(p);
                    parent = p.parent();
                } else {
                    if colour_of(sibling.right()).is_black() {
                        // Inner Red nephew only; rotate it outward first.
                        // SAFETY: The outer nephew is Black here, so the inner one is the Red.
                        unsafe { sibling.left().unreachable() }.set_colour(Colour::Black);
                        sibling.set_colour(Colour::Red);
                        self.rotate_right(sibling);
                        // SAFETY: As after the red-sibling rotation.
                        sibling = unsafe { p.right().unreachable() };
                    }
                    // Outer Red nephew: one rotation absorbs the deficiency entirely.
                    sibling.set_colour(p.colour());
                    p.set_colour(Colour::Black);
                    // SAFETY: The outer nephew is the Red node this branch selected on.
                    unsafe { sibling.right().unreachable() }.set_colour(Colour::Black);
                    self.rotate_left(p);
                    node = self.root;
                    parent = None;
                }
            } else {
                // Mirror image: the deficiency is on the parent's right side.
                // SAFETY: As in the left-hand case.
                let mut sibling = unsafe { p.left().unreachable() };

                if sibling.colour().is_red() {
                    sibling.set_colour(Colour::Black);
                    p.set_colour(Colour::Red);
                    self.rotate_right(p);
                    // SAFETY: As in the left-hand case.
                    sibling = unsafe { p.left().unreachable() };
                }

                if colour_of(sibling.left()).is_black() && colour_of(sibling.right()).is_black() {
                    sibling.set_colour(Colour::Red);
                    node = Some(p);
                    parent = p.parent();
                } else {
                    if colour_of(sibling.left()).is_black() {
                        // SAFETY: As in the left-hand case.
                        unsafe { sibling.right().unreachable() }.set_colour(Colour::Black);
                        sibling.set_colour(Colour::Red);
                        self.rotate_left(sibling);
                        // SAFETY: As in the left-hand case.
                        sibling = unsafe { p.left().unreachable() };
                    }
                    sibling.set_colour(p.colour());
                    p.set_colour(Colour::Black);
                    // SAFETY: As in the left-hand case.
                    unsafe { sibling.left().unreachable() }.set_colour(Colour::Black);
                    self.rotate_right(p);
                    node = self.root;
                    parent = None;
                }
            }
        }

        if let Some(node) = node {
            node.set_colour(Colour::Black);
        }
    }

    /// Rotates the subtree at `x` to the left, preserving the in-order sequence. Only links move;
    /// colours are never touched by a rotation.
    fn rotate_left(&mut self, x: NodePtr<K, V>) {
        // SAFETY: Rotations pivot on the child in the rotation direction, which every caller has
        // established to exist.
        let y = unsafe { x.right().unreachable() };

        // y's left subtree crosses over to become x's right.
        *x.right_mut() = y.left();
        if let Some(left) = y.left() {
            *left.parent_mut() = Some(x);
        }

        // y replaces x under x's parent (or as the root).
        *y.parent_mut() = x.parent();
        match x.parent() {
            None => self.root = Some(y),
            Some(parent) if parent.left() == Some(x) => *parent.left_mut() = Some(y),
            Some(parent) => *parent.right_mut() = Some(y),
        }

        *y.left_mut() = Some(x);
        *x.parent_mut() = Some(y);
    }

    /// Mirror of [`rotate_left`](TreeMap::rotate_left).
    fn rotate_right(&mut self, x: NodePtr<K, V>) {
        // SAFETY: As for rotate_left.
        let y = unsafe { x.left().unreachable() };

        *x.left_mut() = y.right();
        if let Some(right) = y.right() {
            *right.parent_mut() = Some(x);
        }

        *y.parent_mut() = x.parent();
        match x.parent() {
            None => self.root = Some(y),
            Some(parent) if parent.right() == Some(x) => *parent.right_mut() = Some(y),
            Some(parent) => *parent.left_mut() = Some(y),
        }

        *y.right_mut() = Some(x);
        *x.parent_mut() = Some(y);
    }
}

/// Frees a whole subtree. The recursion depth is bounded by the height of the tree, which the
/// colouring invariants keep logarithmic.
fn drop_subtree<K, V>(link: Link<K, V>) {
    if let Some(node) = link {
        let node = node.take_node();
        drop_subtree(node.left);
        drop_subtree(node.right);
    }
}

impl<K, V, C: Comparator<K>> Drop for TreeMap<K, V, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K, V, C: Comparator<K> + Default> Default for TreeMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, Q, C> Index<&Q> for TreeMap<K, V, C>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<K> + Comparator<Q>,
{
    type Output = V;

    /// # Panics
    /// Panics with [`KeyNotFound`] if the key is absent. Use [`get`](TreeMap::get) for a fallible
    /// lookup.
    fn index(&self, key: &Q) -> &V {
        self.get(key).ok_or(KeyNotFound).throw()
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for TreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }

    fn extend_one(&mut self, (key, value): (K, V)) {
        self.set(key, value);
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for TreeMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TreeMap::with_comparator(C::default());
        map.extend(iter);
        map
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for TreeMap<K, V> {
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}

impl<K: Debug, V: Debug, C: Comparator<K>> Debug for TreeMap<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeMap")
            .field_with("nodes", |f| write!(f, "\n{}", subtree_lines(self.root)))
            .field("len", &self.len)
            .finish()
    }
}

/// Renders a subtree sideways, left subtree above and right below, with each node's colour.
fn subtree_lines<K: Debug, V: Debug>(link: Link<K, V>) -> String {
    match link {
        Some(node) => {
            let mut out = String::new();
            for line in subtree_lines(node.left()).lines() {
                out.push_str("┌    ");
                out.push_str(line);
                out.push('\n');
            }
            out.push_str(&format!(
                "({:?}: {:?}) {}\n",
                node.key(),
                node.value(),
                match node.colour() {
                    Colour::Red => "[R]",
                    Colour::Black => "[B]",
                }
            ));
            for line in subtree_lines(node.right()).lines() {
                out.push_str("└    ");
                out.push_str(line);
                out.push('\n');
            }
            out
        },
        None => String::from("-\n"),
    }
}

impl<K: Debug, V: Debug, C: Comparator<K>> Display for TreeMap<K, V, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
