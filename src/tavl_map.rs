use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::ControlFlow;

use crate::compare::{Compare, NaturalOrder};
use crate::error::Result;
use crate::node_ref::NodeRef;
use crate::raw::{Handle, RawTavlMap, SearchOutcome};

mod capacity;
mod entry;
mod order_statistic;

pub use crate::Rank;
pub use entry::{Entry, OccupiedEntry, VacantEntry};

/// An ordered map based on a threaded order-statistic AVL tree.
///
/// Keys are kept in sorted order under a per-map [`Compare`] strategy,
/// [`NaturalOrder`] (the key type's [`Ord`] instance) unless another is
/// given at construction. No two keys in a map ever compare equal:
/// [`insert`](TavlMap::insert) refuses duplicates instead of replacing.
///
/// Beyond the usual keyed operations, every insertion returns a
/// [`NodeRef`] through which the node can later be read in O(1), stepped
/// to its in-order neighbors in O(1) amortized, or removed without
/// another search. Order-statistic queries, the element at a sorted
/// position and the position of a key, run in O(log n); see
/// [`by_rank`](TavlMap::by_rank) and [`rank_of`](TavlMap::rank_of).
///
/// Each node uses any child slot it does not need for a link to its
/// in-order neighbor (a *thread*), so iteration and neighbor stepping
/// never recurse and never allocate. Rebalancing walks climb parent
/// links iteratively; stack usage is constant no matter how large the
/// map grows.
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key, as determined by the map's
/// comparator, changes while it is in the map. This is normally only
/// possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe
/// code. The behavior resulting from such a logic error is not
/// specified, but will be encapsulated to the `TavlMap` that observed it
/// and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use tavl_tree::TavlMap;
///
/// let mut addresses = TavlMap::new();
///
/// // Register a few on-disk objects by address.
/// addresses.insert(0x1000_u64, "group").unwrap();
/// addresses.insert(0x0200, "heap").unwrap();
/// let symtab = addresses.insert(0x0800, "symbol table").unwrap();
///
/// // Keyed lookup.
/// assert_eq!(addresses.get(&0x0200), Some(&"heap"));
///
/// // Neighbor stepping through the returned handle.
/// let after = addresses.next(symtab).unwrap();
/// assert_eq!(addresses.get_at(after), Some((&0x1000, &"group")));
///
/// // Ascending iteration.
/// let keys: Vec<u64> = addresses.keys().copied().collect();
/// assert_eq!(keys, [0x0200, 0x0800, 0x1000]);
///
/// // Removal by handle returns the payload.
/// assert_eq!(addresses.remove(symtab), Ok((0x0800, "symbol table")));
/// assert_eq!(addresses.len(), 2);
/// ```
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
pub struct TavlMap<K, V, C = NaturalOrder> {
    raw: RawTavlMap<K, V>,
    comparator: C,
}

/// An iterator over the entries of a `TavlMap`, ascending by key.
///
/// This `struct` is created by the [`iter`] method on [`TavlMap`].
///
/// # Examples
///
/// ```
/// use tavl_tree::TavlMap;
///
/// let map: TavlMap<i32, &str> = [(1, "a"), (2, "b")].into_iter().collect();
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: TavlMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    raw: &'a RawTavlMap<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the entries of a `TavlMap`, ascending by key.
///
/// This `struct` is created by the [`into_iter`] method on [`TavlMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `TavlMap`.
///
/// This `struct` is created by the [`keys`] method on [`TavlMap`].
///
/// [`keys`]: TavlMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `TavlMap`, in key order.
///
/// This `struct` is created by the [`values`] method on [`TavlMap`].
///
/// [`values`]: TavlMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An owning iterator over the keys of a `TavlMap`.
///
/// This `struct` is created by the [`into_keys`] method on [`TavlMap`].
///
/// [`into_keys`]: TavlMap::into_keys
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

/// An owning iterator over the values of a `TavlMap`, in key order.
///
/// This `struct` is created by the [`into_values`] method on [`TavlMap`].
///
/// [`into_values`]: TavlMap::into_values
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> TavlMap<K, V> {
    /// Creates an empty map ordered by the key type's [`Ord`] instance.
    ///
    /// Allocates nothing until the first insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let mut map: TavlMap<i32, &str> = TavlMap::new();
    /// map.insert(1, "a").unwrap();
    /// ```
    pub const fn new() -> Self {
        Self {
            raw: RawTavlMap::new(),
            comparator: NaturalOrder,
        }
    }
}

impl<K, V, C> TavlMap<K, V, C> {
    /// Creates an empty map ordered by `comparator`.
    ///
    /// Exactly one comparison strategy is active per map; every lookup
    /// and insertion goes through it.
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::{FnOrder, TavlMap};
    ///
    /// let mut map = TavlMap::with_comparator(FnOrder(|a: &u32, b: &u32| b.cmp(a)));
    /// map.insert(1, "low").unwrap();
    /// map.insert(9, "high").unwrap();
    ///
    /// // Descending comparator: 9 sorts first.
    /// let first = map.first().unwrap();
    /// assert_eq!(map.get_at(first), Some((&9, &"high")));
    /// ```
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            raw: RawTavlMap::new(),
            comparator,
        }
    }

    /// Returns the number of entries in the map. O(1).
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let mut map = TavlMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Drops every entry; the map stays usable. Outstanding [`NodeRef`]s
    /// go stale rather than dangling.
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let mut map = TavlMap::new();
    /// let node = map.insert(1, "a").unwrap();
    /// map.clear();
    ///
    /// assert!(map.is_empty());
    /// assert_eq!(map.key_at(node), None);
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// A reference to the node with the smallest key, or `None` if the
    /// map is empty. Descends real child links only; O(log n).
    #[must_use]
    pub fn first(&self) -> Option<NodeRef> {
        self.raw.first().map(|handle| self.node_ref(handle))
    }

    /// A reference to the node with the greatest key. O(log n).
    #[must_use]
    pub fn last(&self) -> Option<NodeRef> {
        self.raw.last().map(|handle| self.node_ref(handle))
    }

    /// The node after `node` in key order, or `None` at the end (or for
    /// a stale reference). O(1) amortized: when the node has no right
    /// subtree its successor is one thread hop away.
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let mut map = TavlMap::new();
    /// map.insert(2, "b").unwrap();
    /// let a = map.insert(1, "a").unwrap();
    ///
    /// let b = map.next(a).unwrap();
    /// assert_eq!(map.key_at(b), Some(&2));
    /// assert_eq!(map.next(b), None);
    /// ```
    #[must_use]
    pub fn next(&self, node: NodeRef) -> Option<NodeRef> {
        let handle = self.raw.resolve(node.handle, node.generation)?;
        self.raw.next(handle).map(|next| self.node_ref(next))
    }

    /// The node before `node` in key order. O(1) amortized.
    #[must_use]
    pub fn prev(&self, node: NodeRef) -> Option<NodeRef> {
        let handle = self.raw.resolve(node.handle, node.generation)?;
        self.raw.prev(handle).map(|prev| self.node_ref(prev))
    }

    /// The key a live node reference points at; `None` for stale ones.
    #[must_use]
    pub fn key_at(&self, node: NodeRef) -> Option<&K> {
        let handle = self.raw.resolve(node.handle, node.generation)?;
        Some(&self.raw.node(handle).key)
    }

    /// The value a live node reference points at.
    #[must_use]
    pub fn value_at(&self, node: NodeRef) -> Option<&V> {
        let handle = self.raw.resolve(node.handle, node.generation)?;
        Some(&self.raw.node(handle).value)
    }

    /// The entry a live node reference points at.
    #[must_use]
    pub fn get_at(&self, node: NodeRef) -> Option<(&K, &V)> {
        let handle = self.raw.resolve(node.handle, node.generation)?;
        let entry = self.raw.node(handle);
        Some((&entry.key, &entry.value))
    }

    /// Mutable access to the value behind a live node reference. The key
    /// stays immutable; changing its order would corrupt the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let mut map = TavlMap::new();
    /// let node = map.insert("counter", 0).unwrap();
    ///
    /// *map.value_at_mut(node).unwrap() += 1;
    /// assert_eq!(map.get(&"counter"), Some(&1));
    /// ```
    #[must_use]
    pub fn value_at_mut(&mut self, node: NodeRef) -> Option<&mut V> {
        let handle = self.raw.resolve(node.handle, node.generation)?;
        Some(&mut self.raw.node_mut(handle).value)
    }

    /// Removes the node `node` refers to, returning its key and value.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound), leaving
    /// the map untouched, when the reference is stale. Removal needs no
    /// key comparisons: the node is unlinked in place and the tree
    /// rebalanced on the climb back to the root. O(log n), and unlike
    /// insertion the climb may rotate at every level.
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::{Error, TavlMap};
    ///
    /// let mut map = TavlMap::new();
    /// let node = map.insert(3, "c").unwrap();
    ///
    /// assert_eq!(map.remove(node), Ok((3, "c")));
    /// assert_eq!(map.remove(node), Err(Error::NotFound));
    /// ```
    pub fn remove(&mut self, node: NodeRef) -> Result<(K, V)> {
        self.raw.remove(node.handle, node.generation)
    }

    /// Removes and returns the entry with the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let mut map: TavlMap<i32, &str> = [(2, "b"), (1, "a")].into_iter().collect();
    /// assert_eq!(map.pop_first(), Some((1, "a")));
    /// assert_eq!(map.pop_first(), Some((2, "b")));
    /// assert_eq!(map.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let handle = self.raw.first()?;
        Some(self.raw.remove_valid(handle))
    }

    /// Removes and returns the entry with the greatest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let handle = self.raw.last()?;
        Some(self.raw.remove_valid(handle))
    }

    /// Visits every entry in ascending key order until the visitor breaks.
    ///
    /// A [`ControlFlow::Break`] return short-circuits the walk and is
    /// handed back as the call's result. That is the designed early-exit
    /// channel, not an error; use it to stop at the first match.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::ops::ControlFlow;
    /// use tavl_tree::TavlMap;
    ///
    /// let map: TavlMap<i32, i32> = [(1, 10), (2, 20), (3, 30)].into_iter().collect();
    ///
    /// // Find the first key whose value exceeds 15.
    /// let found = map.try_for_each(|&key, &value| {
    ///     if value > 15 { ControlFlow::Break(key) } else { ControlFlow::Continue(()) }
    /// });
    /// assert_eq!(found, ControlFlow::Break(2));
    ///
    /// // A visitor that never breaks sees everything.
    /// let mut count = 0;
    /// let done: ControlFlow<()> = map.try_for_each(|_, _| {
    ///     count += 1;
    ///     ControlFlow::Continue(())
    /// });
    /// assert_eq!(done, ControlFlow::Continue(()));
    /// assert_eq!(count, 3);
    /// ```
    pub fn try_for_each<B, F>(&self, mut visitor: F) -> ControlFlow<B>
    where
        F: FnMut(&K, &V) -> ControlFlow<B>,
    {
        let mut current = self.raw.first();
        while let Some(handle) = current {
            let node = self.raw.node(handle);
            visitor(&node.key, &node.value)?;
            current = self.raw.next(handle);
        }
        ControlFlow::Continue(())
    }

    /// Gets an iterator over the entries, ascending by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            raw: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the keys, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values, in key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Creates a consuming iterator over the keys, in sorted order.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    /// Creates a consuming iterator over the values, in key order.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues {
            inner: self.into_iter(),
        }
    }

    /// Tears the map down, handing every entry to `teardown` one node at
    /// a time. Teardown order is storage order, not key order; use
    /// [`into_iter`](IntoIterator::into_iter) for an ordered drain.
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let map: TavlMap<i32, &str> = [(2, "b"), (1, "a")].into_iter().collect();
    ///
    /// let mut freed = Vec::new();
    /// map.destroy(|key, value| freed.push((key, value)));
    ///
    /// freed.sort_unstable();
    /// assert_eq!(freed, [(1, "a"), (2, "b")]);
    /// ```
    pub fn destroy<F>(self, teardown: F)
    where
        F: FnMut(K, V),
    {
        self.raw.destroy(teardown);
    }

    /// Mints a public reference for a live handle.
    fn node_ref(&self, handle: Handle) -> NodeRef {
        NodeRef {
            handle,
            generation: self.raw.generation(handle),
        }
    }
}

impl<K, V, C> TavlMap<K, V, C> {
    /// Inserts a key-value pair, returning a reference to the new node.
    ///
    /// Fails with [`Error::AlreadyExists`](crate::Error::AlreadyExists)
    /// when a key comparing equal is present; the map is left unchanged,
    /// down to every existing node's payload. O(log n), with at most one
    /// rotation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::{Error, TavlMap};
    ///
    /// let mut map = TavlMap::new();
    /// let node = map.insert(37, "a").unwrap();
    /// assert_eq!(map.key_at(node), Some(&37));
    ///
    /// assert_eq!(map.insert(37, "b"), Err(Error::AlreadyExists));
    /// assert_eq!(map.get(&37), Some(&"a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<NodeRef>
    where
        C: Compare<K>,
    {
        let handle = self.raw.insert(key, value, &self.comparator)?;
        Ok(self.node_ref(handle))
    }

    /// Removes the entry for `key`, returning it if present.
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let mut map = TavlMap::new();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.remove_key(&1), Some((1, "a")));
    /// assert_eq!(map.remove_key(&1), None);
    /// ```
    pub fn remove_key<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        match self.raw.search(key, &self.comparator) {
            SearchOutcome::Found(handle) => Some(self.raw.remove_valid(handle)),
            SearchOutcome::Missing { .. } => None,
        }
    }

    /// A reference to the node holding `key`, if any. O(log n).
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Option<NodeRef>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let handle = self.raw.find(key, &self.comparator)?;
        Some(self.node_ref(handle))
    }

    /// A reference to the node with the greatest key not exceeding
    /// `key`: the exact match when present, otherwise the nearest key
    /// below, or `None` when `key` precedes the whole map. O(log n).
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let map: TavlMap<i32, &str> = [(10, "a"), (20, "b")].into_iter().collect();
    ///
    /// let below = map.find_le(&15).unwrap();
    /// assert_eq!(map.key_at(below), Some(&10));
    ///
    /// let exact = map.find_le(&20).unwrap();
    /// assert_eq!(map.key_at(exact), Some(&20));
    ///
    /// assert!(map.find_le(&9).is_none());
    /// ```
    #[must_use]
    pub fn find_le<Q>(&self, key: &Q) -> Option<NodeRef>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let handle = self.raw.find_le(key, &self.comparator)?;
        Some(self.node_ref(handle))
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let mut map = TavlMap::new();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let handle = self.raw.find(key, &self.comparator)?;
        Some(&self.raw.node(handle).value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let handle = self.raw.find(key, &self.comparator)?;
        Some(&mut self.raw.node_mut(handle).value)
    }

    /// Returns the key-value pair corresponding to the key.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let handle = self.raw.find(key, &self.comparator)?;
        let node = self.raw.node(handle);
        Some((&node.key, &node.value))
    }

    /// Returns `true` if the map contains the specified key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.raw.find(key, &self.comparator).is_some()
    }
}

impl<K, V> Default for TavlMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for TavlMap<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for TavlMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for TavlMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq, C> Eq for TavlMap<K, V, C> {}

/// Builds a map from the pairs, keeping the first occurrence of keys
/// that compare equal.
impl<K, V, C> FromIterator<(K, V)> for TavlMap<K, V, C>
where
    C: Default + Compare<K>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_comparator(C::default());
        for (key, value) in iter {
            let _ = map.insert(key, value);
        }
        map
    }
}

impl<'a, K, V, C> IntoIterator for &'a TavlMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for TavlMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Consumes the map into an iterator over its entries, ascending by
    /// key. Drains along the thread chain in O(n) with no rebalancing.
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front.expect("a non-exhausted iterator has a front");
        self.remaining -= 1;
        if self.remaining == 0 {
            self.front = None;
            self.back = None;
        } else {
            self.front = self.raw.next(handle);
        }
        let node = self.raw.node(handle);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back.expect("a non-exhausted iterator has a back");
        self.remaining -= 1;
        if self.remaining == 0 {
            self.front = None;
            self.back = None;
        } else {
            self.back = self.raw.prev(handle);
        }
        let node = self.raw.node(handle);
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {}
impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {}
impl<K, V> FusedIterator for IntoValues<K, V> {}
