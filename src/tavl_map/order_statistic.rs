use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use crate::Rank;
use crate::compare::Compare;
use crate::node_ref::NodeRef;

use super::TavlMap;

impl<K, V, C> TavlMap<K, V, C> {
    /// A reference to the node at position `rank` in sorted order.
    ///
    /// The rank is zero-based; `None` when `rank >= len()`. The lookup
    /// descends by the per-node subtree counts, so no keys are compared.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let map: TavlMap<i32, &str> = [(30, "c"), (10, "a"), (20, "b")].into_iter().collect();
    ///
    /// let median = map.by_rank(1).unwrap();
    /// assert_eq!(map.key_at(median), Some(&20));
    /// assert!(map.by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn by_rank(&self, rank: usize) -> Option<NodeRef> {
        let handle = self.raw.by_rank(rank)?;
        Some(self.node_ref(handle))
    }

    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let mut map = TavlMap::new();
    /// map.insert("a", 10).unwrap();
    /// map.insert("c", 30).unwrap();
    /// map.insert("b", 20).unwrap();
    ///
    /// assert_eq!(map.get_by_rank(1), Some((&"b", &20)));
    /// assert_eq!(map.get_by_rank(3), None);
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let handle = self.raw.by_rank(rank)?;
        let node = self.raw.node(handle);
        Some((&node.key, &node.value))
    }

    /// Returns the key and a mutable reference to the value at position
    /// `rank` in sorted order. The key stays shared because mutating it
    /// would violate the map's ordering invariants.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let handle = self.raw.by_rank(rank)?;
        let node = self.raw.node_mut(handle);
        Some((&node.key, &mut node.value))
    }

    /// Returns the zero-based rank of `key` in sorted order, which is
    /// also the number of keys smaller than it, or `None` if the key is
    /// not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let map: TavlMap<i32, &str> = [(10, "a"), (20, "b")].into_iter().collect();
    ///
    /// assert_eq!(map.rank_of(&10), Some(0));
    /// assert_eq!(map.rank_of(&20), Some(1));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.raw.rank_of(key, &self.comparator)
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use tavl_tree::{Rank, TavlMap};
///
/// let map: TavlMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
///
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K, V, C> Index<Rank> for TavlMap<K, V, C> {
    type Output = V;

    fn index(&self, rank: Rank) -> &V {
        self.get_by_rank(rank.0).map(|(_, value)| value).expect("index out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
impl<K, V, C> IndexMut<Rank> for TavlMap<K, V, C> {
    fn index_mut(&mut self, rank: Rank) -> &mut V {
        self.get_by_rank_mut(rank.0).map(|(_, value)| value).expect("index out of bounds")
    }
}
