use core::borrow::Borrow;
use core::ops::Index;

use crate::Rank;
use crate::compare::Compare;
use crate::node_ref::NodeRef;

use super::TavlSet;

impl<T, C> TavlSet<T, C> {
    /// A reference to the node at position `rank` in sorted order;
    /// `None` when `rank >= len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn by_rank(&self, rank: usize) -> Option<NodeRef> {
        self.map.by_rank(rank)
    }

    /// Returns the item at position `rank` in sorted order.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlSet;
    ///
    /// let set: TavlSet<i32> = [30, 10, 20].into_iter().collect();
    ///
    /// assert_eq!(set.get_by_rank(0), Some(&10));
    /// assert_eq!(set.get_by_rank(2), Some(&30));
    /// assert_eq!(set.get_by_rank(3), None);
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.map.get_by_rank(rank).map(|(item, _)| item)
    }

    /// Returns the zero-based rank of `item` in sorted order, or `None`
    /// if the item is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank_of<Q>(&self, item: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.map.rank_of(item)
    }
}

/// Indexes into the set by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use tavl_tree::{Rank, TavlSet};
///
/// let set: TavlSet<&str> = ["b", "a"].into_iter().collect();
///
/// assert_eq!(set[Rank(0)], "a");
/// ```
impl<T, C> Index<Rank> for TavlSet<T, C> {
    type Output = T;

    fn index(&self, rank: Rank) -> &T {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}
