use crate::compare::NaturalOrder;
use crate::raw::RawTavlMap;

use super::TavlMap;

impl<K, V> TavlMap<K, V> {
    /// Creates an empty map with room for `capacity` nodes before the
    /// arena has to grow.
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let map: TavlMap<i32, i32> = TavlMap::with_capacity(100);
    /// assert!(map.capacity() >= 100);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            raw: RawTavlMap::with_capacity(capacity),
            comparator: NaturalOrder,
        }
    }
}

impl<K, V, C> TavlMap<K, V, C> {
    /// Creates an empty map with the given comparator and node capacity.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            raw: RawTavlMap::with_capacity(capacity),
            comparator,
        }
    }

    /// Returns the number of nodes the map can hold without growing its
    /// arena.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
