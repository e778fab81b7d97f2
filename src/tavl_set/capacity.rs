use crate::tavl_map::TavlMap;

use super::TavlSet;

impl<T> TavlSet<T> {
    /// Creates an empty set with room for `capacity` nodes before the
    /// arena has to grow.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: TavlMap::with_capacity(capacity),
        }
    }
}

impl<T, C> TavlSet<T, C> {
    /// Creates an empty set with the given comparator and node capacity.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            map: TavlMap::with_capacity_and_comparator(capacity, comparator),
        }
    }

    /// Returns the number of nodes the set can hold without growing its
    /// arena.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }
}
