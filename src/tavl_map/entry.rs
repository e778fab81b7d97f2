use core::fmt;
use core::mem;

use crate::compare::{Compare, NaturalOrder};
use crate::raw::{Handle, SearchOutcome};

use super::TavlMap;

impl<K, V, C> TavlMap<K, V, C> {
    /// Gets the entry for `key` for in-place manipulation.
    ///
    /// The search runs once; a vacant entry remembers enough to insert
    /// without paying for a second lookup of an already-missing key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let mut counts: TavlMap<&str, u32> = TavlMap::new();
    ///
    /// for word in ["a", "b", "a"] {
    ///     *counts.entry(word).or_insert(0) += 1;
    /// }
    ///
    /// assert_eq!(counts.get(&"a"), Some(&2));
    /// assert_eq!(counts.get(&"b"), Some(&1));
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, C>
    where
        C: Compare<K>,
    {
        match self.raw.search(&key, &self.comparator) {
            SearchOutcome::Found(handle) => Entry::Occupied(OccupiedEntry { handle, map: self }),
            SearchOutcome::Missing { .. } => Entry::Vacant(VacantEntry { key, map: self }),
        }
    }
}

/// A view into a single entry in a map, which may either be vacant or
/// occupied.
///
/// This `enum` is constructed from the [`entry`] method on
/// [`TavlMap`].
///
/// [`entry`]: TavlMap::entry
pub enum Entry<'a, K, V, C = NaturalOrder> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, C>),

    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, C>),
}

/// A view into a vacant entry in a `TavlMap`.
/// It is part of the [`Entry`] enum.
pub struct VacantEntry<'a, K, V, C = NaturalOrder> {
    key: K,
    map: &'a mut TavlMap<K, V, C>,
}

/// A view into an occupied entry in a `TavlMap`.
/// It is part of the [`Entry`] enum.
pub struct OccupiedEntry<'a, K, V, C = NaturalOrder> {
    handle: Handle,
    map: &'a mut TavlMap<K, V, C>,
}

impl<'a, K, V, C: Compare<K>> Entry<'a, K, V, C> {
    /// Ensures a value is in the entry by inserting the default if
    /// empty, and returns a mutable reference to the value.
    ///
    /// # Panics
    ///
    /// Panics if node allocation fails while inserting.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => vacant.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the
    /// default function if empty, and returns a mutable reference to the
    /// value.
    ///
    /// # Panics
    ///
    /// Panics if node allocation fails while inserting.
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => vacant.insert(default()),
        }
    }

    /// Like [`or_insert_with`](Entry::or_insert_with), but the default
    /// function sees the key, so key-derived values need no clone.
    ///
    /// # Panics
    ///
    /// Panics if node allocation fails while inserting.
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                let value = default(&vacant.key);
                vacant.insert(value)
            }
        }
    }

    /// Returns a reference to this entry's key.
    #[must_use]
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(occupied) => occupied.key(),
            Entry::Vacant(vacant) => vacant.key(),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential insert.
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    ///
    /// let mut map: TavlMap<&str, u32> = TavlMap::new();
    ///
    /// map.entry("poneyland").and_modify(|n| *n += 1).or_insert(42);
    /// assert_eq!(map.get(&"poneyland"), Some(&42));
    ///
    /// map.entry("poneyland").and_modify(|n| *n += 1).or_insert(42);
    /// assert_eq!(map.get(&"poneyland"), Some(&43));
    /// ```
    #[must_use]
    pub fn and_modify<F: FnOnce(&mut V)>(self, f: F) -> Self {
        match self {
            Entry::Occupied(mut occupied) => {
                f(occupied.get_mut());
                Entry::Occupied(occupied)
            }
            Entry::Vacant(vacant) => Entry::Vacant(vacant),
        }
    }
}

impl<'a, K, V, C> VacantEntry<'a, K, V, C> {
    /// Returns a reference to the key that would be inserted.
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes ownership of the key back out of the entry.
    #[must_use]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value, returning a mutable reference to it.
    ///
    /// # Panics
    ///
    /// Panics if node allocation fails.
    pub fn insert(self, value: V) -> &'a mut V
    where
        C: Compare<K>,
    {
        let map = self.map;
        let handle = match map.raw.search(&self.key, &map.comparator) {
            SearchOutcome::Missing { parent, side } => map
                .raw
                .insert_at(parent, side, self.key, value)
                .expect("node allocation failed"),
            SearchOutcome::Found(_) => unreachable!("vacant entry key cannot be present"),
        };
        &mut map.raw.node_mut(handle).value
    }
}

impl<'a, K, V, C> OccupiedEntry<'a, K, V, C> {
    /// Returns a reference to this entry's key.
    #[must_use]
    pub fn key(&self) -> &K {
        &self.map.raw.node(self.handle).key
    }

    /// Gets a reference to the value.
    #[must_use]
    pub fn get(&self) -> &V {
        &self.map.raw.node(self.handle).value
    }

    /// Gets a mutable reference to the value.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.map.raw.node_mut(self.handle).value
    }

    /// Converts the entry into a mutable reference to the value, bound
    /// to the map's lifetime.
    #[must_use]
    pub fn into_mut(self) -> &'a mut V {
        &mut self.map.raw.node_mut(self.handle).value
    }

    /// Replaces the value, returning the old one.
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Removes the entry from the map, returning the key and value.
    ///
    /// # Examples
    ///
    /// ```
    /// use tavl_tree::TavlMap;
    /// use tavl_tree::tavl_map::Entry;
    ///
    /// let mut map = TavlMap::new();
    /// map.insert("oz", 1).unwrap();
    ///
    /// if let Entry::Occupied(o) = map.entry("oz") {
    ///     assert_eq!(o.remove_entry(), ("oz", 1));
    /// }
    /// assert!(map.is_empty());
    /// ```
    #[must_use = "if the entry's payload is not needed, removal through `TavlMap::remove_key` is clearer"]
    pub fn remove_entry(self) -> (K, V) {
        self.map.raw.remove_valid(self.handle)
    }

    /// Removes the entry from the map, returning the value.
    pub fn remove(self) -> V {
        self.remove_entry().1
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Entry<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Vacant(vacant) => f.debug_tuple("Entry").field(vacant).finish(),
            Entry::Occupied(occupied) => f.debug_tuple("Entry").field(occupied).finish(),
        }
    }
}

impl<K: fmt::Debug, V, C> fmt::Debug for VacantEntry<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VacantEntry").field("key", &self.key).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OccupiedEntry<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry").field("key", self.key()).field("value", self.get()).finish()
    }
}
