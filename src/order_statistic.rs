/// A zero-based rank into the sorted order of a map or set.
///
/// # Examples
///
/// ```
/// use tavl_tree::{Rank, TavlMap};
///
/// let mut map = TavlMap::new();
/// map.insert("a", 10).unwrap();
/// map.insert("b", 20).unwrap();
///
/// assert_eq!(map[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
