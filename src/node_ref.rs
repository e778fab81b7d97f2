use crate::raw::{Generation, Handle};

/// A copyable reference to a node in a [`TavlMap`](crate::TavlMap) or
/// [`TavlSet`](crate::TavlSet).
///
/// A `NodeRef` stays valid from the insertion that produced it until the
/// node is removed or the tree is cleared. After that it goes *stale*:
/// operations given a stale reference fail with
/// [`Error::NotFound`](crate::Error::NotFound) or return `None`, they
/// never resolve to an unrelated node, even when the underlying storage
/// slot has been reused.
///
/// Removing a node with two real children relocates the payload of one
/// of its in-order neighbors into the removed node's slot; the
/// neighbor's own `NodeRef` goes stale while the removed node's
/// reference stays live and afterwards names the neighbor's payload.
/// Callers holding references across removals should treat any
/// reference other than the one returned by the removal as potentially
/// stale.
///
/// Passing a `NodeRef` to a tree other than the one that minted it is a
/// logic error, like mutating a key's ordering while it is in a map: the
/// result is unspecified (typically `NotFound`) but never undefined
/// behavior.
///
/// # Examples
///
/// ```
/// use tavl_tree::{Error, TavlMap};
///
/// let mut map = TavlMap::new();
/// let node = map.insert(1, "one").unwrap();
///
/// assert_eq!(map.key_at(node), Some(&1));
/// assert_eq!(map.remove(node), Ok((1, "one")));
///
/// // The reference is stale now.
/// assert_eq!(map.remove(node), Err(Error::NotFound));
/// assert_eq!(map.key_at(node), None);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NodeRef {
    pub(crate) handle: Handle,
    pub(crate) generation: Generation,
}
