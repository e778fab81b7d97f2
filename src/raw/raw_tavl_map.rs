use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;

use crate::compare::Compare;
use crate::error::{Error, Result};

use super::arena::Arena;
use super::handle::{Generation, Handle};
use super::node::{Balance, Link, Node, SearchOutcome, Side};
use super::size::Size;

/// The core threaded tree backing `TavlMap`.
///
/// Nodes live in a generational arena and point at each other by handle.
/// A node's side slot is either a real child edge or a thread to the
/// in-order neighbor on that side, so every walk here is iterative:
/// search and rank descend child links, mutation climbs parent links,
/// traversal follows threads. Nothing recurses and nothing allocates
/// beyond the node shells themselves.
pub(crate) struct RawTavlMap<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of key-value pairs in the tree.
    len: usize,
}

impl<K, V> RawTavlMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the node capacity of the backing arena.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Drops every node (and the payloads it holds); the tree stays
    /// valid and empty. Outstanding handles are invalidated, not left
    /// dangling.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns a reference to a node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    /// Returns a mutable reference to a node by handle.
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// The generation a `NodeRef` minted for `handle` must carry.
    pub(crate) fn generation(&self, handle: Handle) -> Generation {
        self.nodes.generation(handle)
    }

    /// Checks a (handle, generation) pair against the arena; `None` for
    /// anything stale or foreign.
    pub(crate) fn resolve(&self, handle: Handle, generation: Generation) -> Option<Handle> {
        self.nodes.contains(handle, generation).then_some(handle)
    }

    // ─── Search primitives ───────────────────────────────────────────────

    /// Descends from the root comparing `key` at each node. Stops as soon
    /// as the side to continue on is a thread, yielding the attachment
    /// point an insert of `key` would use.
    pub(crate) fn search<Q, C>(&self, key: &Q, cmp: &C) -> SearchOutcome
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let Some(root) = self.root else {
            return SearchOutcome::Missing {
                parent: None,
                side: Side::Left,
            };
        };

        let mut current = root;
        loop {
            let node = self.nodes.get(current);
            let side = match cmp.compare(key, node.key.borrow()) {
                Ordering::Equal => return SearchOutcome::Found(current),
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            match node.link(side) {
                Link::Child(child) => current = child,
                Link::Thread(_) => {
                    return SearchOutcome::Missing {
                        parent: Some(current),
                        side,
                    };
                }
            }
        }
    }

    /// Exact lookup.
    pub(crate) fn find<Q, C>(&self, key: &Q, cmp: &C) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        match self.search(key, cmp) {
            SearchOutcome::Found(handle) => Some(handle),
            SearchOutcome::Missing { .. } => None,
        }
    }

    /// The node with the greatest key not exceeding `key`.
    ///
    /// A failed search stops at the node the key would attach under; the
    /// key would sit immediately before it (left side) or immediately
    /// after it (right side) in order, so the answer is the probe's
    /// predecessor thread or the probe itself.
    pub(crate) fn find_le<Q, C>(&self, key: &Q, cmp: &C) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        match self.search(key, cmp) {
            SearchOutcome::Found(handle) => Some(handle),
            SearchOutcome::Missing { parent: None, .. } => None,
            SearchOutcome::Missing {
                parent: Some(probe),
                side: Side::Right,
            } => Some(probe),
            SearchOutcome::Missing {
                parent: Some(probe),
                side: Side::Left,
            } => self.nodes.get(probe).link(Side::Left).as_thread(),
        }
    }

    /// 0-based order-statistic lookup, driven by the left-side counts.
    pub(crate) fn by_rank(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len {
            return None;
        }

        let mut current = self.root?;
        let mut rank = rank;
        loop {
            let node = self.nodes.get(current);
            let left = node.count(Side::Left).to_usize();
            match rank.cmp(&left) {
                Ordering::Equal => return Some(current),
                Ordering::Less => {
                    current = node.child(Side::Left).expect("left count covers this rank");
                }
                Ordering::Greater => {
                    rank -= left + 1;
                    current = node.child(Side::Right).expect("right count covers this rank");
                }
            }
        }
    }

    /// The number of keys smaller than `key`, if `key` is present.
    pub(crate) fn rank_of<Q, C>(&self, key: &Q, cmp: &C) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        let mut current = self.root?;
        let mut before = 0usize;
        loop {
            let node = self.nodes.get(current);
            match cmp.compare(key, node.key.borrow()) {
                Ordering::Equal => return Some(before + node.count(Side::Left).to_usize()),
                Ordering::Less => current = node.child(Side::Left)?,
                Ordering::Greater => {
                    before += node.count(Side::Left).to_usize() + 1;
                    current = node.child(Side::Right)?;
                }
            }
        }
    }

    // ─── Traversal ───────────────────────────────────────────────────────

    /// The first node in order, following real child links only.
    pub(crate) fn first(&self) -> Option<Handle> {
        Some(self.extreme(self.root?, Side::Left))
    }

    /// The last node in order.
    pub(crate) fn last(&self) -> Option<Handle> {
        Some(self.extreme(self.root?, Side::Right))
    }

    /// The in-order successor: the right thread when there is no right
    /// subtree, otherwise the leftmost node of that subtree.
    pub(crate) fn next(&self, handle: Handle) -> Option<Handle> {
        self.neighbor(handle, Side::Right)
    }

    /// The in-order predecessor.
    pub(crate) fn prev(&self, handle: Handle) -> Option<Handle> {
        self.neighbor(handle, Side::Left)
    }

    fn neighbor(&self, handle: Handle, side: Side) -> Option<Handle> {
        match self.nodes.get(handle).link(side) {
            Link::Thread(target) => target,
            Link::Child(child) => Some(self.extreme(child, side.opposite())),
        }
    }

    /// The outermost node on `side` of the subtree rooted at `from`.
    fn extreme(&self, from: Handle, side: Side) -> Handle {
        let mut current = from;
        while let Link::Child(child) = self.nodes.get(current).link(side) {
            current = child;
        }
        current
    }

    /// Which side of `parent` the child `child` hangs on.
    fn side_of(&self, parent: Handle, child: Handle) -> Side {
        if self.nodes.get(parent).link(Side::Left) == Link::Child(child) {
            Side::Left
        } else {
            debug_assert_eq!(self.nodes.get(parent).link(Side::Right), Link::Child(child));
            Side::Right
        }
    }

    // ─── Insertion ───────────────────────────────────────────────────────

    /// Inserts a key-value pair, failing on an equal key with the tree
    /// untouched.
    pub(crate) fn insert<C>(&mut self, key: K, value: V, cmp: &C) -> Result<Handle>
    where
        C: Compare<K>,
    {
        match self.search(&key, cmp) {
            SearchOutcome::Found(_) => Err(Error::AlreadyExists),
            SearchOutcome::Missing { parent, side } => self.insert_at(parent, side, key, value),
        }
    }

    /// Attaches a new leaf at a position produced by `search`.
    ///
    /// The leaf inherits the parent's old thread on the entered side and
    /// threads back to the parent on its other side, so the in-order
    /// chain is preserved without touching any further node. Allocation
    /// happens before the first structural edit; a failed allocation
    /// leaves the tree in its prior state.
    pub(crate) fn insert_at(&mut self, parent: Option<Handle>, side: Side, key: K, value: V) -> Result<Handle> {
        let Some(parent) = parent else {
            debug_assert!(self.root.is_none());
            let leaf = Node::new_leaf(key, value, None, Link::Thread(None), Link::Thread(None));
            let handle = self.nodes.try_alloc(leaf)?;
            self.root = Some(handle);
            self.len = 1;
            return Ok(handle);
        };

        let inherited = self.nodes.get(parent).link(side);
        debug_assert!(!inherited.is_child(), "insertion point must be a thread slot");
        let (left, right) = match side {
            Side::Left => (inherited, Link::Thread(Some(parent))),
            Side::Right => (Link::Thread(Some(parent)), inherited),
        };

        let leaf = Node::new_leaf(key, value, Some(parent), left, right);
        let handle = self.nodes.try_alloc(leaf)?;
        self.nodes.get_mut(parent).set_link(side, Link::Child(handle));
        self.len += 1;
        self.rebalance_after_insert(handle);
        Ok(handle)
    }

    /// Climbs from the new leaf to the root. Every ancestor's entered
    /// side grew by one node, so counts are bumped the whole way; the
    /// height change propagates through the balance flags until an
    /// ancestor absorbs it or a single rotation restores the pre-insert
    /// height. At most one rotation per insert.
    fn rebalance_after_insert(&mut self, inserted: Handle) {
        let mut child = inserted;
        let mut growing = true;

        while let Some(ancestor) = self.nodes.get(child).parent {
            let side = self.side_of(ancestor, child);
            {
                let node = self.nodes.get_mut(ancestor);
                node.set_count(side, node.count(side).inc());
            }

            if growing {
                child = match self.nodes.get(ancestor).balance {
                    Balance::Balanced => {
                        // This subtree got taller; keep climbing.
                        self.nodes.get_mut(ancestor).balance = Balance::Heavy(side);
                        ancestor
                    }
                    Balance::Heavy(heavy) if heavy == side => {
                        growing = false;
                        self.rotate(ancestor, side).0
                    }
                    Balance::Heavy(_) => {
                        // The shorter side caught up; height unchanged.
                        self.nodes.get_mut(ancestor).balance = Balance::Balanced;
                        growing = false;
                        ancestor
                    }
                };
            } else {
                child = ancestor;
            }
        }
    }

    // ─── Deletion ────────────────────────────────────────────────────────

    /// Removes the node a (handle, generation) pair names, returning its
    /// payload. Stale or foreign pairs fail with `NotFound` and no
    /// effect.
    pub(crate) fn remove(&mut self, handle: Handle, generation: Generation) -> Result<(K, V)> {
        if !self.nodes.contains(handle, generation) {
            return Err(Error::NotFound);
        }
        Ok(self.remove_valid(handle))
    }

    /// Removes a node known to be live.
    ///
    /// An internal node is never spliced out directly: its payload is
    /// swapped with the adjacent neighbor on the heavier side (ties go
    /// left) and that neighbor, which has at most one real child, is
    /// excised instead.
    pub(crate) fn remove_valid(&mut self, target: Handle) -> (K, V) {
        let victim = if self.nodes.get(target).is_internal() {
            let node = self.nodes.get(target);
            let side = if node.count(Side::Left).to_usize() >= node.count(Side::Right).to_usize() {
                Side::Left
            } else {
                Side::Right
            };
            let subtree = node.child(side).expect("internal node has two real children");
            let neighbor = self.extreme(subtree, side.opposite());
            self.swap_payload(target, neighbor);
            neighbor
        } else {
            target
        };
        self.splice(victim)
    }

    fn swap_payload(&mut self, a: Handle, b: Handle) {
        let (node_a, node_b) = self.nodes.get2_mut(a, b);
        core::mem::swap(&mut node_a.key, &mut node_b.key);
        core::mem::swap(&mut node_a.value, &mut node_b.value);
    }

    /// Splices out a node with at most one real child, then rebalances
    /// upward from the splice point.
    fn splice(&mut self, victim: Handle) -> (K, V) {
        let node = self.nodes.get(victim);
        let parent = node.parent;
        let left = node.link(Side::Left);
        let right = node.link(Side::Right);

        // Exactly one in-order neighbor can thread at the victim: the
        // extreme node of its only real subtree. Re-thread it to skip
        // over the victim before the victim disappears.
        let child = match (left, right) {
            (Link::Child(subtree), Link::Thread(successor)) => {
                let pred = self.extreme(subtree, Side::Right);
                debug_assert_eq!(self.nodes.get(pred).link(Side::Right), Link::Thread(Some(victim)));
                self.nodes.get_mut(pred).set_link(Side::Right, Link::Thread(successor));
                Some(subtree)
            }
            (Link::Thread(predecessor), Link::Child(subtree)) => {
                let succ = self.extreme(subtree, Side::Left);
                debug_assert_eq!(self.nodes.get(succ).link(Side::Left), Link::Thread(Some(victim)));
                self.nodes.get_mut(succ).set_link(Side::Left, Link::Thread(predecessor));
                Some(subtree)
            }
            (Link::Thread(_), Link::Thread(_)) => None,
            (Link::Child(_), Link::Child(_)) => {
                unreachable!("internal nodes are swapped toward a neighbor before splicing")
            }
        };

        // Detach from the parent (or the root slot). A removed leaf's own
        // thread on the parent's side survives it as the parent's thread.
        let climb_from = match parent {
            Some(parent) => {
                let side = self.side_of(parent, victim);
                let slot = match child {
                    Some(subtree) => Link::Child(subtree),
                    None => self.nodes.get(victim).link(side),
                };
                self.nodes.get_mut(parent).set_link(side, slot);
                Some((parent, side))
            }
            None => {
                self.root = child;
                None
            }
        };
        if let Some(subtree) = child {
            self.nodes.get_mut(subtree).parent = parent;
        }

        self.len -= 1;
        let removed = self.nodes.take(victim);
        if let Some((parent, side)) = climb_from {
            self.rebalance_after_remove(parent, side);
        }
        (removed.key, removed.value)
    }

    /// Climbs from the splice point to the root. Counts shrink the whole
    /// way up; the height-shrink signal may force a rotation at every
    /// level and stops propagating only where a subtree's height provably
    /// did not change.
    fn rebalance_after_remove(&mut self, parent: Handle, parent_side: Side) {
        let mut current = Some((parent, parent_side));
        let mut shrinking = true;

        while let Some((node, side)) = current {
            {
                let n = self.nodes.get_mut(node);
                n.set_count(side, n.count(side).dec());
            }

            let subroot = if shrinking {
                match self.nodes.get(node).balance {
                    Balance::Heavy(heavy) if heavy == side => {
                        // The taller side shortened; this subtree shrank.
                        self.nodes.get_mut(node).balance = Balance::Balanced;
                        node
                    }
                    Balance::Balanced => {
                        // Still as tall on the other side; height holds.
                        self.nodes.get_mut(node).balance = Balance::Heavy(side.opposite());
                        shrinking = false;
                        node
                    }
                    Balance::Heavy(heavy) => {
                        let (subroot, shrank) = self.rotate(node, heavy);
                        shrinking = shrank;
                        subroot
                    }
                }
            } else {
                node
            };

            current = self.nodes.get(subroot).parent.map(|p| (p, self.side_of(p, subroot)));
        }
    }

    // ─── Rotation helper ─────────────────────────────────────────────────

    /// Restores balance at `node`, which is overweight on `heavy`.
    /// Returns the handle now rooting the subtree and whether the
    /// subtree's height decreased.
    fn rotate(&mut self, node: Handle, heavy: Side) -> (Handle, bool) {
        let pivot = self.nodes.get(node).child(heavy).expect("heavy side is a real child");
        if self.nodes.get(pivot).balance == Balance::Heavy(heavy.opposite()) {
            (self.rotate_double(node, heavy), true)
        } else {
            self.rotate_single(node, heavy)
        }
    }

    /// Single rotation promoting `node`'s `heavy`-side child.
    fn rotate_single(&mut self, node: Handle, heavy: Side) -> (Handle, bool) {
        let opposite = heavy.opposite();
        let pivot = self.nodes.get(node).child(heavy).expect("rotation pivot");
        let pivot_balance = self.nodes.get(pivot).balance;
        debug_assert_ne!(pivot_balance, Balance::Heavy(opposite), "inner-heavy pivot needs a double rotation");

        self.rotate_structural(node, heavy, pivot);

        // An equal-balanced pivot occurs only while deleting; the rotated
        // subtree then keeps its height, which ends the shrink climb.
        if pivot_balance == Balance::Heavy(heavy) {
            self.nodes.get_mut(node).balance = Balance::Balanced;
            self.nodes.get_mut(pivot).balance = Balance::Balanced;
            (pivot, true)
        } else {
            self.nodes.get_mut(node).balance = Balance::Heavy(heavy);
            self.nodes.get_mut(pivot).balance = Balance::Heavy(opposite);
            (pivot, false)
        }
    }

    /// Double rotation for the inner-heavy case: the pivot's inner child
    /// comes up two levels. Expressed as two single rotations; the flag
    /// algebra depends on which side of the promoted grandchild carried
    /// the extra height.
    fn rotate_double(&mut self, node: Handle, heavy: Side) -> Handle {
        let opposite = heavy.opposite();
        let pivot = self.nodes.get(node).child(heavy).expect("rotation pivot");
        let inner = self.nodes.get(pivot).child(opposite).expect("inner grandchild");
        let inner_balance = self.nodes.get(inner).balance;

        self.rotate_structural(pivot, opposite, inner);
        self.rotate_structural(node, heavy, inner);

        self.nodes.get_mut(node).balance = if inner_balance == Balance::Heavy(heavy) {
            Balance::Heavy(opposite)
        } else {
            Balance::Balanced
        };
        self.nodes.get_mut(pivot).balance = if inner_balance == Balance::Heavy(opposite) {
            Balance::Heavy(heavy)
        } else {
            Balance::Balanced
        };
        self.nodes.get_mut(inner).balance = Balance::Balanced;
        inner
    }

    /// Re-links `pivot` above `node`, fixing child links, parent links,
    /// threads, and the two nodes' subtree counts.
    ///
    /// A rotation never changes the in-order sequence, so the only link
    /// that can flip between child and thread form is the edge between
    /// the two rotated nodes: a pivot with no inner subtree was threaded
    /// at `node` and `node` becomes threaded at the pivot.
    fn rotate_structural(&mut self, node: Handle, heavy: Side, pivot: Handle) {
        let opposite = heavy.opposite();
        let parent = self.nodes.get(node).parent;
        let moved = self.nodes.get(pivot).link(opposite);

        match moved {
            Link::Child(subtree) => {
                let count = self.nodes.get(subtree).subtree_count();
                let n = self.nodes.get_mut(node);
                n.set_link(heavy, Link::Child(subtree));
                n.set_count(heavy, Size::from_usize(count));
                self.nodes.get_mut(subtree).parent = Some(node);
            }
            Link::Thread(_) => {
                debug_assert_eq!(moved, Link::Thread(Some(node)));
                let n = self.nodes.get_mut(node);
                n.set_link(heavy, Link::Thread(Some(pivot)));
                n.set_count(heavy, Size::ZERO);
            }
        }

        let node_count = self.nodes.get(node).subtree_count();
        {
            let p = self.nodes.get_mut(pivot);
            p.set_link(opposite, Link::Child(node));
            p.set_count(opposite, Size::from_usize(node_count));
            p.parent = parent;
        }
        self.nodes.get_mut(node).parent = Some(pivot);

        match parent {
            Some(parent) => {
                let side = self.side_of(parent, node);
                self.nodes.get_mut(parent).set_link(side, Link::Child(pivot));
            }
            None => self.root = Some(pivot),
        }
    }

    // ─── Teardown ────────────────────────────────────────────────────────

    /// Drains all key-value pairs in ascending order by walking the
    /// thread chain. O(n), no rebalancing.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut result = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(handle) = current {
            // Read the successor before the shell disappears.
            current = self.next(handle);
            let node = self.nodes.take(handle);
            result.push((node.key, node.value));
        }
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        result
    }

    /// Hands every payload to `teardown`, one node at a time, then frees
    /// the shells. Teardown order is arena slot order, not key order.
    pub(crate) fn destroy<F>(mut self, mut teardown: F)
    where
        F: FnMut(K, V),
    {
        for node in self.nodes.drain() {
            teardown(node.key, node.value);
        }
    }
}

impl<K: Clone, V: Clone> Clone for RawTavlMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            len: self.len,
        }
    }
}
