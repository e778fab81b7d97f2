//! Threaded order-statistic AVL tree collections for Rust.
//!
//! This crate provides [`TavlMap`] and [`TavlSet`], ordered collections
//! built on a single balanced search tree with two less common tricks:
//!
//! - **Threading** - a node slot that has no real child holds a link to
//!   the node's in-order neighbor instead, so [`next`](TavlMap::next),
//!   [`prev`](TavlMap::prev), and full traversals run without recursion
//!   or an auxiliary stack.
//! - **Order statistics** - every node tracks its subtree sizes, so the
//!   element at any sorted position ([`by_rank`](TavlMap::by_rank)) and
//!   the position of any key ([`rank_of`](TavlMap::rank_of)) are O(log n)
//!   queries.
//!
//! Insertions return a stable [`NodeRef`] that can later be used for O(1)
//! payload access, O(1) amortized neighbor stepping, and direct removal,
//! which makes the collections a good fit for registries that track live
//! objects by a sortable identity (say, open resources keyed by their
//! file offset).
//!
//! # Example
//!
//! ```
//! use tavl_tree::{Rank, TavlMap};
//!
//! let mut open_objects = TavlMap::new();
//!
//! // Track objects by file address; handles come back from insert.
//! let header = open_objects.insert(0x60_u64, "object header").unwrap();
//! open_objects.insert(0x800, "local heap").unwrap();
//! open_objects.insert(0x200, "b-tree node").unwrap();
//!
//! // Keyed, ranked, and neighbor queries are all O(log n) or better.
//! assert_eq!(open_objects.get(&0x200), Some(&"b-tree node"));
//! assert_eq!(open_objects[Rank(0)], "object header");
//! let next = open_objects.next(header).unwrap();
//! assert_eq!(open_objects.key_at(next), Some(&0x200));
//!
//! // The address just below an arbitrary offset.
//! let below = open_objects.find_le(&0x7ff).unwrap();
//! assert_eq!(open_objects.key_at(below), Some(&0x200));
//!
//! // Duplicate keys are rejected, and removal goes through the handle.
//! assert!(open_objects.insert(0x60, "duplicate").is_err());
//! assert_eq!(open_objects.remove(header), Ok((0x60, "object header")));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - only requires `alloc`.
//! - **No unsafe code** - nodes live in a generational arena and refer to
//!   each other by index, so stale handles are detected, never dangling.
//! - **Pluggable ordering** - a per-tree [`Compare`] strategy; the
//!   default [`NaturalOrder`] compiles down to direct `Ord` comparisons,
//!   and [`FnOrder`] accepts any closure.
//! - **Single-threaded by design** - no internal locking; wrap a tree in
//!   a lock to share it.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod node_ref;
mod order_statistic;
mod raw;

pub mod tavl_map;
pub mod tavl_set;

pub use compare::{Compare, FnOrder, NaturalOrder};
pub use error::{Error, Result};
pub use node_ref::NodeRef;
pub use order_statistic::Rank;
pub use tavl_map::TavlMap;
pub use tavl_set::TavlSet;
