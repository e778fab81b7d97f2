//! Error types for `tavl_tree`.

use thiserror::Error;

/// Result type alias using our [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Failures a tree operation can report.
///
/// Every variant is local to the call that raised it: the tree is left in
/// its prior, fully consistent state, and the caller decides whether to
/// retry, propagate, or ignore.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Insert of a key that compares equal to one already present. The
    /// tree is unchanged, down to every existing node's payload.
    #[error("key already exists in the tree")]
    AlreadyExists,

    /// A node handle that does not name a live member of the tree, for
    /// example one whose node was already removed.
    #[error("node not found in the tree")]
    NotFound,

    /// Node-shell allocation failed, either because the backing storage
    /// could not grow or because the handle range is exhausted. No
    /// partial insert is ever observable.
    #[error("node allocation failed")]
    AllocationFailed,
}
