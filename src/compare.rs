use core::cmp::Ordering;

/// A three-way key comparison strategy, configured once per tree.
///
/// Exactly one strategy is active per tree instance. The built-in
/// [`NaturalOrder`] delegates to [`Ord`] and monomorphizes into a direct
/// comparison for each concrete key shape (fixed-width integers,
/// offset-like scalars, strings), so the common cases never pay for an
/// indirect call. [`FnOrder`] carries an arbitrary comparison closure;
/// any state the comparison needs lives in the closure's captures.
///
/// Implementations must be total orders. Giving a tree a comparator that
/// is inconsistent with itself, or mutating keys so that their relative
/// order changes while they are in a tree, is a logic error: it will not
/// cause undefined behavior, but lookups and iteration order become
/// unspecified.
pub trait Compare<K: ?Sized> {
    /// Compares two keys, `Less` when `lhs` sorts before `rhs`.
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering;
}

/// Comparison through the key type's [`Ord`] instance.
///
/// # Examples
///
/// ```
/// use tavl_tree::TavlMap;
///
/// // `new()` selects `NaturalOrder`; u64 keys compare numerically.
/// let mut map: TavlMap<u64, &str> = TavlMap::new();
/// map.insert(512, "header").unwrap();
/// map.insert(96, "superblock").unwrap();
///
/// let first = map.first().unwrap();
/// assert_eq!(map.key_at(first), Some(&96));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Compare<K> for NaturalOrder {
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// Comparison through a caller-supplied closure.
///
/// # Examples
///
/// ```
/// use tavl_tree::{FnOrder, TavlMap};
///
/// // Sort descending by wrapping the natural order.
/// let mut map = TavlMap::with_comparator(FnOrder(|a: &i32, b: &i32| b.cmp(a)));
/// for key in [1, 3, 2] {
///     map.insert(key, ()).unwrap();
/// }
///
/// let first = map.first().unwrap();
/// assert_eq!(map.key_at(first), Some(&3));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FnOrder<F>(pub F);

impl<K: ?Sized, F> Compare<K> for FnOrder<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        (self.0)(lhs, rhs)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn natural_order_delegates_to_ord() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(NaturalOrder.compare("b", "a"), Ordering::Greater);
        assert_eq!(NaturalOrder.compare(&7u64, &7u64), Ordering::Equal);
    }

    #[test]
    fn fn_order_uses_the_closure() {
        let reversed = FnOrder(|a: &i32, b: &i32| b.cmp(a));
        assert_eq!(reversed.compare(&1, &2), Ordering::Greater);
    }
}
