use super::handle::Handle;

/// A subtree node count. Wrapping `Handle` keeps the niche optimization
/// and caps counts at the arena's addressable range.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ZERO: Self = Self::from_usize(0);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        Self(Handle::from_index(size))
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0.to_index()
    }

    /// One more node on this side.
    #[inline]
    pub(crate) const fn inc(self) -> Self {
        Self::from_usize(self.to_usize() + 1)
    }

    /// One fewer node on this side. The caller guarantees the side is
    /// non-empty.
    #[inline]
    pub(crate) const fn dec(self) -> Self {
        Self::from_usize(self.to_usize() - 1)
    }
}
