use alloc::vec::Vec;

use crate::error::{Error, Result};

use super::handle::{Generation, Handle};

/// One arena slot. The generation ticks every time the slot is vacated,
/// so handles minted for a previous occupant never resolve again.
#[derive(Clone)]
struct Slot<T> {
    generation: Generation,
    element: Option<T>,
}

#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Places `element` into a slot and returns its handle. Fails, with
    /// the arena untouched, if the backing storage cannot grow or the
    /// handle range is exhausted.
    pub(crate) fn try_alloc(&mut self, element: T) -> Result<Handle> {
        if let Some(h) = self.free.pop() {
            // Reuse a free slot; its generation was bumped when vacated.
            let slot = &mut self.slots[h.to_index()];
            debug_assert!(slot.element.is_none());
            slot.element = Some(element);
            return Ok(h);
        }
        // Strict less-than keeps the total element count within
        // `Handle::MAX`, which `Size` shares as its maximum.
        if self.slots.len() >= Handle::MAX {
            return Err(Error::AllocationFailed);
        }
        self.slots.try_reserve(1).map_err(|_| Error::AllocationFailed)?;
        self.slots.push(Slot {
            generation: 0,
            element: Some(element),
        });
        Ok(Handle::from_index(self.slots.len() - 1))
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].element.as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].element.as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Mutable access to two distinct occupied slots at once.
    pub(crate) fn get2_mut(&mut self, a: Handle, b: Handle) -> (&mut T, &mut T) {
        let (i, j) = (a.to_index(), b.to_index());
        assert_ne!(i, j, "`Arena::get2_mut()` - handles must be distinct!");
        let msg = "`Arena::get2_mut()` - `handle` is invalid!";
        if i < j {
            let (lo, hi) = self.slots.split_at_mut(j);
            (lo[i].element.as_mut().expect(msg), hi[0].element.as_mut().expect(msg))
        } else {
            let (lo, hi) = self.slots.split_at_mut(i);
            let (first, second) = (hi[0].element.as_mut().expect(msg), lo[j].element.as_mut().expect(msg));
            (first, second)
        }
    }

    /// The current generation of a slot.
    #[inline]
    pub(crate) fn generation(&self, handle: Handle) -> Generation {
        self.slots[handle.to_index()].generation
    }

    /// Whether `handle` still names the occupant it was minted for.
    pub(crate) fn contains(&self, handle: Handle, generation: Generation) -> bool {
        self.slots
            .get(handle.to_index())
            .is_some_and(|slot| slot.generation == generation && slot.element.is_some())
    }

    /// Vacates a slot, bumping its generation so outstanding handles to
    /// the occupant go stale.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = &mut self.slots[handle.to_index()];
        let element = slot.element.take().expect("`Arena::take()` - `handle` is invalid!");
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle);
        element
    }

    /// Drops every element. Occupied slots get a generation bump, so
    /// handles minted before the clear never resolve afterwards.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.element.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free.push(Handle::from_index(index));
        }
    }

    /// Consumes every element in slot order, leaving the arena empty.
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.free.clear();
        self.slots.drain(..).filter_map(|slot| slot.element)
    }
}
