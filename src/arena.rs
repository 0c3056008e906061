//! Fixed-capacity slot allocator for map entries.
//!
//! Entries are addressed by stable [`SlotIndex`] values so bucket chains can
//! link through the arena without holding references. Freed slots are
//! recycled through a free list threaded through the vacant slots, so a
//! long-running set/remove workload never grows past `P` slots.

use heapless::Vec;

/// Stable handle to an arena slot. `u16` keeps the per-entry link overhead
/// small; capacities are bounded to `u16::MAX` at the map level.
pub(crate) type SlotIndex = u16;

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    /// Link to the next vacant slot, if any.
    Vacant(Option<SlotIndex>),
}

/// Fixed pool of at most `P` values with stable indices and O(1)
/// alloc/free. [`alloc`](Arena::alloc) hands the value back on exhaustion
/// so the caller can surface the failure without losing ownership.
#[derive(Debug)]
pub(crate) struct Arena<T, const P: usize> {
    slots: Vec<Slot<T>, P>,
    free: Option<SlotIndex>,
    len: usize,
}

impl<T, const P: usize> Arena<T, P> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }

    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// `true` once all `P` slots are occupied.
    pub(crate) fn is_full(&self) -> bool {
        self.len == P
    }

    /// Stores `value` and returns its index, or hands `value` back when the
    /// pool is saturated. The arena is unchanged on failure.
    pub(crate) fn alloc(&mut self, value: T) -> Result<SlotIndex, T> {
        match self.free {
            Some(index) => {
                let next = match self.slots[index as usize] {
                    Slot::Vacant(next) => next,
                    Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
                };
                self.slots[index as usize] = Slot::Occupied(value);
                self.free = next;
                self.len += 1;
                Ok(index)
            }
            None => match self.slots.push(Slot::Occupied(value)) {
                Ok(()) => {
                    self.len += 1;
                    Ok((self.slots.len() - 1) as SlotIndex)
                }
                Err(Slot::Occupied(value)) => Err(value),
                Err(Slot::Vacant(_)) => unreachable!("pushed slot changed variant"),
            },
        }
    }

    /// Vacates the slot at `index` and returns its value. The slot joins
    /// the free list and will be reused by a later [`alloc`](Arena::alloc).
    pub(crate) fn free(&mut self, index: SlotIndex) -> T {
        let slot = core::mem::replace(&mut self.slots[index as usize], Slot::Vacant(self.free));
        match slot {
            Slot::Occupied(value) => {
                self.free = Some(index);
                self.len -= 1;
                value
            }
            Slot::Vacant(_) => unreachable!("freed a vacant slot"),
        }
    }

    /// Shared access to an occupied slot.
    pub(crate) fn get(&self, index: SlotIndex) -> &T {
        match &self.slots[index as usize] {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => unreachable!("dangling slot index"),
        }
    }

    /// Exclusive access to an occupied slot.
    pub(crate) fn get_mut(&mut self, index: SlotIndex) -> &mut T {
        match &mut self.slots[index as usize] {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => unreachable!("dangling slot index"),
        }
    }

    /// Drops every value and resets the pool to empty.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_alloc_returns_sequential_indices() {
        let mut arena: Arena<u32, 4> = Arena::new();
        assert_eq!(arena.alloc(10), Ok(0));
        assert_eq!(arena.alloc(20), Ok(1));
        assert_eq!(arena.alloc(30), Ok(2));
        assert_eq!(arena.len(), 3);
        assert_eq!(*arena.get(1), 20);
    }

    #[test]
    fn test_arena_free_recycles_slot() {
        let mut arena: Arena<u32, 2> = Arena::new();
        let a = arena.alloc(1).unwrap();
        let _b = arena.alloc(2).unwrap();
        assert_eq!(arena.free(a), 1);
        assert_eq!(arena.len(), 1);

        // The vacated slot is reused, not a fresh one.
        assert_eq!(arena.alloc(3), Ok(a));
        assert_eq!(*arena.get(a), 3);
        assert!(arena.is_full());
    }

    #[test]
    fn test_arena_exhaustion_returns_value() {
        let mut arena: Arena<u32, 2> = Arena::new();
        arena.alloc(1).unwrap();
        arena.alloc(2).unwrap();
        assert_eq!(arena.alloc(3), Err(3));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_arena_free_list_is_lifo() {
        let mut arena: Arena<u32, 4> = Arena::new();
        let a = arena.alloc(1).unwrap();
        let b = arena.alloc(2).unwrap();
        arena.alloc(3).unwrap();
        arena.free(a);
        arena.free(b);
        assert_eq!(arena.alloc(4), Ok(b));
        assert_eq!(arena.alloc(5), Ok(a));
    }

    #[test]
    fn test_arena_get_mut() {
        let mut arena: Arena<u32, 2> = Arena::new();
        let a = arena.alloc(7).unwrap();
        *arena.get_mut(a) = 42;
        assert_eq!(*arena.get(a), 42);
    }

    #[test]
    fn test_arena_clear() {
        let mut arena: Arena<u32, 2> = Arena::new();
        arena.alloc(1).unwrap();
        arena.alloc(2).unwrap();
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.alloc(9), Ok(0));
    }
}
