//! Ready/event set of the scheduler.
//!
//! Holds the slots of every task whose condition is `Immediate` or `Event`. There is no
//! priority between them: the scheduler walks the set once per tick in set order.

/// Unordered set of pool slots, allocated once for the whole pool.
pub(crate) struct ReadySet {
    slots: Vec<usize>,
}

impl ReadySet {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Appends a slot at the end of the scan order.
    pub(crate) fn push(&mut self, slot: usize) {
        debug_assert!(!self.slots.contains(&slot), "slot {slot} is already ready");
        self.slots.push(slot);
    }

    pub(crate) fn get(&self, index: usize) -> usize {
        self.slots[index]
    }

    /// Removes the entry at `index` by moving the last entry into its place.
    ///
    /// A scan that is at `index` must look at `index` again to visit the moved entry.
    pub(crate) fn swap_remove(&mut self, index: usize) -> usize {
        self.slots.swap_remove(index)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
