use crate::task::{Task, TaskId};

/// Fixed-capacity task storage.
///
/// `N` slots are allocated up front and never grow. A slot is either empty or holds one
/// task; emptying a slot bumps its generation so that old [`TaskId`]s stop matching.
pub(crate) struct TaskPool<const N: usize> {
    slots: [Slot; N],
    len: usize,
}

struct Slot {
    generation: u32,
    task: Option<Task>,
}

impl<const N: usize> TaskPool<N> {
    pub(crate) fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| Slot {
                generation: 0,
                task: None,
            }),
            len: 0,
        }
    }

    /// First empty slot in slot order.
    pub(crate) fn vacant(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.task.is_none())
    }

    pub(crate) fn insert(&mut self, index: usize, task: Task) -> TaskId {
        let slot = &mut self.slots[index];
        debug_assert!(slot.task.is_none(), "slot {index} is occupied");

        slot.task = Some(task);
        self.len += 1;

        TaskId {
            slot: index,
            generation: slot.generation,
        }
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<Task> {
        let slot = &mut self.slots[index];
        let task = slot.task.take()?;

        slot.generation = slot.generation.wrapping_add(1);
        self.len -= 1;

        Some(task)
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Task> {
        self.slots.get(index)?.task.as_ref()
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Task> {
        self.slots.get_mut(index)?.task.as_mut()
    }

    pub(crate) fn lookup(&self, id: TaskId) -> Option<&Task> {
        let slot = self.slots.get(id.slot)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.task.as_ref()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}
