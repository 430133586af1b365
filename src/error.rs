use std::fmt;

/// Error returned by [`Scheduler::add_task`](crate::Scheduler::add_task).
///
/// Carries the rejected procedure back to the caller, so a failed registration has no
/// side effect at all.
#[derive(thiserror::Error)]
pub enum AddTaskError<P> {
    #[error("task pool is full ({capacity} slots)")]
    PoolFull { procedure: P, capacity: usize },
}

impl<P> AddTaskError<P> {
    /// Returns the procedure that could not be registered.
    pub fn into_inner(self) -> P {
        match self {
            AddTaskError::PoolFull { procedure, .. } => procedure,
        }
    }
}

impl<P> fmt::Debug for AddTaskError<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddTaskError::PoolFull { capacity, .. } => f
                .debug_struct("PoolFull")
                .field("procedure", &std::any::type_name::<P>())
                .field("capacity", capacity)
                .finish(),
        }
    }
}
