use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The single reader/writer lock in front of an engine's state.
///
/// Readers share the state; a writer excludes everyone else for the whole call.
/// Poisoning is ignored: writers never leave the state half-updated when a rule or
/// predicate panics, since those only run before anything is written.
#[derive(Debug)]
pub(crate) struct Guard<S> {
    lock: RwLock<S>,
}

impl<S> Guard<S> {
    pub(crate) fn new(state: S) -> Self {
        Guard {
            lock: RwLock::new(state),
        }
    }

    #[inline]
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, S> {
        self.lock.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, S> {
        self.lock.write().unwrap_or_else(PoisonError::into_inner)
    }
}
