//! Dispatch observers.

use std::sync::{Arc, Mutex};

use crate::types::Dispatched;

/// Sees every dispatch as soon as the reactor has handled it.
pub trait DispatchObserver: Send + Sync {
    fn observe(&self, dispatched: &Dispatched);
}

/// No-op observer.
impl DispatchObserver for () {
    fn observe(&self, _dispatched: &Dispatched) {}
}

// ---------------------------------------------------------------------------
// MemoryObserver (in-memory journal, no sink required)
// ---------------------------------------------------------------------------

/// Collects observed dispatches in memory. Thread-safe.
#[derive(Debug, Default)]
pub struct MemoryObserver {
    dispatches: Mutex<Vec<Dispatched>>,
}

impl MemoryObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything observed so far, in order.
    pub fn dispatches(&self) -> Vec<Dispatched> {
        match self.dispatches.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DispatchObserver for MemoryObserver {
    fn observe(&self, dispatched: &Dispatched) {
        let mut guard = match self.dispatches.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(dispatched.clone());
    }
}

// ---------------------------------------------------------------------------
// Arc<O> blanket: lets tests keep a handle on the observer
// ---------------------------------------------------------------------------

impl<O: DispatchObserver + ?Sized> DispatchObserver for Arc<O> {
    fn observe(&self, dispatched: &Dispatched) {
        (**self).observe(dispatched);
    }
}
