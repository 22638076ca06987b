//! Journal types produced by a settle.

use reactor_core::Message;

/// One message as it passed through the reactor.
#[derive(Debug, Clone)]
pub struct Dispatched {
    /// Position in the settle, starting at 1 for the root.
    pub seq: u64,
    /// `seq` of the dispatch whose handlers produced this message.
    pub caused_by: Option<u64>,
    pub message: Message,
    /// Whether any handler was registered for the message's type.
    pub handled: bool,
    /// Number of messages the handlers returned.
    pub produced: usize,
}

impl Dispatched {
    pub fn is_root(&self) -> bool {
        self.caused_by.is_none()
    }
}

/// The full journal of a settled reaction, in dispatch order.
#[derive(Debug, Clone)]
pub struct Settlement {
    dispatches: Vec<Dispatched>,
}

impl Settlement {
    pub(crate) fn new(dispatches: Vec<Dispatched>) -> Self {
        Self { dispatches }
    }

    pub fn dispatches(&self) -> &[Dispatched] {
        &self.dispatches
    }

    pub fn len(&self) -> usize {
        self.dispatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dispatches.is_empty()
    }

    pub fn root(&self) -> Option<&Dispatched> {
        self.dispatches.first()
    }

    /// Dispatches nothing was registered for: where the chain came to rest.
    pub fn terminal(&self) -> impl Iterator<Item = &Dispatched> {
        self.dispatches.iter().filter(|d| !d.handled)
    }

    pub fn children_of(&self, seq: u64) -> impl Iterator<Item = &Dispatched> {
        self.dispatches
            .iter()
            .filter(move |d| d.caused_by == Some(seq))
    }

    /// Every dispatched value of type `T`, in dispatch order.
    pub fn values<T: 'static>(&self) -> impl Iterator<Item = &T> {
        self.dispatches
            .iter()
            .filter_map(|d| d.message.downcast_ref::<T>())
    }

    pub fn into_dispatches(self) -> Vec<Dispatched> {
        self.dispatches
    }
}
