//! Immutable, ordered handler lists.

use std::sync::{Arc, OnceLock};

use crate::handler::ReactionHandler;

/// An ordered set of handler registrations.
///
/// Order is registration order and is the order handlers fire in. The same
/// message type may appear more than once; every registration fires.
/// Concatenation always produces a new `Reaction`.
#[derive(Debug, Clone)]
pub struct Reaction {
    handlers: Arc<[ReactionHandler]>,
}

static EMPTY: OnceLock<Reaction> = OnceLock::new();

impl Reaction {
    pub fn new(handlers: impl Into<Arc<[ReactionHandler]>>) -> Self {
        Self {
            handlers: handlers.into(),
        }
    }

    /// The shared reaction without handlers. Every call returns the same instance.
    pub fn empty() -> &'static Reaction {
        EMPTY.get_or_init(|| Reaction::new(Vec::<ReactionHandler>::new()))
    }

    pub fn handlers(&self) -> &[ReactionHandler] {
        &self.handlers
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// This reaction's handlers followed by `other`'s.
    pub fn concat(&self, other: &Reaction) -> Reaction {
        self.concat_handlers(other.handlers.iter().cloned())
    }

    pub fn concat_handler(&self, handler: ReactionHandler) -> Reaction {
        self.concat_handlers(std::iter::once(handler))
    }

    pub fn concat_handlers(&self, handlers: impl IntoIterator<Item = ReactionHandler>) -> Reaction {
        let concatenated: Vec<ReactionHandler> =
            self.handlers.iter().cloned().chain(handlers).collect();
        Reaction::new(concatenated)
    }
}

impl Default for Reaction {
    fn default() -> Self {
        Reaction::new(Vec::<ReactionHandler>::new())
    }
}

impl AsRef<[ReactionHandler]> for Reaction {
    fn as_ref(&self) -> &[ReactionHandler] {
        &self.handlers
    }
}

impl From<Vec<ReactionHandler>> for Reaction {
    fn from(handlers: Vec<ReactionHandler>) -> Self {
        Reaction::new(handlers)
    }
}

impl From<Reaction> for Vec<ReactionHandler> {
    fn from(reaction: Reaction) -> Self {
        reaction.handlers.to_vec()
    }
}

impl FromIterator<ReactionHandler> for Reaction {
    fn from_iter<I: IntoIterator<Item = ReactionHandler>>(iter: I) -> Self {
        Reaction::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a Reaction {
    type Item = &'a ReactionHandler;
    type IntoIter = std::slice::Iter<'a, ReactionHandler>;

    fn into_iter(self) -> Self::IntoIter {
        self.handlers.iter()
    }
}
