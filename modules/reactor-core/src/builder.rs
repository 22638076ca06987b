//! Fluent construction of a [`Reaction`].

use std::any::Any;

use crate::handler::ReactionHandler;
use crate::message::{Message, MessageType};
use crate::reaction::Reaction;

/// Persistent builder for reactions.
///
/// Every `when*` call leaves the receiver untouched and returns a new builder
/// with one more handler appended, so a partially built reaction can be
/// branched into several variants.
///
/// ```ignore
/// let reaction = ReactionBuilder::new()
///     .when(|n: &i32| n * 2)
///     .when_many(|s: &String| vec![Message::new(s.len())])
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReactionBuilder {
    handlers: Vec<ReactionHandler>,
}

impl ReactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the handlers of an existing reaction.
    pub fn from_reaction(reaction: &Reaction) -> Self {
        Self {
            handlers: reaction.handlers().to_vec(),
        }
    }

    /// React to `M` with exactly one message.
    ///
    /// The returned value is always one message, whatever its type: a
    /// `Vec<Message>`, an `Option` or a `ReactionComposer` returned from
    /// here is dispatched as a single message of that container type. Use
    /// [`when_many`](Self::when_many) or [`when_iter`](Self::when_iter) to
    /// return several messages.
    pub fn when<M, R, F>(&self, handler: F) -> Self
    where
        M: Any,
        R: Any + Send + Sync,
        F: Fn(&M) -> R + Send + Sync + 'static,
    {
        self.register(ReactionHandler::of(move |message: &M| {
            Ok(vec![Message::new(handler(message))])
        }))
    }

    /// React to `M` with a fixed list of messages (a `Vec`, an array, or a
    /// [`ReactionComposer`](crate::ReactionComposer)).
    pub fn when_many<M, R, F>(&self, handler: F) -> Self
    where
        M: Any,
        R: Into<Vec<Message>>,
        F: Fn(&M) -> R + Send + Sync + 'static,
    {
        self.register(ReactionHandler::of(move |message: &M| {
            Ok(handler(message).into())
        }))
    }

    /// React to `M` with any sequence of messages.
    pub fn when_iter<M, I, F>(&self, handler: F) -> Self
    where
        M: Any,
        I: IntoIterator<Item = Message>,
        F: Fn(&M) -> I + Send + Sync + 'static,
    {
        self.register(ReactionHandler::of(move |message: &M| {
            Ok(handler(message).into_iter().collect())
        }))
    }

    /// React to `M` with a handler that may fail. The error reaches the
    /// caller of `Reactor::react_to` unchanged.
    pub fn try_when<M, I, F>(&self, handler: F) -> Self
    where
        M: Any,
        I: IntoIterator<Item = Message>,
        F: Fn(&M) -> anyhow::Result<I> + Send + Sync + 'static,
    {
        self.register(ReactionHandler::of(move |message: &M| {
            Ok(handler(message)?.into_iter().collect())
        }))
    }

    /// Append a prebuilt handler.
    pub fn with_handler(&self, handler: ReactionHandler) -> Self {
        self.register(handler)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered message types, in registration order.
    pub fn message_types(&self) -> impl Iterator<Item = MessageType> + '_ {
        self.handlers.iter().map(ReactionHandler::message_type)
    }

    pub fn build(&self) -> Reaction {
        Reaction::new(self.handlers.clone())
    }

    fn register(&self, handler: ReactionHandler) -> Self {
        let mut handlers = Vec::with_capacity(self.handlers.len() + 1);
        handlers.extend(self.handlers.iter().cloned());
        handlers.push(handler);
        Self { handlers }
    }
}

impl From<&Reaction> for ReactionBuilder {
    fn from(reaction: &Reaction) -> Self {
        ReactionBuilder::from_reaction(reaction)
    }
}
