//! The compiled dispatcher.

use std::any::Any;
use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::handler::ReactionHandler;
use crate::message::{Message, MessageType};
use crate::reaction::Reaction;

/// Routes messages to the handlers registered for their exact type.
///
/// The dispatch table is built once and only read afterwards, so a `Reactor`
/// can be shared across threads behind an `Arc` and reacted on concurrently.
/// Handlers registered for one type never fire for another, even if the other
/// type wraps or derefs to it.
#[derive(Debug)]
pub struct Reactor {
    dispatch_table: HashMap<MessageType, Vec<ReactionHandler>>,
    handler_count: usize,
}

impl Reactor {
    pub fn new(reaction: &Reaction) -> Self {
        let mut dispatch_table: HashMap<MessageType, Vec<ReactionHandler>> = HashMap::new();
        for handler in reaction {
            dispatch_table
                .entry(handler.message_type())
                .or_default()
                .push(handler.clone());
        }

        debug!(
            handlers = reaction.len(),
            message_types = dispatch_table.len(),
            "Compiled reaction"
        );

        Self {
            dispatch_table,
            handler_count: reaction.len(),
        }
    }

    /// React to a message and return the messages its handlers produced.
    ///
    /// Handlers fire in registration order; outputs are concatenated in that
    /// order. A message nobody handles yields an empty list. The first failing
    /// handler stops the remaining ones and its error is returned as is.
    pub fn react_to(&self, message: &Message) -> Result<Vec<Message>> {
        let output = self.react_to_iter(message).collect::<Result<Vec<_>>>()?;

        trace!(
            message_type = message.type_name(),
            handlers = self.handlers_for(&message.message_type()).len(),
            produced = output.len(),
            "Reacted to message"
        );
        Ok(output)
    }

    /// Lazy form of [`react_to`](Self::react_to).
    ///
    /// A handler only runs once every message of the handlers before it has
    /// been consumed. After an `Err` the iterator is exhausted.
    pub fn react_to_iter(&self, message: &Message) -> Reactions<'_> {
        let message_type = message.message_type();
        let handlers = self.handlers_for(&message_type);
        if handlers.is_empty() {
            trace!(message_type = message_type.name(), "No handlers for message");
        }

        Reactions {
            message: message.clone(),
            handlers: handlers.iter().enumerate(),
            pending: Vec::new().into_iter(),
            failed: false,
        }
    }

    /// Wrap `value` and react to it.
    pub fn react_to_value<T: Any + Send + Sync>(&self, value: T) -> Result<Vec<Message>> {
        self.react_to(&Message::new(value))
    }

    pub fn handles(&self, message_type: &MessageType) -> bool {
        self.dispatch_table.contains_key(message_type)
    }

    pub fn handles_type<M: Any>(&self) -> bool {
        self.handles(&MessageType::of::<M>())
    }

    /// Handlers for `message_type` in registration order.
    pub fn handlers_for(&self, message_type: &MessageType) -> &[ReactionHandler] {
        self.dispatch_table
            .get(message_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn message_types(&self) -> impl Iterator<Item = MessageType> + '_ {
        self.dispatch_table.keys().copied()
    }

    pub fn handler_count(&self) -> usize {
        self.handler_count
    }
}

/// Messages produced by the handlers of one message, in order.
///
/// Returned by [`Reactor::react_to_iter`].
#[derive(Debug)]
pub struct Reactions<'a> {
    message: Message,
    handlers: std::iter::Enumerate<std::slice::Iter<'a, ReactionHandler>>,
    pending: std::vec::IntoIter<Message>,
    failed: bool,
}

impl Iterator for Reactions<'_> {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(message) = self.pending.next() {
                return Some(Ok(message));
            }
            if self.failed {
                return None;
            }

            let (index, handler) = self.handlers.next()?;
            match handler.handle(&self.message) {
                Ok(messages) => self.pending = messages.into_iter(),
                Err(err) => {
                    warn!(
                        message_type = self.message.type_name(),
                        handler = index,
                        error = %err,
                        "Handler failed"
                    );
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

impl From<&Reaction> for Reactor {
    fn from(reaction: &Reaction) -> Self {
        Reactor::new(reaction)
    }
}

impl From<Reaction> for Reactor {
    fn from(reaction: Reaction) -> Self {
        Reactor::new(&reaction)
    }
}
