//! Accumulating a handler's output messages.

use std::any::Any;

use crate::message::Message;

/// Immutable accumulator for the messages a handler returns.
///
/// Each `compose*` call takes the composer by value and hands back the result,
/// either with the messages appended or unchanged when the condition says so.
///
/// ```ignore
/// ReactionBuilder::new().when_many(|order: &OrderPlaced| {
///     ReactionComposer::new()
///         .compose(ReserveStock { sku: order.sku })
///         .compose_if(order.express, ScheduleCourier { id: order.id })
///         .compose_unless(order.paid, RequestPayment { id: order.id })
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReactionComposer {
    messages: Vec<Message>,
}

impl ReactionComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message. Collections are appended as a single message of
    /// the collection type; use [`compose_all`](Self::compose_all) to append
    /// their elements.
    pub fn compose<T: Any + Send + Sync>(mut self, message: T) -> Self {
        self.messages.push(Message::new(message));
        self
    }

    /// Append every message, in iteration order.
    pub fn compose_all<I>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = Message>,
    {
        self.messages.extend(messages);
        self
    }

    pub fn compose_if<T: Any + Send + Sync>(self, condition: bool, message: T) -> Self {
        if condition {
            self.compose(message)
        } else {
            self
        }
    }

    pub fn compose_all_if<I>(self, condition: bool, messages: I) -> Self
    where
        I: IntoIterator<Item = Message>,
    {
        if condition {
            self.compose_all(messages)
        } else {
            self
        }
    }

    pub fn compose_unless<T: Any + Send + Sync>(self, condition: bool, message: T) -> Self {
        self.compose_if(!condition, message)
    }

    pub fn compose_all_unless<I>(self, condition: bool, messages: I) -> Self
    where
        I: IntoIterator<Item = Message>,
    {
        self.compose_all_if(!condition, messages)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl AsRef<[Message]> for ReactionComposer {
    fn as_ref(&self) -> &[Message] {
        &self.messages
    }
}

impl From<ReactionComposer> for Vec<Message> {
    fn from(composer: ReactionComposer) -> Self {
        composer.messages
    }
}

impl FromIterator<Message> for ReactionComposer {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ReactionComposer {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReactionComposer {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
