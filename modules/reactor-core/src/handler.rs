//! A single binding from a message type to the function reacting to it.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use anyhow::anyhow;

use crate::error::{ReactionError, Result};
use crate::message::{Message, MessageType};

/// The one calling convention every handler is normalized to.
pub type HandlerFn = Arc<dyn Fn(&Message) -> anyhow::Result<Vec<Message>> + Send + Sync>;

/// Pairs a message type with the function that reacts to it.
///
/// Immutable. Clones share the same function.
#[derive(Clone)]
pub struct ReactionHandler {
    message_type: MessageType,
    handler: HandlerFn,
}

impl ReactionHandler {
    pub fn new(message_type: MessageType, handler: HandlerFn) -> Self {
        Self {
            message_type,
            handler,
        }
    }

    /// Build a handler for `M` from a function over the concrete type.
    pub fn of<M, F>(handler: F) -> Self
    where
        M: Any,
        F: Fn(&M) -> anyhow::Result<Vec<Message>> + Send + Sync + 'static,
    {
        let message_type = MessageType::of::<M>();
        Self::new(
            message_type,
            Arc::new(move |message: &Message| match message.downcast_ref::<M>() {
                Some(typed) => handler(typed),
                None => Err(anyhow!(
                    "handler for `{}` invoked with `{}`",
                    message_type,
                    message.type_name()
                )),
            }),
        )
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn handler(&self) -> &HandlerFn {
        &self.handler
    }

    /// Invoke the handler. The message must be of exactly `message_type`.
    pub fn handle(&self, message: &Message) -> Result<Vec<Message>> {
        if message.message_type() != self.message_type {
            return Err(ReactionError::invalid_argument(
                "message",
                format!(
                    "handler for `{}` cannot handle `{}`",
                    self.message_type,
                    message.type_name()
                ),
            ));
        }
        (self.handler)(message).map_err(ReactionError::Handler)
    }
}

impl fmt::Debug for ReactionHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionHandler")
            .field("message_type", &self.message_type)
            .finish_non_exhaustive()
    }
}
