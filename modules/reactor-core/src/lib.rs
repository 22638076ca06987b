//! Type-driven message reactions.
//!
//! Handlers are registered against the exact concrete type of a message.
//! A [`Reactor`] routes each incoming [`Message`] to every handler registered
//! for its type and returns the messages they produce, ready to be fed into
//! the next reaction.
//!
//! Build a [`Reaction`] with [`ReactionBuilder`], compile it into a
//! [`Reactor`], and use [`ReactionComposer`] inside handler bodies to assemble
//! conditional output.

pub mod builder;
pub mod composer;
pub mod error;
pub mod handler;
pub mod message;
pub mod reaction;
pub mod reactor;

pub use builder::ReactionBuilder;
pub use composer::ReactionComposer;
pub use error::{ReactionError, Result};
pub use handler::{HandlerFn, ReactionHandler};
pub use message::{Message, MessageType};
pub use reaction::Reaction;
pub use reactor::{Reactions, Reactor};
