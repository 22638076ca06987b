//! Type-erased messages and the type key they dispatch on.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identifies the exact concrete type of a message.
///
/// Equality and hashing only look at the `TypeId`. The name is carried along
/// for logs and debug output.
#[derive(Clone, Copy)]
pub struct MessageType {
    id: TypeId,
    name: &'static str,
}

impl MessageType {
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for MessageType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MessageType {}

impl Hash for MessageType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MessageType").field(&self.name).finish()
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// An immutable, shareable message value of any `Send + Sync` type.
///
/// Cloning is cheap: clones point at the same value.
#[derive(Clone)]
pub struct Message {
    value: Arc<dyn Any + Send + Sync>,
    message_type: MessageType,
}

impl Message {
    /// Wrap a value. Wrapping a `Message` returns it as is, so the dispatch
    /// key is always the concrete type of the inner value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        let any: &dyn Any = &value;
        if let Some(message) = any.downcast_ref::<Message>() {
            return message.clone();
        }
        Self {
            value: Arc::new(value),
            message_type: MessageType::of::<T>(),
        }
    }

    /// Wrap an already shared value without copying it.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            value,
            message_type: MessageType::of::<T>(),
        }
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn type_name(&self) -> &'static str {
        self.message_type.name()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.message_type.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    /// True when both messages point at the same allocation.
    pub fn ptr_eq(&self, other: &Message) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Message").field(&self.message_type.name).finish()
    }
}
