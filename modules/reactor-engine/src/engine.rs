//! The settle loop.

use std::any::Any;
use std::collections::VecDeque;

use reactor_core::{Message, Reactor};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::observe::DispatchObserver;
use crate::types::{Dispatched, Settlement};

/// Feeds a reactor's output back into it until nothing is left.
///
/// React → record → enqueue children → repeat, breadth first.
/// Causal chaining is automatic: each child references its trigger's seq.
pub struct Engine<O = ()>
where
    O: DispatchObserver,
{
    reactor: Reactor,
    config: EngineConfig,
    observer: O,
}

impl Engine<()> {
    pub fn new(reactor: Reactor, config: EngineConfig) -> Self {
        Self {
            reactor,
            config,
            observer: (),
        }
    }
}

impl<O: DispatchObserver> Engine<O> {
    /// Replace the observer, keeping the reactor and config.
    pub fn with_observer<N: DispatchObserver>(self, observer: N) -> Engine<N> {
        Engine {
            reactor: self.reactor,
            config: self.config,
            observer,
        }
    }

    /// Dispatch `root` and every message produced downstream of it.
    ///
    /// Fails with `BudgetExhausted` once `max_dispatches` messages have been
    /// dispatched and more are still queued. A handler failure stops the
    /// settle immediately.
    pub fn settle(&self, root: Message) -> Result<Settlement> {
        let limit = self.config.max_dispatches;
        let mut queue: VecDeque<(Message, Option<u64>)> = VecDeque::new();
        queue.push_back((root, None));

        let mut dispatches: Vec<Dispatched> = Vec::new();
        let mut next_seq: u64 = 1;

        while let Some((message, caused_by)) = queue.pop_front() {
            if dispatches.len() >= limit {
                warn!(
                    limit,
                    queued = queue.len() + 1,
                    "Dispatch budget exhausted"
                );
                return Err(EngineError::BudgetExhausted { limit });
            }

            let seq = next_seq;
            next_seq += 1;

            // 1. React
            let children = self.reactor.react_to(&message)?;

            // 2. Record
            let dispatched = Dispatched {
                seq,
                caused_by,
                handled: self.reactor.handles(&message.message_type()),
                produced: children.len(),
                message,
            };
            self.observer.observe(&dispatched);
            dispatches.push(dispatched);

            // 3. Enqueue children (chained off this dispatch)
            for child in children {
                queue.push_back((child, Some(seq)));
            }
        }

        debug!(dispatches = dispatches.len(), "Reaction settled");
        Ok(Settlement::new(dispatches))
    }

    /// Wrap `value` and settle it.
    pub fn settle_value<T: Any + Send + Sync>(&self, value: T) -> Result<Settlement> {
        self.settle(Message::new(value))
    }

    pub fn reactor(&self) -> &Reactor {
        &self.reactor
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }
}
