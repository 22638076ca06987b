//! Settle loop over a [`Reactor`](reactor_core::Reactor).
//!
//! React → record → enqueue children → repeat until no messages remain.
//! Every dispatch is journaled with a causal link to the message that
//! produced it, so a settled chain can be inspected after the fact.
//!
//! Consumers observe dispatches as they happen by implementing
//! `DispatchObserver`, or read the returned `Settlement`.

pub mod config;
pub mod engine;
pub mod error;
pub mod observe;
pub mod types;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use observe::{DispatchObserver, MemoryObserver};
pub use types::{Dispatched, Settlement};
