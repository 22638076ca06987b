use std::env;

use crate::error::{EngineError, Result};

pub const DEFAULT_MAX_DISPATCHES: usize = 1024;

/// Engine limits, loadable from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Upper bound on dispatches in a single settle, root included.
    pub max_dispatches: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_dispatches: DEFAULT_MAX_DISPATCHES,
        }
    }
}

impl EngineConfig {
    /// Load from `REACTOR_MAX_DISPATCHES`, falling back to the default when unset.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let max_dispatches = match lookup("REACTOR_MAX_DISPATCHES") {
            Some(raw) => parse_max_dispatches(&raw)?,
            None => DEFAULT_MAX_DISPATCHES,
        };
        Ok(Self { max_dispatches })
    }

    pub fn with_max_dispatches(mut self, max_dispatches: usize) -> Self {
        self.max_dispatches = max_dispatches;
        self
    }
}

fn parse_max_dispatches(raw: &str) -> Result<usize> {
    let value: usize = raw.trim().parse().map_err(|_| {
        EngineError::Config(format!(
            "REACTOR_MAX_DISPATCHES must be a positive integer, got {raw:?}"
        ))
    })?;
    if value == 0 {
        return Err(EngineError::Config(
            "REACTOR_MAX_DISPATCHES must be at least 1".to_string(),
        ));
    }
    Ok(value)
}
