use reactor_core::ReactionError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Reaction(#[from] ReactionError),

    #[error("Dispatch budget of {limit} exhausted before the reaction settled")]
    BudgetExhausted { limit: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}
