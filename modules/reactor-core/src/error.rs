use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReactionError>;

#[derive(Debug, Error)]
pub enum ReactionError {
    #[error("Invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    /// A handler's own failure, passed through without added context.
    #[error(transparent)]
    Handler(anyhow::Error),
}

impl ReactionError {
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        ReactionError::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    /// Unwrap the handler's original error, if this is a handler failure.
    pub fn into_handler_error(self) -> Option<anyhow::Error> {
        match self {
            ReactionError::Handler(err) => Some(err),
            ReactionError::InvalidArgument { .. } => None,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ReactionError::InvalidArgument { .. })
    }
}
