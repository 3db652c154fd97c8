use crate::error::EngineError;
use crate::pipeline::{EventOutcome, KitchenView};
use kitchen_actor::ActorError;
use thiserror::Error;

/// Errors surfaced by the role clients.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Rejected(EngineError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),
}

impl ClientError {
    /// The engine's reason, if the event reached the pipeline and was refused there.
    pub fn rejection(&self) -> Option<&EngineError> {
        match self {
            ClientError::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ActorError<EngineError>> for ClientError {
    fn from(e: ActorError<EngineError>) -> Self {
        match e {
            ActorError::Handler(err) => ClientError::Rejected(err),
            other => ClientError::ActorCommunicationError(other.to_string()),
        }
    }
}

pub(crate) fn unexpected_outcome(outcome: EventOutcome) -> ClientError {
    ClientError::UnexpectedReply(format!("{outcome:?}"))
}

pub(crate) fn unexpected_view(view: KitchenView) -> ClientError {
    ClientError::UnexpectedReply(format!("{view:?}"))
}
