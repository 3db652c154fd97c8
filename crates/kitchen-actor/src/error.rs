//! # Framework Errors
//!
//! Errors produced by the mailbox plumbing itself, plus a transparent wrapper around the
//! handler's own error so callers can still match on it.

/// Errors that can occur when talking to a [`MailboxActor`](crate::MailboxActor).
#[derive(Debug, thiserror::Error)]
pub enum ActorError<E: std::error::Error + 'static> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error(transparent)]
    Handler(E),
}

impl<E: std::error::Error + 'static> ActorError<E> {
    /// The handler's error, if the command reached the handler and was rejected there.
    pub fn into_handler_error(self) -> Option<E> {
        match self {
            ActorError::Handler(e) => Some(e),
            _ => None,
        }
    }
}
