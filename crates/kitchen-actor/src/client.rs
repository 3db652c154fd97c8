//! # Mailbox Client
//!
//! The sending half of a mailbox: a cheap, cloneable handle that turns method calls into
//! [`MailboxRequest`]s and awaits their replies.

use crate::error::ActorError;
use crate::handler::ActorHandler;
use crate::message::MailboxRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a [`MailboxActor`](crate::MailboxActor).
///
/// * **Cloneable**: holds only a sender, so every logical caller can own one.
/// * **Async API**: each call resolves to `Result<_, ActorError<H::Error>>`.
pub struct MailboxClient<H: ActorHandler> {
    sender: mpsc::Sender<MailboxRequest<H>>,
}

impl<H: ActorHandler> Clone for MailboxClient<H> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<H: ActorHandler> MailboxClient<H> {
    pub fn new(sender: mpsc::Sender<MailboxRequest<H>>) -> Self {
        Self { sender }
    }

    /// Sends a command and waits for the handler's verdict.
    pub async fn send(&self, command: H::Command) -> Result<H::Reply, ActorError<H::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(MailboxRequest::Command {
                command,
                respond_to,
            })
            .await
            .map_err(|_| ActorError::ActorClosed)?;
        response.await.map_err(|_| ActorError::ActorDropped)?
    }

    /// Sends a read-only query.
    pub async fn query(&self, query: H::Query) -> Result<H::View, ActorError<H::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(MailboxRequest::Query { query, respond_to })
            .await
            .map_err(|_| ActorError::ActorClosed)?;
        response.await.map_err(|_| ActorError::ActorDropped)?
    }

    /// True once the actor has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
