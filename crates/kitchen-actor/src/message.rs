//! # Mailbox Messages
//!
//! This module defines the message types carried from a [`MailboxClient`](crate::MailboxClient)
//! to a [`MailboxActor`](crate::MailboxActor).

use crate::error::ActorError;
use crate::handler::ActorHandler;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T, E> = oneshot::Sender<Result<T, ActorError<E>>>;

/// Internal message type sent to the actor.
///
/// Every request carries its own reply channel, so the caller awaits exactly the answer to the
/// request it sent, regardless of how many other clients share the mailbox.
pub enum MailboxRequest<H: ActorHandler> {
    Command {
        command: H::Command,
        respond_to: Response<H::Reply, H::Error>,
    },
    Query {
        query: H::Query,
        respond_to: Response<H::View, H::Error>,
    },
}

impl<H: ActorHandler> std::fmt::Debug for MailboxRequest<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MailboxRequest::Command { command, .. } => {
                f.debug_struct("Command").field("command", command).finish()
            }
            MailboxRequest::Query { query, .. } => {
                f.debug_struct("Query").field("query", query).finish()
            }
        }
    }
}
