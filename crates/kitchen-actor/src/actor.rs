//! # Mailbox Actor
//!
//! This module defines the `MailboxActor`, the server half of the framework. It owns a handler
//! and the receiving end of its mailbox, and applies requests strictly one at a time in the
//! order they arrive.

use crate::client::MailboxClient;
use crate::error::ActorError;
use crate::handler::ActorHandler;
use crate::message::MailboxRequest;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that drives an [`ActorHandler`].
///
/// # Architecture Note
/// Any number of cloned [`MailboxClient`]s may feed the same mailbox concurrently. The actor
/// still applies their requests sequentially, so two requests never interleave inside the
/// handler and the handler needs no lock of its own.
///
/// # Usage Pattern
///
/// 1.  **Create**: `MailboxActor::new(handler, buffer)` returns the actor and a client.
/// 2.  **Wire**: pass dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop; it ends when every client has been dropped.
///
/// ```rust
/// use kitchen_actor::{ActorHandler, MailboxActor};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("empty")]
/// struct Empty;
///
/// struct Tally(u32);
///
/// impl ActorHandler for Tally {
///     type Command = u32;
///     type Reply = u32;
///     type Query = ();
///     type View = u32;
///     type Context = ();
///     type Error = Empty;
///
///     fn handle(&mut self, n: u32, _: &()) -> Result<u32, Empty> {
///         self.0 += n;
///         Ok(self.0)
///     }
///     fn query(&self, _: (), _: &()) -> u32 {
///         self.0
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = MailboxActor::new(Tally(0), 10);
///     let handle = tokio::spawn(actor.run(()));
///
///     assert_eq!(client.send(2).await.unwrap(), 2);
///     assert_eq!(client.query(()).await.unwrap(), 2);
///
///     drop(client);
///     let tally = handle.await.unwrap();
///     assert_eq!(tally.0, 2);
/// }
/// ```
pub struct MailboxActor<H: ActorHandler> {
    receiver: mpsc::Receiver<MailboxRequest<H>>,
    handler: H,
    accepted: u64,
    rejected: u64,
}

impl<H: ActorHandler> MailboxActor<H> {
    /// Creates a new `MailboxActor` and its associated `MailboxClient`.
    ///
    /// # Arguments
    ///
    /// * `handler` - The business logic the actor drives.
    /// * `buffer_size` - The capacity of the mailbox. When it is full, senders wait.
    pub fn new(handler: H, buffer_size: usize) -> (Self, MailboxClient<H>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            handler,
            accepted: 0,
            rejected: 0,
        };
        (actor, MailboxClient::new(sender))
    }

    /// Runs the actor's loop until the mailbox closes, then hands the handler back.
    ///
    /// # Context Injection
    /// The `context` is passed to every hook. Dependencies created after the actor (e.g.,
    /// shared state or other clients) are wired here rather than in `new()`.
    pub async fn run(mut self, context: H::Context) -> H {
        let handler_type = std::any::type_name::<H>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(handler_type, "Actor started");
        self.handler.on_start(&context);

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                MailboxRequest::Command {
                    command,
                    respond_to,
                } => {
                    debug!(handler_type, ?command, "Command");
                    let result = self
                        .handler
                        .handle(command, &context)
                        .map_err(ActorError::Handler);
                    match &result {
                        Ok(reply) => {
                            self.accepted += 1;
                            debug!(handler_type, ?reply, "Command ok");
                        }
                        Err(e) => {
                            self.rejected += 1;
                            warn!(handler_type, error = %e, "Command rejected");
                        }
                    }
                    let _ = respond_to.send(result);
                }
                MailboxRequest::Query { query, respond_to } => {
                    debug!(handler_type, ?query, "Query");
                    let _ = respond_to.send(Ok(self.handler.query(query, &context)));
                }
            }
        }

        self.handler.on_stop(&context);
        info!(
            handler_type,
            accepted = self.accepted,
            rejected = self.rejected,
            "Shutdown"
        );
        self.handler
    }
}
