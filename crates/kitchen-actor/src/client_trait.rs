//! # ActorClient Trait
//!
//! Provides a common interface for role-specific clients, adding default `send` and `query`
//! methods on top of a generic `MailboxClient` and mapping framework errors into the client's
//! own error type.
use crate::{ActorError, ActorHandler, MailboxClient};
use async_trait::async_trait;

/// Trait for domain-specific clients that wrap a [`MailboxClient`].
///
/// # Example
///
/// ```rust
/// use kitchen_actor::{ActorClient, ActorError, ActorHandler, MailboxClient};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("rejected")]
/// struct Rejected;
///
/// struct Bell;
/// impl ActorHandler for Bell {
///     type Command = ();
///     type Reply = ();
///     type Query = ();
///     type View = ();
///     type Context = ();
///     type Error = Rejected;
///     fn handle(&mut self, _: (), _: &()) -> Result<(), Rejected> { Ok(()) }
///     fn query(&self, _: (), _: &()) {}
/// }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("bell unavailable: {0}")]
/// struct BellError(String);
///
/// struct BellClient {
///     inner: MailboxClient<Bell>,
/// }
///
/// impl ActorClient<Bell> for BellClient {
///     type Error = BellError;
///
///     fn inner(&self) -> &MailboxClient<Bell> {
///         &self.inner
///     }
///
///     fn map_error(e: ActorError<Rejected>) -> Self::Error {
///         BellError(e.to_string())
///     }
/// }
///
/// async fn ring(client: BellClient) -> Result<(), BellError> {
///     // send() and query() are provided
///     client.send(()).await
/// }
/// ```
#[async_trait]
pub trait ActorClient<H: ActorHandler>: Send + Sync {
    /// The client-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &MailboxClient<H>;

    /// Map framework errors to the client's error type.
    fn map_error(e: ActorError<H::Error>) -> Self::Error;

    /// Send a command through the mailbox.
    #[tracing::instrument(skip(self))]
    async fn send(&self, command: H::Command) -> Result<H::Reply, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().send(command).await.map_err(Self::map_error)
    }

    /// Ask a read-only question.
    #[tracing::instrument(skip(self))]
    async fn query(&self, query: H::Query) -> Result<H::View, Self::Error> {
        tracing::debug!("Sending query");
        self.inner().query(query).await.map_err(Self::map_error)
    }
}
