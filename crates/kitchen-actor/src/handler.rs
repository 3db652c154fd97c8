//! # ActorHandler Trait
//!
//! The `ActorHandler` trait is the contract a piece of business logic implements to be driven
//! by a [`MailboxActor`](crate::MailboxActor). It names the command and query types the
//! mailbox accepts, the reply and view types it produces, the context injected at `run()` time,
//! and the error type a rejected command carries back to the caller.
//!
//! # Architecture Note
//! The mailbox loop is written once and reused for any handler. Associated types keep it type
//! safe: a handler for kitchen events can only be sent kitchen events, and its callers get back
//! that handler's own error enum instead of a stringly-typed failure.
//!
//! # Commands vs Queries
//! - **Commands** may mutate state and may be rejected (`Result<Reply, Error>`).
//! - **Queries** are read-only and always answer with a `View`.
//!
//! Both travel through the same mailbox, so a query observes every command sent before it.
//!
//! # Provided Methods (Hooks)
//! - [`ActorHandler::on_start`]
//! - [`ActorHandler::on_stop`]
//!
//! Both default to doing nothing.

use std::fmt::Debug;

/// Business logic driven by a [`MailboxActor`](crate::MailboxActor).
///
/// Hooks are synchronous. A handler runs inside the mailbox task and must not block it on I/O;
/// anything slow belongs to a collaborator reached through the `Context`.
pub trait ActorHandler: Send + 'static {
    /// A state-changing request (e.g., an event to apply).
    type Command: Send + Debug + 'static;

    /// The value returned for an accepted command.
    type Reply: Send + Debug + 'static;

    /// A read-only request.
    type Query: Send + Debug + 'static;

    /// The answer to a query.
    type View: Send + 'static;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync + 'static;

    /// The error returned for a rejected command.
    ///
    /// # Design Note: Error Granularity
    ///
    /// One error enum per handler rather than one per command. Callers match on a single type;
    /// the trade-off is that every command's signature admits every variant.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Called once before the first message is processed.
    fn on_start(&mut self, _ctx: &Self::Context) {}

    /// Apply a command. A rejected command must leave the handler's state as it found it.
    fn handle(
        &mut self,
        command: Self::Command,
        ctx: &Self::Context,
    ) -> Result<Self::Reply, Self::Error>;

    /// Answer a read-only query.
    fn query(&self, query: Self::Query, ctx: &Self::Context) -> Self::View;

    /// Called once after the mailbox closes.
    fn on_stop(&mut self, _ctx: &Self::Context) {}
}
