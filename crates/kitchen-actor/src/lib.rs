//! # Kitchen Actor
//!
//! This crate provides the mailbox plumbing the kitchen simulation is built on: a single
//! long-lived task owns a piece of business logic (an [`ActorHandler`]) and applies the
//! requests it receives strictly one at a time, while any number of cloned clients feed it
//! from anywhere in the program.
//!
//! ## Why a Mailbox?
//!
//! - **Ordering**: every request lands in one queue, so "what happened first" has a single answer
//! - **Isolation**: the handler's own state is touched only by its task, no lock needed
//! - **Back-pressure**: a bounded channel makes senders wait when the handler falls behind
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model) - Foundational concurrency pattern by Carl Hewitt
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Logic Layer** ([`ActorHandler`]) - Your commands, queries and their effects
//! 2. **Runtime Layer** ([`MailboxActor`]) - Message processing and sequencing
//! 3. **Interface Layer** ([`MailboxClient`], [`ActorClient`]) - Type-safe communication
//!
//! ## Example
//!
//! ```rust
//! use kitchen_actor::{ActorHandler, MailboxActor};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("pass is empty")]
//! struct EmptyPass;
//!
//! #[derive(Debug)]
//! enum PassCommand {
//!     Plate(&'static str),
//!     Pickup,
//! }
//!
//! #[derive(Default)]
//! struct Pass {
//!     plates: Vec<&'static str>,
//! }
//!
//! impl ActorHandler for Pass {
//!     type Command = PassCommand;
//!     type Reply = Option<&'static str>;
//!     type Query = ();
//!     type View = usize;
//!     type Context = ();
//!     type Error = EmptyPass;
//!
//!     fn handle(&mut self, command: PassCommand, _: &()) -> Result<Self::Reply, EmptyPass> {
//!         match command {
//!             PassCommand::Plate(dish) => {
//!                 self.plates.push(dish);
//!                 Ok(None)
//!             }
//!             PassCommand::Pickup => self.plates.pop().map(Some).ok_or(EmptyPass),
//!         }
//!     }
//!
//!     fn query(&self, _: (), _: &()) -> usize {
//!         self.plates.len()
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = MailboxActor::new(Pass::default(), 10);
//!     tokio::spawn(actor.run(()));
//!
//!     client.send(PassCommand::Plate("Burger")).await.unwrap();
//!     assert_eq!(client.send(PassCommand::Pickup).await.unwrap(), Some("Burger"));
//!     assert!(client.send(PassCommand::Pickup).await.is_err());
//!     assert_eq!(client.query(()).await.unwrap(), 0);
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via the `run()` method, not at construction time.
//! A handler that needs shared state declares it as its `Context` and receives a reference to it
//! on every call, which keeps the handler itself free of `Arc` plumbing.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Requests are processed **sequentially** within an actor
//! - A rejected command is reported to its sender only; the loop keeps running
//! - The loop ends when the last client is dropped, returning the handler to whoever awaited it
//!
//! ## Testing
//!
//! The [`mock`] module provides a `MockClient` that hands out a real [`MailboxClient`] backed by
//! scripted replies, so client-side logic can be tested without a running handler.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod handler;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::MailboxActor;
pub use client::MailboxClient;
pub use client_trait::ActorClient;
pub use error::ActorError;
pub use handler::ActorHandler;
pub use message::{MailboxRequest, Response};
