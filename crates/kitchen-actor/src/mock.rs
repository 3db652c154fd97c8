//! # Mock Mailbox & Testing Guide
//!
//! `MockClient<H>` hands out a real [`MailboxClient<H>`] whose requests are answered from a
//! queue of scripted expectations instead of a running handler. Use it to test the logic that
//! sits *around* a client (argument mapping, reply decoding, error mapping) without building the
//! state the real handler would need.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler |
//! | **State** | No real state (expectations) | Real state management |
//! | **Use Case** | Unit testing logic *around* the client | Testing the handler or full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires specific state) |
//!
//! ## Example
//!
//! ```rust
//! use kitchen_actor::mock::MockClient;
//! use kitchen_actor::{ActorError, ActorHandler};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("out of stock")]
//! struct OutOfStock;
//!
//! struct Shelf;
//! impl ActorHandler for Shelf {
//!     type Command = u32;
//!     type Reply = u32;
//!     type Query = ();
//!     type View = u32;
//!     type Context = ();
//!     type Error = OutOfStock;
//!     fn handle(&mut self, n: u32, _: &()) -> Result<u32, OutOfStock> { Ok(n) }
//!     fn query(&self, _: (), _: &()) -> u32 { 0 }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Shelf>::new();
//!     mock.expect_command().return_ok(7);
//!     mock.expect_command().return_err(ActorError::Handler(OutOfStock));
//!
//!     let client = mock.client();
//!     assert_eq!(client.send(1).await.unwrap(), 7);
//!     assert!(matches!(client.send(1).await, Err(ActorError::Handler(OutOfStock))));
//!     mock.verify();
//! }
//! ```
//!
//! ## Lower-level helpers
//!
//! [`create_mock_client`] returns a client plus the raw receiver; [`expect_command`] and
//! [`expect_query`] pop the next request so a test can assert on its payload before replying.

use crate::client::MailboxClient;
use crate::error::ActorError;
use crate::handler::ActorHandler;
use crate::message::{MailboxRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<H: ActorHandler> {
    Command {
        response: Result<H::Reply, ActorError<H::Error>>,
    },
    Query {
        response: Result<H::View, ActorError<H::Error>>,
    },
}

type Expectations<H> = Arc<Mutex<VecDeque<Expectation<H>>>>;

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<H: ActorHandler> {
    client: MailboxClient<H>,
    expectations: Expectations<H>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<H: ActorHandler> Default for MockClient<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ActorHandler> MockClient<H> {
    /// Creates a new mock client with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<MailboxRequest<H>>(100);
        let expectations: Expectations<H> = Arc::new(Mutex::new(VecDeque::new()));
        let scripted = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = scripted
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();

                match (request, expectation) {
                    (
                        MailboxRequest::Command { respond_to, .. },
                        Some(Expectation::Command { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        MailboxRequest::Query { respond_to, .. },
                        Some(Expectation::Query { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: MailboxClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> MailboxClient<H> {
        self.client.clone()
    }

    /// Expects a command.
    pub fn expect_command(&mut self) -> CommandExpectationBuilder<H> {
        CommandExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a query.
    pub fn expect_query(&mut self) -> QueryExpectationBuilder<H> {
        QueryExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder for command expectations.
pub struct CommandExpectationBuilder<H: ActorHandler> {
    expectations: Expectations<H>,
}

impl<H: ActorHandler> CommandExpectationBuilder<H> {
    /// Answer the next command with a reply.
    pub fn return_ok(self, reply: H::Reply) {
        self.push(Ok(reply));
    }

    /// Answer the next command with an error.
    pub fn return_err(self, error: ActorError<H::Error>) {
        self.push(Err(error));
    }

    fn push(self, response: Result<H::Reply, ActorError<H::Error>>) {
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Expectation::Command { response });
    }
}

/// Builder for query expectations.
pub struct QueryExpectationBuilder<H: ActorHandler> {
    expectations: Expectations<H>,
}

impl<H: ActorHandler> QueryExpectationBuilder<H> {
    /// Answer the next query with a view.
    pub fn return_ok(self, view: H::View) {
        self.push(Ok(view));
    }

    /// Answer the next query with an error.
    pub fn return_err(self, error: ActorError<H::Error>) {
        self.push(Err(error));
    }

    fn push(self, response: Result<H::View, ActorError<H::Error>>) {
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Expectation::Query { response });
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests land on.
pub fn create_mock_client<H: ActorHandler>(
    buffer_size: usize,
) -> (MailboxClient<H>, mpsc::Receiver<MailboxRequest<H>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MailboxClient::new(sender), receiver)
}

/// Pops the next request if it is a command.
pub async fn expect_command<H: ActorHandler>(
    receiver: &mut mpsc::Receiver<MailboxRequest<H>>,
) -> Option<(H::Command, Response<H::Reply, H::Error>)> {
    match receiver.recv().await {
        Some(MailboxRequest::Command {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}

/// Pops the next request if it is a query.
pub async fn expect_query<H: ActorHandler>(
    receiver: &mut mpsc::Receiver<MailboxRequest<H>>,
) -> Option<(H::Query, Response<H::View, H::Error>)> {
    match receiver.recv().await {
        Some(MailboxRequest::Query { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}
