//! # Kitchen Core
//!
//! A restaurant kitchen engine: ingredient stock with reservations, an order state machine
//! and the event pipeline that drives them.
//!
//! ## Layout
//!
//! - [`model`]: ids, orders, tables, menu items and requirement sets
//! - [`inventory`]: the [`IngredientStore`](inventory::IngredientStore), the only place stock moves
//! - [`reorder`] and [`statistics`]: views derived from stock movements
//! - [`staff`]: cooks, servers and managers
//! - [`restaurant`]: the session context, one method per event
//! - [`pipeline`]: typed events, batch replay and the mailbox handler
//! - [`clients`]: role facades over the pipeline actor
//! - [`lifecycle`]: starting and stopping a session, tracing setup
//! - [`notify`] and [`persistence`]: the outbound collaborators
//!
//! ## Orders
//!
//! An order reserves its full requirement set when placed, or nothing at all. Cooking commits
//! the reservation, cancelling releases it, and a return spawns a fresh replacement order with
//! its own reservation:
//!
//! ```text
//! ORDERED -> RECEIVED -> COOKED -> DELIVERED
//! ORDERED | RECEIVED | COOKED -> CANCELLED
//! DELIVERED -> CANCELLED          (return, plus a new ORDERED replacement)
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod inventory;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod persistence;
pub mod pipeline;
pub mod reorder;
pub mod restaurant;
pub mod staff;
pub mod statistics;
