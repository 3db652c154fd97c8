//! # Lifecycle
//!
//! Starts and stops a kitchen session.
//!
//! [`KitchenSystem`] builds a [`Restaurant`](crate::restaurant::Restaurant) from configuration,
//! spawns the [`EventPipeline`](crate::pipeline::EventPipeline) actor with the restaurant
//! injected as its context, and hands out role clients bound to staff ids.
//!
//! ```rust,ignore
//! let system = KitchenSystem::new(&config)?;
//! let server = system.server(StaffId(3))?;
//! let cook = system.cook(StaffId(1))?;
//!
//! let id = server.place_order(server.ticket("Burger", TableId(1), 1)).await?;
//! cook.receive(id).await?;
//! cook.cook(id).await?;
//! server.deliver(id).await?;
//!
//! system.shutdown().await?;
//! ```
//!
//! ## Shutdown
//!
//! The pipeline stops when every sender is gone. [`KitchenSystem::shutdown`] drops its own
//! client and awaits the actor task, so any role clients still alive elsewhere keep the
//! actor running until they are dropped too. Commands already queued are applied before the
//! actor exits.
//!
//! ## Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` filtered by `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run      # events, reorders, notifications
//! RUST_LOG=debug cargo run     # full event payloads
//! ```

pub mod kitchen_system;
pub mod tracing;

pub use self::kitchen_system::*;
pub use self::tracing::*;
