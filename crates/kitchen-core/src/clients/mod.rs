//! Role clients over the [`EventPipeline`](crate::pipeline::EventPipeline) mailbox.
//!
//! Each client carries the staff id of the person holding it, so callers only pass what
//! varies per call.

pub mod cook_client;
pub mod error;
pub mod manager_client;
pub mod server_client;

pub use cook_client::*;
pub use error::*;
pub use manager_client::*;
pub use server_client::*;
