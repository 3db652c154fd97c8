//! Subscriber setup for binaries and demos.
//!
//! Every event is applied inside an `event` span carrying its kind, so with the compact
//! format a rejection reads like:
//!
//! ```text
//! WARN event{kind="cook"}: Event rejected error=Insufficient stock of Patty: requested 1, available 0
//! ```

/// Installs the global subscriber. Call once per process.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
