//! Broker connectivity and the recap consumption loop.
//!
//! # Architecture
//!
//! ```text
//! ConnectionManager::connect()          RecapConsumer::run()
//!   Disconnected → Connecting             Connected → Consuming
//!     │  bounded retry (5 × 3 s)            │ delivery stream
//!     ├─ ok → Connected                     ├─ spawn handler task per delivery
//!     │        queue declare + basic.qos    │     process → ack | nack(requeue)
//!     └─ exhausted → Failed (fatal)         └─ shutdown signal → drain in-flight
//! ```
//!
//! The consumer never lets one message's failure crash the loop: every
//! delivery ends in exactly one explicit ack-or-nack decision driven by
//! the typed result of [`RecapProcessor::process`].
//!
//! [`RecapProcessor::process`]: crate::pipeline::RecapProcessor::process

pub mod connection;
pub mod consumer;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use connection::{BrokerError, ConnectionManager, ConnectionState};
pub use consumer::RecapConsumer;
