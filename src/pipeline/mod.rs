//! Per-message processing pipeline.
//!
//! # Pipeline flow
//!
//! ```text
//! payload bytes
//!   └─▶ deserialize GameRecapEvent        (tolerant of missing fields)
//!         └─▶ ledger.check_and_update     (home + away, one lock hold)
//!               └─▶ script present?
//!                     ├─ yes → to_ssml → dispatcher.synthesize
//!                     └─ no  → skip synthesis
//!   ⇒ Ok(ProcessSummary)  — consumer acks
//!   ⇒ Err(ProcessError)   — consumer nacks for redelivery
//! ```
//!
//! The pipeline returns an explicit result instead of throwing through the
//! handler, so the "ack only on full success" contract is enforced by the
//! type at a single decision point in the consumer.

pub mod processor;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use processor::{ProcessError, ProcessSummary, RecapProcessor, SharedLedger};
