//! League record ledger.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  RecordLedger                        │
//! │                                                     │
//! │   ┌──────────────┐      ┌──────────────────────┐    │
//! │   │ LeagueRecords │◀────│ check_and_update()    │    │
//! │   │ 10 categories │      │ fixed-order compares │    │
//! │   └──────┬───────┘      └──────────┬───────────┘    │
//! │          │ save (full rewrite)     │ announcements   │
//! │          ▼                         ▼                 │
//! │   league_records.json        Vec<String>             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger is the only shared mutable state in the system. Callers hold
//! it behind `Arc<tokio::sync::Mutex<RecordLedger>>` and keep the lock for
//! the entire check-compare-update-persist sequence of one event.

pub mod book;
pub mod ledger;

pub use book::{LeagueRecords, RecordEntry, LOWEST_SCORE_SENTINEL};
pub use ledger::{LedgerError, RecordLedger};
