//! Fantasy-league broadcast daemon.
//!
//! Consumes game-recap events from a message queue, keeps a durable
//! ledger of league statistical records, renders the accompanying
//! two-host narrative script to multi-voice SSML, and writes the
//! synthesized broadcast audio per week and episode.
//!
//! # Module map
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`config`] | Settings, TOML persistence, env overlay |
//! | [`recap`] | Inbound event schema and stat records |
//! | [`records`] | League record ledger (check-and-update + JSON document) |
//! | [`markup`] | Script → speaker-tagged SSML (pure) |
//! | [`synth`] | Speech-synthesis seam and audio artifact dispatch |
//! | [`pipeline`] | Per-message processing, the ack-or-nack result |
//! | [`broker`] | Connection lifecycle and the consumption loop |

pub mod broker;
pub mod config;
pub mod markup;
pub mod pipeline;
pub mod recap;
pub mod records;
pub mod synth;
