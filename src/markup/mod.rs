//! Script-to-markup transformer.
//!
//! Turns a two-host narrative script into the speaker-annotated SSML
//! document the synthesis capability consumes. Pure and deterministic —
//! identical input always yields identical markup, and a malformed script
//! still produces output (unknown lines fall back to the primary voice).
//!
//! # Quick start
//!
//! ```rust
//! use fantasy_broadcaster::config::VoiceConfig;
//! use fantasy_broadcaster::markup::to_ssml;
//!
//! let script = "[MATT]: Welcome to Week 7!\n[JOSE]: Let's go Matt!";
//! let ssml = to_ssml(script, &VoiceConfig::default());
//! assert!(ssml.starts_with("<speak"));
//! ```

pub mod speaker;
pub mod ssml;

pub use speaker::{classify_line, ScriptLine, Speaker, PRIMARY_TAG, SECONDARY_TAG};
pub use ssml::to_ssml;
