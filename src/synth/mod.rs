//! Speech-synthesis module.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │              SpeechSynthesizer (trait)                │
//! │                                                      │
//! │   ┌──────────────────┐     ┌─────────────────────┐   │
//! │   │ AzureSynthesizer  │     │ SynthesisDispatcher │   │
//! │   │ - REST endpoint   │◀────│ - Week_<n>/ paths   │   │
//! │   │ - key / region    │     │ - writes .wav       │   │
//! │   └──────────────────┘     └─────────────────────┘   │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! [`SpeechSynthesizer`] is the seam to the external capability: submit
//! markup, get audio bytes or a failure. [`AzureSynthesizer`] is the
//! production implementation; [`MockSynthesizer`] (test-only) lets the
//! pipeline be exercised without a speech endpoint.
//!
//! [`SynthesisDispatcher`] owns the artifact side: it derives the
//! per-week output path, invokes the synthesizer, and writes the bytes.

pub mod dispatcher;
pub mod engine;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use dispatcher::SynthesisDispatcher;
pub use engine::{AzureSynthesizer, SpeechSynthesizer, SynthError};

// test-only re-export so the pipeline test module can import MockSynthesizer
// without `use fantasy_broadcaster::synth::engine::MockSynthesizer`.
#[cfg(test)]
pub use engine::MockSynthesizer;
