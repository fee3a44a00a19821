//! Emergency triage and hospital-matching engine.
//!
//! Converts free-text symptoms (plus optional per-photo findings) into a
//! bounded `(triage level, urgency score)` classification, then ranks
//! candidate facilities against it with a weighted rule set. Classification
//! backends are pluggable: a remote AI provider and the deterministic
//! rule-based fallback satisfy the same contract, chained in priority order
//! so a classification is always produced.
//!
//! The crate is a pure library: screens, persistence, auth, and real
//! geolocation all live with the consuming application. Every function here
//! takes its inputs as arguments and returns a value — no ambient state.

pub mod classifier;
pub mod combiner;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod matching;
pub mod models;
pub mod photo;
pub mod pipeline;

pub use error::TriageError;
pub use pipeline::{assess_async, TriagePipeline};
