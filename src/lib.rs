//! Core library for the LexiLearn reading tutor.
//!
//! This crate holds the pure computation the backend is built around:
//! scoring a spoken transcript against a lesson's reference text and
//! estimating reading speed. It performs no I/O and keeps no state, so
//! the HTTP layer (`lexilearn-server`) can call it from any number of
//! request handlers without coordination.

pub mod fluency;
pub mod scorer;

pub use fluency::estimate_wpm;
pub use scorer::{recommendation_for, score, ScoreResult, MAX_ERROR_WORDS};
