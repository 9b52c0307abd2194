//! Derived-field evaluation and validation engine.
//!
//! Pure functions over a borrowed field list and value map: the engine
//! never mutates store state, it returns fresh value/error maps for the
//! caller to apply.

pub mod derive;
pub mod engine;

pub use derive::{ERROR_VALUE, PLACEHOLDER_VALUE};
pub use engine::{check_submission, evaluate, seed_defaults, Evaluation};
