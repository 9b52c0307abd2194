//! Core types and validation rules for the forma form builder.
//!
//! This crate holds the domain model shared by the engine, the store and
//! the CLI: field definitions, validation rules, saved schemas, and the
//! value/error maps exchanged with the evaluation engine.

pub mod enums;
pub mod field;
pub mod idgen;
pub mod rule;
pub mod schema;
pub mod validation;
pub mod value;
