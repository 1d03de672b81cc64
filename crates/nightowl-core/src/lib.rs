//! nightowl-core
//!
//! Pure domain types and column naming conventions.
//! No I/O. This is the shared vocabulary of the Nightowl survey.

pub mod columns;
pub mod error;
pub mod models;
