//! nightowl-storage
//!
//! Append-only response sheet. One row per completed session, written to a
//! CSV file (or kept in memory for tests).

pub mod csv_store;
pub mod error;
pub mod layout;
pub mod memory;
pub mod submit;
pub mod table;
