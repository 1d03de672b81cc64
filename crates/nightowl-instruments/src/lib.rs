//! nightowl-instruments
//!
//! The chronotype survey instrument: option catalogs, answer normalization,
//! the scoring key, sub-scale ranges and the questionnaire layout. Pure data
//! and arithmetic with no file output.

pub mod aggregate;
pub mod catalog;
pub mod error;
pub mod normalize;
pub mod questionnaire;
pub mod scoring;

pub use aggregate::{aggregate, aggregate_detailed};
pub use catalog::OptionCatalog;
pub use normalize::normalize;
