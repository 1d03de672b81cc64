//! Response sheet column conventions.
//!
//! Pure string functions. Every sheet starts with the metadata columns, then
//! one column per question, then one column per metric.

use crate::models::answer::QuestionId;
use crate::models::score::Metric;

pub const TIMESTAMP: &str = "timestamp";

pub const SESSION_ID: &str = "session_id";

pub const LANGUAGE: &str = "language";

pub const METADATA: [&str; 3] = [TIMESTAMP, SESSION_ID, LANGUAGE];

/// Full header for a sheet that can hold every question of the instrument.
pub fn header<'a>(questions: impl IntoIterator<Item = &'a QuestionId>) -> Vec<String> {
    METADATA
        .iter()
        .map(|c| c.to_string())
        .chain(questions.into_iter().map(|q| q.to_string()))
        .chain(Metric::ALL.iter().map(|m| m.column().to_string()))
        .collect()
}

pub fn is_metadata(column: &str) -> bool {
    METADATA.contains(&column)
}
