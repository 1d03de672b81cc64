use std::path::PathBuf;

use nightowl_core::models::answer::QuestionId;
use nightowl_core::models::language::Language;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid option catalog: {}", describe_issues(.0))]
    Invalid(Vec<CatalogIssue>),
}

fn describe_issues(issues: &[CatalogIssue]) -> String {
    match issues.first() {
        Some(first) => format!("{} issue(s), first: {first}", issues.len()),
        None => "no issues recorded".to_string(),
    }
}

/// A single problem found while validating a catalog at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogIssue {
    #[error("no entries for the default language '{0}'")]
    MissingDefaultLanguage(Language),

    #[error("{language}/{question}: option {position} is empty")]
    EmptyLabel {
        language: Language,
        question: QuestionId,
        position: usize,
    },

    #[error("{language}/{question}: option '{label}' has surrounding whitespace")]
    UntrimmedLabel {
        language: Language,
        question: QuestionId,
        label: String,
    },

    #[error("{language}/{question}: option '{label}' appears more than once")]
    DuplicateLabel {
        language: Language,
        question: QuestionId,
        label: String,
    },

    #[error("{language}/{question}: {actual} options, default language has {expected}")]
    LengthMismatch {
        language: Language,
        question: QuestionId,
        expected: usize,
        actual: usize,
    },

    #[error("{language}/{question}: options defined but missing from the default language")]
    NotInDefault {
        language: Language,
        question: QuestionId,
    },
}
