use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::answer::AnswerSet;
use super::language::Language;
use super::score::ScoreResult;
use crate::columns;

/// One completed session, ready to be appended to the response sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Submission {
    pub session_id: Uuid,
    pub timestamp: jiff::Timestamp,
    pub language: Language,
    pub answers: AnswerSet,
    pub scores: ScoreResult,
}

impl Submission {
    /// Stamp a fresh session id and the current time onto a scored answer set.
    pub fn new(language: Language, answers: AnswerSet, scores: ScoreResult) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            timestamp: jiff::Timestamp::now(),
            language,
            answers,
            scores,
        }
    }

    pub fn with_session_id(mut self, session_id: Uuid) -> Self {
        self.session_id = session_id;
        self
    }

    /// The cell value for a named column, or `None` if this submission has
    /// nothing for it.
    pub fn cell(&self, column: &str) -> Option<String> {
        match column {
            columns::TIMESTAMP => Some(self.timestamp.to_string()),
            columns::SESSION_ID => Some(self.session_id.to_string()),
            columns::LANGUAGE => Some(self.language.code().to_string()),
            other => match other.parse() {
                Ok(metric) => Some(self.scores.get(metric).to_string()),
                Err(_) => self.answers.get(other).map(|a| a.to_string()),
            },
        }
    }

    /// Project this submission onto a header, one cell per column. Columns
    /// without a value become empty strings.
    pub fn to_row<S: AsRef<str>>(&self, header: &[S]) -> Vec<String> {
        header
            .iter()
            .map(|column| self.cell(column.as_ref()).unwrap_or_default())
            .collect()
    }
}
