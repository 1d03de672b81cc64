use std::borrow::{Borrow, Cow};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifies one questionnaire item: a section letter plus an ordinal
/// (`"A1"`, `"C12"`). Opaque to everything except the questionnaire layout.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for QuestionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for QuestionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single answer as the UI stored it.
///
/// Choice questions store the localized option label, Likert questions store
/// the number as a string. Anything else that arrives through JSON is kept
/// so that it can be coerced (or rejected) at scoring time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum RawAnswer {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawAnswer {
    /// The string form used for matching against option labels.
    ///
    /// Returns `None` when the answer cannot be coerced: `null`, arrays and
    /// objects.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            RawAnswer::Text(s) => Some(Cow::Borrowed(s.as_str())),
            RawAnswer::Integer(n) => Some(Cow::Owned(n.to_string())),
            // Debug keeps the fractional part ("3.0"), so a float never
            // passes as a digit string.
            RawAnswer::Float(x) => Some(Cow::Owned(format!("{x:?}"))),
            RawAnswer::Bool(true) => Some(Cow::Borrowed("True")),
            RawAnswer::Bool(false) => Some(Cow::Borrowed("False")),
            RawAnswer::Null | RawAnswer::Other(_) => None,
        }
    }

    /// Whether the respondent actually picked something.
    pub fn is_blank(&self) -> bool {
        match self.as_text() {
            Some(text) => text.trim().is_empty(),
            None => true,
        }
    }
}

impl From<&str> for RawAnswer {
    fn from(s: &str) -> Self {
        RawAnswer::Text(s.to_string())
    }
}

impl From<String> for RawAnswer {
    fn from(s: String) -> Self {
        RawAnswer::Text(s)
    }
}

impl From<i64> for RawAnswer {
    fn from(n: i64) -> Self {
        RawAnswer::Integer(n)
    }
}

impl fmt::Display for RawAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawAnswer::Other(value) => write!(f, "{value}"),
            other => f.write_str(other.as_text().as_deref().unwrap_or("")),
        }
    }
}

/// Every answer one respondent gave, keyed by question.
///
/// Built page by page during a session, then borrowed immutably by the
/// scorer once the completeness gate passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerSet(BTreeMap<QuestionId, RawAnswer>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any earlier one for the same question.
    pub fn insert(&mut self, id: impl Into<QuestionId>, answer: impl Into<RawAnswer>) {
        self.0.insert(id.into(), answer.into());
    }

    pub fn get(&self, id: &str) -> Option<&RawAnswer> {
        self.0.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<RawAnswer> {
        self.0.remove(id)
    }

    /// True when the question has a non-blank answer.
    pub fn is_answered(&self, id: &str) -> bool {
        self.get(id).is_some_and(|answer| !answer.is_blank())
    }

    pub fn iter(&self) -> btree_map::Iter<'_, QuestionId, RawAnswer> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerSet
where
    K: Into<QuestionId>,
    V: Into<RawAnswer>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a AnswerSet {
    type Item = (&'a QuestionId, &'a RawAnswer);
    type IntoIter = btree_map::Iter<'a, QuestionId, RawAnswer>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
