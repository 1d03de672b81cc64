use nightowl_core::columns;
use nightowl_core::models::answer::QuestionId;

/// Column order of a response sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    columns: Vec<String>,
}

impl ColumnLayout {
    /// Metadata, then `questions` in the given order, then the metrics.
    pub fn new<'a>(questions: impl IntoIterator<Item = &'a QuestionId>) -> Self {
        Self {
            columns: columns::header(questions),
        }
    }

    /// Adopt the header an existing sheet already has.
    pub fn from_header(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
