use nightowl_core::columns;
use nightowl_core::models::submission::Submission;
use serde::Serialize;

use crate::error::StorageError;
use crate::layout::ColumnLayout;
use crate::table::TabularStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppendOutcome {
    Appended,
    /// A row for this session id already exists; nothing was written.
    AlreadyRecorded,
}

/// Append a submission as one row, at most once per session id.
///
/// The sheet header is written from `layout` if the sheet is empty; an
/// existing header wins otherwise, and answers it has no column for are
/// dropped.
pub fn record_submission<S: TabularStore + ?Sized>(
    store: &mut S,
    submission: &Submission,
    layout: &ColumnLayout,
) -> Result<AppendOutcome, StorageError> {
    let header = store.ensure_header(layout)?;
    let session_column =
        header
            .position(columns::SESSION_ID)
            .ok_or_else(|| StorageError::MissingColumn {
                column: columns::SESSION_ID.to_string(),
            })?;

    let session_id = submission.session_id.to_string();
    let already = store
        .rows()?
        .iter()
        .any(|row| row.get(session_column) == Some(&session_id));
    if already {
        tracing::info!(session_id = %session_id, "session already recorded, skipping");
        return Ok(AppendOutcome::AlreadyRecorded);
    }

    let dropped: Vec<&str> = submission
        .answers
        .iter()
        .map(|(q, _)| q.as_str())
        .filter(|q| !header.contains(q))
        .collect();
    if !dropped.is_empty() {
        tracing::warn!(?dropped, "answers without a sheet column were dropped");
    }

    let row = submission.to_row(header.columns());
    store.append_row(&row)?;
    tracing::info!(
        session_id = %session_id,
        language = %submission.language,
        "submission recorded"
    );
    Ok(AppendOutcome::Appended)
}
