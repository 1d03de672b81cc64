use crate::error::StorageError;
use crate::layout::ColumnLayout;

/// A sheet that only ever grows: a header row, then data rows.
pub trait TabularStore {
    /// The header row, or `None` while the sheet is still empty.
    fn header(&self) -> Result<Option<Vec<String>>, StorageError>;

    /// Data rows, header excluded, in insertion order.
    fn rows(&self) -> Result<Vec<Vec<String>>, StorageError>;

    /// Append one row after the existing ones.
    fn append_row(&mut self, row: &[String]) -> Result<(), StorageError>;

    /// Return the sheet's layout, writing `layout` as the header first if
    /// the sheet is empty.
    fn ensure_header(&mut self, layout: &ColumnLayout) -> Result<ColumnLayout, StorageError> {
        if let Some(existing) = self.header()? {
            return Ok(ColumnLayout::from_header(existing));
        }
        self.append_row(layout.columns())?;
        tracing::info!(columns = layout.len(), "wrote sheet header");
        Ok(layout.clone())
    }
}
