use crate::error::StorageError;
use crate::table::TabularStore;

/// In-memory sheet. The first appended row is the header.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    lines: Vec<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TabularStore for MemoryStore {
    fn header(&self) -> Result<Option<Vec<String>>, StorageError> {
        Ok(self.lines.first().cloned())
    }

    fn rows(&self) -> Result<Vec<Vec<String>>, StorageError> {
        Ok(self.lines.iter().skip(1).cloned().collect())
    }

    fn append_row(&mut self, row: &[String]) -> Result<(), StorageError> {
        if let Some(header) = self.lines.first()
            && header.len() != row.len()
        {
            return Err(StorageError::RowWidth {
                expected: header.len(),
                actual: row.len(),
            });
        }
        self.lines.push(row.to_vec());
        Ok(())
    }
}
