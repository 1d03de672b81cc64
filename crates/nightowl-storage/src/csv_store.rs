use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::table::TabularStore;

/// Response sheet stored as a CSV file. Rows are only ever appended; the
/// file is created on the first write.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_empty(&self) -> Result<bool, StorageError> {
        match std::fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e.into()),
        }
    }

    fn reader(&self) -> Result<csv::Reader<std::fs::File>, StorageError> {
        Ok(csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)?)
    }
}

impl TabularStore for CsvStore {
    fn header(&self) -> Result<Option<Vec<String>>, StorageError> {
        if self.is_empty()? {
            return Ok(None);
        }
        let mut reader = self.reader()?;
        match reader.records().next() {
            Some(record) => Ok(Some(record?.iter().map(str::to_string).collect())),
            None => Ok(None),
        }
    }

    fn rows(&self) -> Result<Vec<Vec<String>>, StorageError> {
        if self.is_empty()? {
            return Ok(Vec::new());
        }
        let mut reader = self.reader()?;
        let mut rows = Vec::new();
        for record in reader.records().skip(1) {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }

    fn append_row(&mut self, row: &[String]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(row)?;
        writer.flush()?;
        Ok(())
    }
}
