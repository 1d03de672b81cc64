use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("sheet header has no '{column}' column")]
    MissingColumn { column: String },

    #[error("row has {actual} cells, header has {expected}")]
    RowWidth { expected: usize, actual: usize },
}
