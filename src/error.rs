use thiserror::Error;

/// Errors surfaced by the engine and its persistence layer.
///
/// Malformed user input (dates, numeric amounts) is rejected here, at the
/// boundary, so the layout math never sees an invalid date or a NaN.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("invalid numeric value '{0}' for field '{1}'")]
    InvalidAmount(String, &'static str),

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("CSV is missing required columns (need title and due date), found: {0:?}")]
    MissingColumns(Vec<String>),

    #[error("no valid tasks found in CSV ({skipped} rows skipped)")]
    EmptyImport { skipped: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
