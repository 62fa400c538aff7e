use thiserror::Error;

/// Unified error type for the portfolio-dashboard-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / File ──────────────────────────────────────────────
    #[error("Dataset '{name}' not found in {location}")]
    DatasetMissing { name: String, location: String },

    #[error("Invalid dataset '{name}': {message}")]
    InvalidDataset { name: String, message: String },

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported bundle version: {0}")]
    UnsupportedVersion(u16),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Derivation ──────────────────────────────────────────────────
    #[error("Dataset '{0}' has no rows")]
    EmptyDataset(String),

    #[error("Column '{column}' missing from dataset '{dataset}'")]
    MissingColumn { dataset: String, column: String },

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<bincode::Error> for CoreError {
    fn from(e: bincode::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        CoreError::Deserialization(format!("CSV: {e}"))
    }
}

/// Strip query parameters from any URL embedded in a message.
/// reqwest errors carry the full request URL, including the API key.
pub fn redact_query(msg: &str) -> String {
    match msg.find('?') {
        Some(idx) => format!("{}?<query redacted>", &msg[..idx]),
        None => msg.to_string(),
    }
}
