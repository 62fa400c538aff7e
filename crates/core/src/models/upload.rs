use serde::{Deserialize, Serialize};

/// A user-supplied file: display name plus raw contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Parsed summary of one uploaded CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvPreview {
    pub name: String,
    /// Data rows, excluding the header
    pub row_count: usize,
    pub headers: Vec<String>,
    /// First few data rows
    pub rows: Vec<Vec<String>>,
}

/// Result of ingesting one file. Files are processed independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadOutcome {
    Parsed(CsvPreview),
    Failed { name: String, reason: String },
}

impl UploadOutcome {
    pub fn name(&self) -> &str {
        match self {
            UploadOutcome::Parsed(preview) => &preview.name,
            UploadOutcome::Failed { name, .. } => name,
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, UploadOutcome::Parsed(_))
    }
}
