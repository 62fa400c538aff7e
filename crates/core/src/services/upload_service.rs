use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::upload::{CsvPreview, UploadOutcome, UploadedFile};

/// Parses uploaded CSV files for preview.
///
/// Each file is handled on its own: a parse failure is reported for that
/// file and the rest are still processed.
pub struct UploadService {
    preview_rows: usize,
}

impl UploadService {
    pub fn new(preview_rows: usize) -> Self {
        Self { preview_rows }
    }

    pub fn ingest(&self, files: &[UploadedFile]) -> Vec<UploadOutcome> {
        files
            .iter()
            .map(|file| match self.parse(file) {
                Ok(preview) => {
                    debug!("parsed upload {}: {} rows", file.name, preview.row_count);
                    UploadOutcome::Parsed(preview)
                }
                Err(e) => {
                    warn!("could not parse upload {}: {e}", file.name);
                    UploadOutcome::Failed {
                        name: file.name.clone(),
                        reason: e.to_string(),
                    }
                }
            })
            .collect()
    }

    /// Parse one CSV file: header row, row count and the first rows.
    pub fn parse(&self, file: &UploadedFile) -> Result<CsvPreview, CoreError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file.bytes.as_slice());

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(CoreError::InvalidFileFormat(format!(
                "{} has no columns to parse",
                file.name
            )));
        }

        let mut row_count = 0;
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            if rows.len() < self.preview_rows {
                rows.push(record.iter().map(str::to_string).collect());
            }
            row_count += 1;
        }

        Ok(CsvPreview {
            name: file.name.clone(),
            row_count,
            headers,
            rows,
        })
    }
}

impl Default for UploadService {
    fn default() -> Self {
        Self::new(5)
    }
}
