use std::path::Path;

use log::debug;

use crate::errors::CoreError;
use crate::models::dataset::DatasetBundle;

use super::format;

/// Save/load all datasets as a single binary bundle.
pub struct StorageManager;

impl StorageManager {
    /// Flow: DatasetBundle → bincode → PFDB framed bytes
    pub fn save_to_bytes(bundle: &DatasetBundle) -> Result<Vec<u8>, CoreError> {
        let payload = bincode::serialize(bundle)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize bundle: {e}")))?;
        Ok(format::write_file(format::CURRENT_VERSION, &payload))
    }

    /// Flow: PFDB bytes → parse header → bincode → validate → DatasetBundle
    pub fn load_from_bytes(data: &[u8]) -> Result<DatasetBundle, CoreError> {
        let (header, payload) = format::read_file(data)?;
        debug!(
            "reading PFDB bundle v{} ({} payload bytes)",
            header.version, header.payload_len
        );
        let bundle: DatasetBundle = bincode::deserialize(payload)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize bundle: {e}")))?;
        bundle.validated()
    }

    pub fn save_to_file(bundle: &DatasetBundle, path: impl AsRef<Path>) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(bundle)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<DatasetBundle, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes)
    }
}
