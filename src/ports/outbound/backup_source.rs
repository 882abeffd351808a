use crate::planning::domain::DatabaseExport;
use crate::shared::Result;
use std::path::Path;

/// A database backup read from disk, ready to upload
#[derive(Debug, Clone, PartialEq)]
pub struct BackupFile {
    pub file_name: String,
    pub size_bytes: u64,
    pub data: DatabaseExport,
}

impl BackupFile {
    /// Size in kilobytes with two decimals, as shown in confirmations
    pub fn size_kb(&self) -> String {
        format!("{:.2}", self.size_bytes as f64 / 1024.0)
    }
}

/// BackupSource port for reading a backup before import
pub trait BackupSource {
    /// Reads and parses a backup file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file doesn't exist, is a symbolic link or is not a regular file
    /// - The file is larger than the upload limit
    /// - The content is not valid JSON
    fn read_backup(&self, path: &Path) -> Result<BackupFile>;
}
