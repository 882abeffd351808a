use crate::planning::domain::DatabaseExport;
use crate::ports::outbound::{BackupFile, BackupSource};
use crate::shared::error::PlannerError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader reads backups and event files from disk
///
/// Symbolic links, non-regular files and files above the upload limit are
/// rejected before anything is read.
pub struct FileSystemReader {
    max_size: u64,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self {
            max_size: MAX_FILE_SIZE,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }

    /// Reads a file after the regular-file and size checks
    pub fn read_checked(&self, path: &Path, description: &str) -> Result<(String, u64)> {
        validate_regular_file(path, description)?;

        let size = fs::metadata(path)
            .map_err(|e| PlannerError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?
            .len();
        validate_file_size(size, path, self.max_size)?;

        let content = fs::read_to_string(path).map_err(|e| PlannerError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        Ok((content, size))
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl BackupSource for FileSystemReader {
    fn read_backup(&self, path: &Path) -> Result<BackupFile> {
        let (content, size_bytes) = self.read_checked(path, "backup file")?;

        let data: DatabaseExport =
            serde_json::from_str(&content).map_err(|e| PlannerError::FileReadError {
                path: path.to_path_buf(),
                details: format!("Invalid JSON: {}", e),
            })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(BackupFile {
            file_name,
            size_bytes,
            data,
        })
    }
}
