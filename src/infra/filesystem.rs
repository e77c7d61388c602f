//! Filesystem operations
//!
//! Handles file and directory operations.

use std::path::{Path, PathBuf};

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Move a file or directory to a new path on the same filesystem
pub fn move_path(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    std::fs::rename(from, to).map_err(|e| FilesystemError::Move {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error: e.to_string(),
    })
}

/// Write content to a file
pub fn write_file(path: &Path, content: &str) -> Result<(), FilesystemError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(path, content).map_err(|e| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Read content from a file
pub fn read_file(path: &Path) -> Result<String, FilesystemError> {
    std::fs::read_to_string(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// List the immediate subdirectories of `dir`, sorted by name
///
/// Hidden directories are skipped. A missing `dir` yields an empty list.
pub fn list_subdirectories(dir: &Path) -> Result<Vec<PathBuf>, FilesystemError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut subdirs = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| FilesystemError::ListDir {
            path: dir.to_path_buf(),
            error: e.to_string(),
        })?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if entry.file_type().is_dir() && !hidden {
            subdirs.push(entry.into_path());
        }
    }
    Ok(subdirs)
}
