//! Fragment directory listing.

use oasfix_core::{AppError, AppResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regular files directly inside `dir`, sorted by file name.
pub fn fragment_files(dir: &Path) -> AppResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AppError::General(format!(
            "Directory not found: {}",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            AppError::General(format!("Failed to list {}: {}", dir.display(), e))
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// The file stem as UTF-8.
pub fn stem_of(path: &Path) -> AppResult<&str> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| AppError::General(format!("Unusable file name: {}", path.display())))
}

/// The file name as UTF-8.
pub fn file_name_of(path: &Path) -> AppResult<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| AppError::General(format!("Unusable file name: {}", path.display())))
}
