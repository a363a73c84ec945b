//! Writing template sets to disk
//!
//! There is no rollback: if a write fails part way, files already written
//! stay where they are.

use crate::error::GenerateError;
use crate::templates::recipes::{TemplateFile, TemplateSet};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Create `target` and write `set` into it.
///
/// Fails without writing anything if `target` already exists. Returns the
/// written file paths relative to `target`.
pub async fn emit(target: &Path, set: &TemplateSet) -> Result<Vec<PathBuf>, GenerateError> {
    // create_dir (not create_dir_all) so an existing directory is an error
    fs::create_dir(target)
        .await
        .map_err(|e| GenerateError::filesystem("Failed to create directory", target, e))?;

    for dir in &set.directories {
        let path = target.join(dir);
        fs::create_dir_all(&path)
            .await
            .map_err(|e| GenerateError::filesystem("Failed to create directory", &path, e))?;
    }

    write_files(target, &set.files).await
}

/// Write files into an existing project directory
pub async fn write_files(
    target: &Path,
    files: &[TemplateFile],
) -> Result<Vec<PathBuf>, GenerateError> {
    let mut written = Vec::new();

    for file in files {
        let target_path = target.join(&file.path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| GenerateError::filesystem("Failed to create directory", parent, e))?;
        }

        fs::write(&target_path, &file.content)
            .await
            .map_err(|e| GenerateError::filesystem("Failed to write file", &target_path, e))?;

        written.push(file.path.clone());
    }

    Ok(written)
}
