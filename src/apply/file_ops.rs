use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use super::substitute::{apply_map, Substitution};
use crate::error::{L10nError, Result};
use crate::parse::TranslationMap;

/// Replace `path` with `contents` via a temp file in the same directory.
///
/// The target is untouched unless the whole write succeeds. An existing
/// target keeps its permissions.
pub fn atomic_write(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| L10nError::write_failed(path, e))?;
    temp.write_all(contents)
        .and_then(|_| temp.flush())
        .map_err(|e| L10nError::write_failed(path, e))?;
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions())
            .map_err(|e| L10nError::write_failed(path, e))?;
    }
    temp.persist(path)
        .map_err(|e| L10nError::write_failed(path, e.error))?;

    debug!(path = %path.display(), bytes = contents.len(), "replaced file");
    Ok(())
}

/// Translate `path` in place using `map`
pub fn rewrite_file(path: &Path, map: &TranslationMap) -> Result<Substitution> {
    let content = fs::read(path).map_err(|e| L10nError::read_failed(path, e))?;
    let substitution = apply_map(&content, map);
    atomic_write(path, &substitution.output)?;
    Ok(substitution)
}

/// Move `src` to `dst`, replacing any existing `dst`
pub fn backup_file(src: &Path, dst: &Path) -> Result<()> {
    if !src.exists() {
        return Err(L10nError::SourceMissing(src.to_path_buf()));
    }

    if dst.exists() {
        fs::remove_file(dst).map_err(|e| {
            L10nError::backup_failed(src, dst, format!("failed to remove existing backup: {}", e))
        })?;
    }

    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| L10nError::backup_failed(src, dst, e.to_string()))?;
    }

    fs::rename(src, dst)
        .map_err(|e| L10nError::backup_failed(src, dst, format!("failed to move file: {}", e)))
}

/// Copy `src` over `dst`, creating `dst`'s directory if needed
pub fn copy_file(src: &Path, dst: &Path) -> Result<u64> {
    if !src.exists() {
        return Err(L10nError::SourceMissing(src.to_path_buf()));
    }

    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| L10nError::write_failed(dst, e))?;
    }

    fs::copy(src, dst).map_err(|e| L10nError::write_failed(dst, e))
}
