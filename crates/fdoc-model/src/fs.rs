//! Filesystem scanning helpers.
//!
//! Every listing is sorted so load order, and therefore first-match
//! resolution, is deterministic across runs and platforms.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use fdoc_core::{slug_of, FdocError, FdocResult};
use tracing::debug;

/// Fail with `DirectoryNotFound` unless `path` is a directory.
pub(crate) fn ensure_dir(path: &Path) -> FdocResult<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(FdocError::DirectoryNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Slug of a tree root. Roots without a final component (`.`, `docs/..`)
/// are canonicalized first so they take the name of the directory they
/// denote.
pub(crate) fn root_slug(root: &Path) -> FdocResult<String> {
    if root.file_name().is_some() {
        return slug_of(root);
    }
    let resolved = std::fs::canonicalize(root).map_err(|e| FdocError::io(root, e))?;
    slug_of(&resolved)
}

/// Immediate subdirectories of `dir`, sorted by path.
pub(crate) fn subdirectories(dir: &Path) -> FdocResult<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = entries(dir)?.into_iter().filter(|p| p.is_dir()).collect();
    dirs.sort();
    Ok(dirs)
}

/// Files directly inside `dir` whose name ends with `suffix`, sorted.
pub(crate) fn files_with_suffix(dir: &Path, suffix: &str) -> FdocResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = entries(dir)?
        .into_iter()
        .filter(|p| p.is_file() && has_suffix(p, suffix))
        .collect();
    files.sort();
    Ok(files)
}

/// Files under `dir`, at any depth, whose name ends with `suffix`, sorted.
///
/// Symlinked directories are followed, but each real directory is entered
/// once, so link cycles terminate.
pub(crate) fn walk_files_with_suffix(dir: &Path, suffix: &str) -> FdocResult<Vec<PathBuf>> {
    let mut acc = Vec::new();
    let mut visited = HashSet::new();
    walk(dir, suffix, &mut visited, &mut acc)?;
    acc.sort();
    Ok(acc)
}

/// Read a declaration file.
pub(crate) fn read_source(path: &Path) -> FdocResult<String> {
    std::fs::read_to_string(path).map_err(|e| FdocError::io(path, e))
}

fn walk(
    dir: &Path,
    suffix: &str,
    visited: &mut HashSet<PathBuf>,
    acc: &mut Vec<PathBuf>,
) -> FdocResult<()> {
    let real = std::fs::canonicalize(dir).map_err(|e| FdocError::io(dir, e))?;
    if !visited.insert(real) {
        debug!(dir = %dir.display(), "directory already scanned, skipping");
        return Ok(());
    }
    for path in entries(dir)? {
        if path.is_dir() {
            walk(&path, suffix, visited, acc)?;
        } else if path.is_file() && has_suffix(&path, suffix) {
            acc.push(path);
        }
    }
    Ok(())
}

fn entries(dir: &Path) -> FdocResult<Vec<PathBuf>> {
    let read = std::fs::read_dir(dir).map_err(|e| FdocError::io(dir, e))?;
    read.map(|entry| entry.map(|e| e.path()).map_err(|e| FdocError::io(dir, e)))
        .collect()
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(suffix) && n.len() > suffix.len())
}
