//! Basic file operations for installation
//!
//! Every file lands through a temporary file in the destination directory that is
//! persisted over the target, so a single file is always either the old or the
//! new content.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::error::{Result, VibeFlowError, fs_error, read_failed, write_failed};

/// Whether anything (file, directory or dangling symlink) exists at `path`
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_failed(parent, e))?;
    }
    Ok(())
}

/// Remove non-directories standing where a parent directory of `path` belongs,
/// for every ancestor below `root`
pub fn clear_ancestors(root: &Path, path: &Path) -> Result<()> {
    let Some(parents) = path.strip_prefix(root).ok().and_then(Path::parent) else {
        return Ok(());
    };

    let mut current = root.to_path_buf();
    for component in parents.components() {
        current.push(component);
        if !entry_exists(&current) {
            break;
        }
        if !current.is_dir() {
            tracing::debug!(path = %current.display(), "replacing non-directory in framework path");
            fs::remove_file(&current).map_err(|e| write_failed(&current, e))?;
            break;
        }
    }
    Ok(())
}

/// Remove a real directory standing where the file `path` belongs
pub fn remove_blocking_dir(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => {
            tracing::debug!(path = %path.display(), "replacing directory at framework file path");
            fs::remove_dir_all(path).map_err(|e| write_failed(path, e))
        }
        _ => Ok(()),
    }
}

fn temp_file_beside(target: &Path) -> Result<NamedTempFile> {
    ensure_parent_dir(target)?;
    let dir = target.parent().unwrap_or(Path::new("."));
    tempfile::Builder::new()
        .prefix(".vibe-flow-")
        .tempfile_in(dir)
        .map_err(|e| write_failed(dir, e))
}

fn persist(tmp: NamedTempFile, target: &Path) -> Result<()> {
    tmp.persist(target)
        .map(|_| ())
        .map_err(|e| write_failed(target, e.error))
}

/// Atomically write `data` to `target`
pub fn atomic_write(target: &Path, data: &[u8]) -> Result<()> {
    let mut tmp = temp_file_beside(target)?;
    tmp.write_all(data).map_err(|e| write_failed(target, e))?;
    persist(tmp, target)
}

/// Atomically copy `source` over `target`, keeping the source permissions
pub fn atomic_copy(source: &Path, target: &Path) -> Result<()> {
    let mut input = fs::File::open(source).map_err(|e| read_failed(source, e))?;
    let permissions = input
        .metadata()
        .map_err(|e| read_failed(source, e))?
        .permissions();

    let mut tmp = temp_file_beside(target)?;
    std::io::copy(&mut input, tmp.as_file_mut()).map_err(|e| write_failed(target, e))?;
    tmp.as_file()
        .set_permissions(permissions)
        .map_err(|e| write_failed(target, e))?;
    persist(tmp, target)
}

/// Regular files of a tree, as (absolute source, path relative to `root`), sorted
pub fn list_files(root: &Path) -> Result<Vec<(std::path::PathBuf, std::path::PathBuf)>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            match e.into_io_error() {
                Some(io) => fs_error(&path, io),
                None => VibeFlowError::FileSystem {
                    path: path.display().to_string(),
                    reason: "filesystem loop detected".to_string(),
                },
            }
        })?;

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            tracing::warn!(path = %entry.path().display(), "skipping symlink in content source");
            continue;
        }
        if !file_type.is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();
        files.push((entry.path().to_path_buf(), relative));
    }
    Ok(files)
}

/// Copy a directory tree into a fresh destination
pub fn copy_tree(source: &Path, target: &Path) -> Result<usize> {
    fs::create_dir_all(target).map_err(|e| write_failed(target, e))?;
    let files = list_files(source)?;
    for (from, relative) in &files {
        let to = target.join(relative);
        ensure_parent_dir(&to)?;
        fs::copy(from, &to).map_err(|e| write_failed(&to, e))?;
    }
    Ok(files.len())
}
