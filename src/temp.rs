//! Scoped temporary work area for materializing a content source.
//!
//! The base directory is always absolute, so a relative TMPDIR (e.g. TMPDIR=tmp) never
//! places the work area inside the target project.

use std::env;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Result, fs_error};

/// Prefix of every work area directory
pub const WORK_AREA_PREFIX: &str = "vibe-flow-";

/// Returns a directory path suitable for creating temporary directories.
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

/// Temporary directory removed when dropped, on success and error paths alike.
#[derive(Debug)]
pub struct WorkArea {
    dir: Option<TempDir>,
}

impl WorkArea {
    /// Acquire a fresh work area under [`temp_dir_base`]
    pub fn acquire() -> Result<Self> {
        let base = temp_dir_base();
        let dir = tempfile::Builder::new()
            .prefix(WORK_AREA_PREFIX)
            .tempdir_in(&base)
            .map_err(|e| fs_error(&base, e))?;
        tracing::debug!(path = %dir.path().display(), "acquired work area");
        Ok(Self { dir: Some(dir) })
    }

    pub fn path(&self) -> &Path {
        match &self.dir {
            Some(dir) => dir.path(),
            None => Path::new(""),
        }
    }
}

impl Drop for WorkArea {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            // Cleanup failure is ignored
            if let Err(e) = dir.close() {
                tracing::debug!(path = %path.display(), error = %e, "failed to remove work area");
            }
        }
    }
}
