//! File system errors
//!
//! Every I/O failure is classified here: `PermissionDenied` becomes
//! [`VibeFlowError::Permission`], anything else [`VibeFlowError::FileSystem`].

use std::io::ErrorKind;
use std::path::Path;

use super::VibeFlowError;

/// Classify an I/O error raised while touching `path`
pub fn fs_error(path: &Path, err: std::io::Error) -> VibeFlowError {
    match err.kind() {
        ErrorKind::PermissionDenied => VibeFlowError::Permission {
            path: path.display().to_string(),
        },
        _ => VibeFlowError::FileSystem {
            path: path.display().to_string(),
            reason: err.to_string(),
        },
    }
}

/// Error for a failed read of `path`
pub fn read_failed(path: &Path, err: std::io::Error) -> VibeFlowError {
    fs_error(path, err)
}

/// Error for a failed write of `path`
pub fn write_failed(path: &Path, err: std::io::Error) -> VibeFlowError {
    fs_error(path, err)
}
