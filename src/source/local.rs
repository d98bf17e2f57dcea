//! Local directory content source

use std::path::{Path, PathBuf};

use super::ContentSource;
use crate::error::{Result, VibeFlowError};

/// Framework assets already present on disk, e.g. a checkout of the framework repo
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    path: PathBuf,
}

impl LocalDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContentSource for LocalDirectory {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn materialize(&self, _work_area: &Path) -> Result<PathBuf> {
        if !self.path.is_dir() {
            return Err(VibeFlowError::FileSystem {
                path: self.path.display().to_string(),
                reason: "content source is not a directory".to_string(),
            });
        }
        Ok(self.path.clone())
    }
}
