//! Content sources
//!
//! A content source resolves the distributable framework assets to a local
//! directory tree before any install step runs:
//! - [`LocalDirectory`]: an existing directory, used as is
//! - [`GitHubTarball`]: a branch tarball fetched with `curl` and unpacked with `tar`
//!   into the run's work area

pub mod local;
pub mod tarball;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use local::LocalDirectory;
pub use tarball::GitHubTarball;

/// Default repository the framework is published from
pub const DEFAULT_REPO: &str = "jhlee0409/claude-vibe-flow";

/// Default branch downloaded when no ref is given
pub const DEFAULT_REF: &str = "main";

/// Supplier of the framework asset tree
pub trait ContentSource {
    /// Human readable location, used in status output
    fn describe(&self) -> String;

    /// Resolve the asset tree to a local directory, using `work_area` for any
    /// downloaded data. The returned path stays valid while `work_area` exists.
    fn materialize(&self, work_area: &Path) -> Result<PathBuf>;
}
