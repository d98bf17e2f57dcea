//! Installable items
//!
//! An [`InstallItem`] is one unit of distributable content. Items are listed by an
//! install profile and re-enumerated on every run; they are never persisted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Who owns an item once it is installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemCategory {
    /// Refreshed on every run; local edits are discarded
    FrameworkOwned,
    /// Created once, never clobbered
    UserOwned,
}

/// Shape of an item in the content source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Directory,
    File,
    JsonConfig,
}

/// One unit of distributable content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallItem {
    /// Name used in reports
    pub name: String,

    /// Path relative to the content source root
    pub source: PathBuf,

    /// Path relative to the target root, defaults to `source`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,

    pub category: ItemCategory,

    pub kind: ItemKind,
}

impl InstallItem {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<PathBuf>,
        category: ItemCategory,
        kind: ItemKind,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            destination: None,
            category,
            kind,
        }
    }

    /// Framework-owned directory installed at the same relative path
    pub fn framework_dir(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        Self::new(
            display_name(&source),
            source,
            ItemCategory::FrameworkOwned,
            ItemKind::Directory,
        )
    }

    /// User-owned item (file or directory) installed at the same relative path
    pub fn user_owned(source: impl Into<PathBuf>, kind: ItemKind) -> Self {
        let source = source.into();
        Self::new(display_name(&source), source, ItemCategory::UserOwned, kind)
    }

    /// JSON configuration file merged at the same relative path
    pub fn json_config(source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        Self::new(
            display_name(&source),
            source,
            ItemCategory::UserOwned,
            ItemKind::JsonConfig,
        )
    }

    /// Override the destination
    #[cfg(test)]
    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Relative destination path
    pub fn destination(&self) -> &Path {
        self.destination.as_deref().unwrap_or(&self.source)
    }

    pub fn source_in(&self, source_root: &Path) -> PathBuf {
        source_root.join(&self.source)
    }

    pub fn destination_in(&self, target_root: &Path) -> PathBuf {
        target_root.join(self.destination())
    }
}

fn display_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
