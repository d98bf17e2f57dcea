//! Tree installer
//!
//! Decides per item whether to overwrite, skip or copy:
//! - source missing: skipped, absence of an optional item is not an error
//! - user-owned, destination present: skipped, never touched
//! - user-owned, destination absent: copied once (directories via a staging
//!   directory renamed into place)
//! - framework-owned: every source file is copied over its destination, replacing
//!   files or directories that stand in its way

use std::fs;
use std::path::Path;

use crate::domain::{InstallItem, InstallReport, ItemCategory, ItemKind, Outcome};
use crate::error::{Result, read_failed, write_failed};
use crate::hash;
use crate::progress::ProgressDisplay;

use super::file_ops;

/// Detail attached to items the content source does not provide
pub const NOT_PROVIDED: &str = "not provided by content source";

/// Detail attached to user-owned items that already exist
pub const PRESERVED: &str = "exists, preserved";

/// Copies tree items from a content source into a target project
pub struct TreeInstaller<'a> {
    source_root: &'a Path,
    target_root: &'a Path,
    progress: &'a ProgressDisplay,
}

impl<'a> TreeInstaller<'a> {
    pub fn new(source_root: &'a Path, target_root: &'a Path, progress: &'a ProgressDisplay) -> Self {
        Self {
            source_root,
            target_root,
            progress,
        }
    }

    /// Install every item in order. The first filesystem failure aborts the run;
    /// items completed before it stay installed.
    pub fn install_all(&self, items: &[InstallItem], report: &mut InstallReport) -> Result<()> {
        for item in items {
            match self.install_item(item) {
                Ok((outcome, detail)) => {
                    tracing::debug!(item = %item.name, %outcome, "tree item installed");
                    match detail {
                        Some(detail) => report.record_with_detail(&item.name, outcome, detail),
                        None => report.record(&item.name, outcome),
                    }
                }
                Err(e) => {
                    tracing::error!(item = %item.name, error = %e, "aborting install");
                    self.progress.abandon();
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Install a single item
    pub fn install_item(&self, item: &InstallItem) -> Result<(Outcome, Option<String>)> {
        let source = item.source_in(self.source_root);
        let destination = item.destination_in(self.target_root);

        let source_meta = match fs::metadata(&source) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(item = %item.name, "item not in content source");
                return Ok((Outcome::Skipped, Some(NOT_PROVIDED.to_string())));
            }
            Err(e) => return Err(read_failed(&source, e)),
        };

        let source_is_dir = source_meta.is_dir();
        if source_is_dir != (item.kind == ItemKind::Directory) {
            tracing::debug!(item = %item.name, kind = ?item.kind, source_is_dir, "item kind differs from source, following source");
        }

        match item.category {
            ItemCategory::UserOwned => self.install_user_owned(&source, &destination, source_is_dir),
            ItemCategory::FrameworkOwned => {
                self.install_framework_owned(&source, &destination, source_is_dir)
            }
        }
    }

    fn install_user_owned(
        &self,
        source: &Path,
        destination: &Path,
        source_is_dir: bool,
    ) -> Result<(Outcome, Option<String>)> {
        if file_ops::entry_exists(destination) {
            return Ok((Outcome::Skipped, Some(PRESERVED.to_string())));
        }

        if source_is_dir {
            self.copy_dir_once(source, destination)?;
        } else {
            file_ops::atomic_copy(source, destination)?;
            self.progress.update_file(&destination.display().to_string());
        }
        Ok((Outcome::Created, None))
    }

    /// Copy into a staging directory beside `destination`, then rename into place,
    /// so an interrupted copy never leaves a half-filled user-owned directory.
    fn copy_dir_once(&self, source: &Path, destination: &Path) -> Result<()> {
        file_ops::ensure_parent_dir(destination)?;
        let parent = destination.parent().unwrap_or(self.target_root);
        let staging = tempfile::Builder::new()
            .prefix(".vibe-flow-staging-")
            .tempdir_in(parent)
            .map_err(|e| write_failed(parent, e))?;

        let staged = staging.path().join("payload");
        let copied = file_ops::copy_tree(source, &staged)?;
        fs::rename(&staged, destination).map_err(|e| write_failed(destination, e))?;

        for _ in 0..copied {
            self.progress.update_file(&destination.display().to_string());
        }
        Ok(())
    }

    fn install_framework_owned(
        &self,
        source: &Path,
        destination: &Path,
        source_is_dir: bool,
    ) -> Result<(Outcome, Option<String>)> {
        let existed = file_ops::entry_exists(destination);
        file_ops::clear_ancestors(self.target_root, destination)?;

        if !source_is_dir {
            let unchanged = existed && hash::same_content(source, destination)?;
            file_ops::remove_blocking_dir(destination)?;
            file_ops::atomic_copy(source, destination)?;
            self.progress.update_file(&destination.display().to_string());
            return Ok((framework_outcome(existed, !unchanged), None));
        }

        if existed && !destination.is_dir() {
            tracing::debug!(path = %destination.display(), "replacing non-directory at framework path");
            fs::remove_file(destination).map_err(|e| write_failed(destination, e))?;
        }
        fs::create_dir_all(destination).map_err(|e| write_failed(destination, e))?;

        let mut changed = false;
        for (from, relative) in file_ops::list_files(source)? {
            let to = destination.join(&relative);
            if !hash::same_content(&from, &to)? {
                changed = true;
            }
            file_ops::clear_ancestors(destination, &to)?;
            file_ops::remove_blocking_dir(&to)?;
            file_ops::atomic_copy(&from, &to)?;
            self.progress.update_file(&relative.display().to_string());
        }

        Ok((framework_outcome(existed, changed), None))
    }
}

fn framework_outcome(existed: bool, changed: bool) -> Outcome {
    match (existed, changed) {
        (false, _) => Outcome::Created,
        (true, true) => Outcome::Updated,
        (true, false) => Outcome::UpToDate,
    }
}

/// Number of files the tree items would copy, for sizing the progress bar
pub fn count_files(source_root: &Path, items: &[InstallItem]) -> u64 {
    items
        .iter()
        .map(|item| {
            let source = item.source_in(source_root);
            if source.is_dir() {
                file_ops::list_files(&source).map(|f| f.len() as u64).unwrap_or(0)
            } else if source.is_file() {
                1
            } else {
                0
            }
        })
        .sum()
}
