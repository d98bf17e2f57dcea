//! Generated documents
//!
//! Two documents are produced from templates:
//! - the project context document (`CLAUDE.md`), user-owned: generated once
//!   when absent, never read or rewritten afterwards
//! - the core rules document (`.claude/CVF_CORE.md`), framework-owned:
//!   regenerated on every run
//!
//! Whether the context document describes an existing codebase or a new
//! project is decided by a [`ProjectTypeSource`].

pub mod template;

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use inquire::Select;

use crate::domain::Outcome;
use crate::error::{Result, write_failed};
use crate::hash;
use crate::inspector::{self, ProjectInfo};
use crate::installer::file_ops;
use crate::installer::tree::PRESERVED;

/// Kind of project the context document is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProjectType {
    /// Project with existing code, described from its manifests
    Existing,
    /// Project without code yet, gets a skeleton
    New,
}

/// Decides the project type of a target
pub trait ProjectTypeSource {
    fn project_type(&self, target: &Path, info: &ProjectInfo) -> Result<ProjectType>;
}

/// Always answers with the same type
#[derive(Debug, Clone, Copy)]
pub struct FixedProjectType(pub ProjectType);

impl ProjectTypeSource for FixedProjectType {
    fn project_type(&self, _target: &Path, _info: &ProjectInfo) -> Result<ProjectType> {
        Ok(self.0)
    }
}

/// Decides from the target's contents, asking the user only when they are ambiguous
#[derive(Debug, Clone, Copy)]
pub struct DetectedProjectType {
    interactive: bool,
}

impl DetectedProjectType {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl ProjectTypeSource for DetectedProjectType {
    fn project_type(&self, target: &Path, info: &ProjectInfo) -> Result<ProjectType> {
        if info.is_existing {
            return Ok(ProjectType::Existing);
        }
        if inspector::is_empty(target) {
            return Ok(ProjectType::New);
        }
        if !self.interactive {
            tracing::debug!("project type ambiguous, assuming existing project");
            return Ok(ProjectType::Existing);
        }

        let options = vec!["Existing project", "New project"];
        let choice = Select::new("Is this an existing project or a new one?", options)
            .with_starting_cursor(0)
            .without_filtering()
            .with_help_message("↑↓ to move, ENTER to select, ESC to keep existing")
            .prompt_skippable()?;

        Ok(match choice {
            Some("New project") => ProjectType::New,
            _ => ProjectType::Existing,
        })
    }
}

/// State of the project context document before the install touches the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextDocument {
    Present,
    Absent { content: String },
}

impl ContextDocument {
    /// Inspect the target and render the document if it has to be created.
    ///
    /// Called before any install step so the inspection sees the project as the
    /// user left it.
    pub fn prepare(
        target: &Path,
        document: &Path,
        source: &dyn ProjectTypeSource,
    ) -> Result<Self> {
        if file_ops::entry_exists(&target.join(document)) {
            return Ok(Self::Present);
        }

        let info = inspector::analyze_project(target);
        let content = match source.project_type(target, &info)? {
            ProjectType::Existing => template::existing_project(&info),
            ProjectType::New => template::new_project(&info.name),
        };
        Ok(Self::Absent { content })
    }

    /// Write the document if it was absent; an existing document is never opened
    pub fn write(self, path: &Path) -> Result<(Outcome, Option<String>)> {
        let content = match self {
            Self::Present => return Ok((Outcome::Skipped, Some(PRESERVED.to_string()))),
            Self::Absent { content } => content,
        };

        file_ops::ensure_parent_dir(path)?;
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                tracing::debug!(path = %path.display(), "context document appeared during run, preserving");
                return Ok((Outcome::Skipped, Some(PRESERVED.to_string())));
            }
            Err(e) => return Err(write_failed(path, e)),
        };
        file.write_all(content.as_bytes())
            .map_err(|e| write_failed(path, e))?;
        Ok((Outcome::Created, None))
    }
}

/// Regenerate the core rules document for `version`
pub fn refresh_core_rules(path: &Path, version: &str) -> Result<Outcome> {
    let content = template::core_rules(version);
    let existed = file_ops::entry_exists(path);
    let unchanged = existed
        && path.is_file()
        && hash::hash_file(path)? == blake3::hash(content.as_bytes());

    if unchanged {
        return Ok(Outcome::UpToDate);
    }
    file_ops::atomic_write(path, content.as_bytes())?;
    Ok(if existed {
        Outcome::Updated
    } else {
        Outcome::Created
    })
}
