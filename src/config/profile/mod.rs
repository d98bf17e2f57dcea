//! Install profiles
//!
//! A profile is the table of everything one framework release installs: the
//! framework root, the tree items, the JSON configs to merge, the generated
//! documents and the version stamp location. Profiles are plain data so several
//! releases can coexist; two are built in and more can be loaded from YAML:
//!
//! ```yaml
//! name: team
//! framework_root: .claude
//! version_stamp: .claude/.vibe-flow-version.json
//! items:
//!   - name: agents
//!     source: .claude/agents
//!     category: framework-owned
//!     kind: directory
//! json_configs:
//!   - name: .mcp.json
//!     source: .mcp.json
//!     category: user-owned
//!     kind: json-config
//! ```


use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{InstallItem, ItemKind};
use crate::error::{Result, VibeFlowError, read_failed};

/// Name of the profile used when none is requested
pub const DEFAULT_PROFILE: &str = "current";

/// Everything one framework release installs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallProfile {
    pub name: String,

    /// Directory holding all framework-owned content in the target
    pub framework_root: PathBuf,

    /// Directories and files handled by the tree installer
    #[serde(default)]
    pub items: Vec<InstallItem>,

    /// JSON files handled by the merge policy
    #[serde(default)]
    pub json_configs: Vec<InstallItem>,

    /// User-owned project context document, generated once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_document: Option<PathBuf>,

    /// Framework-owned rules document, regenerated on every run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub core_rules_document: Option<PathBuf>,

    pub version_stamp: PathBuf,

    /// Framework manifest inside the content source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
}

impl InstallProfile {
    /// Layout with every framework asset under `.claude/`
    pub fn current() -> Self {
        Self {
            name: "current".to_string(),
            framework_root: PathBuf::from(".claude"),
            items: vec![
                InstallItem::framework_dir(".claude/agents"),
                InstallItem::framework_dir(".claude/commands"),
                InstallItem::framework_dir(".claude/skills"),
                InstallItem::framework_dir(".claude/scripts"),
                InstallItem::framework_dir(".claude/output-styles"),
                InstallItem::user_owned(".claude/LESSONS.md", ItemKind::File),
            ],
            json_configs: vec![
                InstallItem::json_config(".mcp.json"),
                InstallItem::json_config(".claude/hooks.json"),
            ],
            context_document: Some(PathBuf::from("CLAUDE.md")),
            core_rules_document: Some(PathBuf::from(".claude/CVF_CORE.md")),
            version_stamp: PathBuf::from(".claude/.vibe-flow-version.json"),
            manifest: Some(PathBuf::from("package.json")),
        }
    }

    /// Layout of the first releases: root-level directories, copied only when absent
    pub fn legacy() -> Self {
        let user_dir = |path: &str| InstallItem::user_owned(path, ItemKind::Directory);
        Self {
            name: "legacy".to_string(),
            framework_root: PathBuf::from(".claude-plugin"),
            items: vec![
                user_dir(".claude-plugin"),
                InstallItem::user_owned(".mcp.json", ItemKind::File),
                user_dir("agents"),
                user_dir("commands"),
                user_dir("hooks"),
                user_dir("skills"),
                user_dir("outputStyles"),
            ],
            json_configs: Vec::new(),
            context_document: None,
            core_rules_document: None,
            version_stamp: PathBuf::from(".claude-plugin/.vibe-flow-version.json"),
            manifest: Some(PathBuf::from("package.json")),
        }
    }

    /// Resolve a profile by built-in name or YAML file path
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        match name_or_path {
            "current" => Ok(Self::current()),
            "legacy" => Ok(Self::legacy()),
            other => {
                let path = Path::new(other);
                if path.is_file() {
                    Self::load(path)
                } else {
                    Err(VibeFlowError::UnknownProfile {
                        name: other.to_string(),
                    })
                }
            }
        }
    }

    /// Load and validate a profile from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| read_failed(path, e))?;
        let profile: Self =
            serde_yaml::from_str(&content).map_err(|e| VibeFlowError::ConfigParse {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        profile.validate().map_err(|reason| VibeFlowError::ConfigParse {
            path: path.display().to_string(),
            reason,
        })?;
        tracing::debug!(profile = %profile.name, path = %path.display(), "loaded install profile");
        Ok(profile)
    }

    /// Check kinds and that every path stays inside its root
    pub fn validate(&self) -> std::result::Result<(), String> {
        for item in &self.items {
            if item.kind == ItemKind::JsonConfig {
                return Err(format!(
                    "item '{}' is a json-config, list it under json_configs",
                    item.name
                ));
            }
        }

        for item in &self.json_configs {
            if item.kind != ItemKind::JsonConfig {
                return Err(format!(
                    "json_configs entry '{}' must have kind json-config",
                    item.name
                ));
            }
        }

        let paths = self
            .items
            .iter()
            .chain(&self.json_configs)
            .flat_map(|item| [item.source.as_path(), item.destination()])
            .chain([self.framework_root.as_path(), self.version_stamp.as_path()])
            .chain(self.context_document.as_deref())
            .chain(self.core_rules_document.as_deref())
            .chain(self.manifest.as_deref());

        for path in paths {
            if !is_contained(path) {
                return Err(format!(
                    "path '{}' must be relative and must not leave its root",
                    path.display()
                ));
            }
        }

        Ok(())
    }
}

impl Default for InstallProfile {
    fn default() -> Self {
        Self::current()
    }
}

fn is_contained(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
