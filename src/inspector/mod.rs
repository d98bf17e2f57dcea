//! Project inspector
//!
//! Reads a target directory's manifest files to describe the project for the
//! generated context document, and reports whether the target already holds an
//! installation. Every probe is best effort: unreadable or malformed files are
//! treated as absent.

mod stack;


use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::config::InstallProfile;

pub use stack::TechStack;

/// Placeholder used when no description can be found
pub const DESCRIPTION_PLACEHOLDER: &str = "[TODO: Add project description]";

const MAX_DESCRIPTION_CHARS: usize = 200;

/// Entries whose presence marks a directory as an existing codebase
const EXISTING_MARKERS: &[&str] = &[
    "package.json",
    "pyproject.toml",
    "Cargo.toml",
    "go.mod",
    "Gemfile",
    "pom.xml",
    "build.gradle",
    "src",
    "lib",
    "app",
];

const IMPORTANT_SCRIPTS: &[&str] = &["dev", "build", "test", "start", "lint", "typecheck"];

const MAIN_DIRECTORIES: &[&str] = &[
    "src",
    "lib",
    "app",
    "pages",
    "components",
    "api",
    "tests",
    "test",
    "__tests__",
];

const README_NAMES: &[&str] = &["README.md", "readme.md", "Readme.md"];

/// What the inspector learned about a target project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    pub description: String,
    pub is_existing: bool,
    pub tech_stack: TechStack,
    /// Important package.json scripts, in a fixed order
    pub scripts: Vec<(String, String)>,
    pub directories: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PackageJson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub scripts: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, serde_json::Value>,
}

impl PackageJson {
    pub(crate) fn read(project: &Path) -> Option<Self> {
        let content = read_optional(&project.join("package.json"))?;
        match serde_json::from_str(&content) {
            Ok(pkg) => Some(pkg),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring malformed package.json");
                None
            }
        }
    }

    pub(crate) fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }
}

/// Inspect `project` and describe it
pub fn analyze_project(project: &Path) -> ProjectInfo {
    let package = PackageJson::read(project);

    let info = ProjectInfo {
        name: project_name(project, package.as_ref()),
        description: project_description(project, package.as_ref()),
        is_existing: is_existing_project(project),
        tech_stack: TechStack::detect(project, package.as_ref()),
        scripts: important_scripts(package.as_ref()),
        directories: main_directories(project),
    };
    tracing::debug!(name = %info.name, existing = info.is_existing, languages = ?info.tech_stack.languages, "analyzed project");
    info
}

/// Whether any marker of an existing codebase is present
pub fn is_existing_project(project: &Path) -> bool {
    EXISTING_MARKERS
        .iter()
        .any(|marker| project.join(marker).exists())
}

/// Whether the directory has no entries besides hidden ones
pub fn is_empty(project: &Path) -> bool {
    match std::fs::read_dir(project) {
        Ok(entries) => !entries
            .filter_map(|e| e.ok())
            .any(|e| !e.file_name().to_string_lossy().starts_with('.')),
        Err(_) => true,
    }
}

/// Whether a previous installation left its stamp or framework root behind
pub fn has_installed_state(project: &Path, profile: &InstallProfile) -> bool {
    project.join(&profile.version_stamp).exists() || project.join(&profile.framework_root).exists()
}

fn project_name(project: &Path, package: Option<&PackageJson>) -> String {
    package
        .and_then(|p| non_empty(p.name.as_deref()))
        .or_else(|| toml_name(&project.join("pyproject.toml"), &["project", "tool.poetry"]))
        .or_else(|| toml_name(&project.join("Cargo.toml"), &["package", "workspace.package"]))
        .or_else(|| go_module_name(&project.join("go.mod")))
        .or_else(|| {
            project
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "project".to_string())
}

fn project_description(project: &Path, package: Option<&PackageJson>) -> String {
    package
        .and_then(|p| non_empty(p.description.as_deref()))
        .or_else(|| readme_first_line(project))
        .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string())
}

fn important_scripts(package: Option<&PackageJson>) -> Vec<(String, String)> {
    let Some(package) = package else {
        return Vec::new();
    };
    IMPORTANT_SCRIPTS
        .iter()
        .filter_map(|name| {
            let command = package.scripts.get(*name)?.as_str()?;
            non_empty(Some(command)).map(|c| (name.to_string(), c))
        })
        .collect()
}

fn main_directories(project: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(project) else {
        return Vec::new();
    };
    let mut dirs: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| MAIN_DIRECTORIES.contains(&name.as_str()))
        .collect();
    dirs.sort();
    dirs
}

/// `name` from the first of `tables` (dotted paths) that has one
fn toml_name(path: &Path, tables: &[&str]) -> Option<String> {
    let content = read_optional(path)?;
    let document: toml::Table = match content.parse() {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "ignoring malformed TOML manifest");
            return None;
        }
    };

    tables.iter().find_map(|table| {
        let mut value = document.get(table.split('.').next()?)?;
        for key in table.split('.').skip(1) {
            value = value.get(key)?;
        }
        non_empty(value.get("name")?.as_str())
    })
}

/// Last path segment of the `module` directive
fn go_module_name(path: &Path) -> Option<String> {
    let content = read_optional(path)?;
    content.lines().find_map(|line| {
        let module = line.trim().strip_prefix("module")?;
        if !module.starts_with(char::is_whitespace) {
            return None;
        }
        let module = module.trim().trim_matches('"');
        non_empty(module.rsplit('/').next())
    })
}

fn readme_first_line(project: &Path) -> Option<String> {
    README_NAMES.iter().find_map(|name| {
        let content = read_optional(&project.join(name))?;
        content
            .lines()
            .find(|line| !line.trim().is_empty() && !line.starts_with('#'))
            .map(|line| line.trim().chars().take(MAX_DESCRIPTION_CHARS).collect())
    })
}

pub(crate) fn read_optional(path: &Path) -> Option<String> {
    std::fs::read_to_string(path).ok()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
