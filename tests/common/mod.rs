//! Common test utilities for vibe-flow integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Version declared by the fixture framework's package.json
pub const FIXTURE_VERSION: &str = "2.0.0";

/// A target project, a local framework checkout and a private temp base
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Target project root
    pub path: PathBuf,
    /// Local content source root
    pub source: PathBuf,
    /// Directory used as TMPDIR for the binary
    pub tmp: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace with an empty project and an empty source
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("project");
        let source = temp.path().join("framework");
        let tmp = temp.path().join("tmp");
        for dir in [&path, &source, &tmp] {
            std::fs::create_dir_all(dir).expect("Failed to create workspace directory");
        }
        Self {
            temp,
            path,
            source,
            tmp,
        }
    }

    /// Workspace whose content source holds a small framework release
    pub fn with_framework() -> Self {
        let workspace = Self::new();
        workspace.create_framework();
        workspace
    }

    /// Populate the content source with a framework release.
    /// `.claude/output-styles` is deliberately absent.
    pub fn create_framework(&self) {
        self.write_source(
            "package.json",
            &format!(r#"{{"name": "claude-vibe-flow", "version": "{FIXTURE_VERSION}"}}"#),
        );
        self.write_source(".claude/agents/cvf-planner.md", "# Planner\n");
        self.write_source(".claude/agents/cvf-debugger.md", "# Debugger\n");
        self.write_source(".claude/commands/init.md", "# /init\n");
        self.write_source(".claude/skills/review/SKILL.md", "# Review skill\n");
        self.write_source(".claude/scripts/verify.sh", "#!/bin/sh\nexit 0\n");
        self.write_source(".claude/LESSONS.md", "# Lessons\n");
        self.write_source(
            ".mcp.json",
            r#"{
  "mcpServers": {
    "github": {"command": "npx", "args": ["-y", "@modelcontextprotocol/server-github"]}
  }
}
"#,
        );
        self.write_source(
            ".claude/hooks.json",
            r#"{"hooks": {"PostToolUse": [{"matcher": "Edit", "hooks": [{"type": "command", "command": ".claude/scripts/verify.sh"}]}]}}"#,
        );
    }

    /// Write a file in the target project
    pub fn write_file(&self, path: &str, content: &str) {
        write(&self.path.join(path), content);
    }

    /// Write a file in the content source
    pub fn write_source(&self, path: &str, content: &str) {
        write(&self.source.join(path), content);
    }

    /// Read a file from the target project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the target project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Parse a JSON file from the target project
    #[allow(dead_code)]
    pub fn read_json(&self, path: &str) -> serde_json::Value {
        serde_json::from_str(&self.read_file(path)).expect("Failed to parse JSON")
    }

    /// Work areas the binary left behind in its temp base
    #[allow(dead_code)]
    pub fn leftover_work_areas(&self) -> Vec<String> {
        std::fs::read_dir(&self.tmp)
            .expect("Failed to read temp base")
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("vibe-flow-"))
            .collect()
    }

    /// Binary with a clean environment, isolated temp base and no prompts
    pub fn cmd(&self) -> Command {
        let mut cmd = vibe_flow_cmd();
        cmd.env("TMPDIR", &self.tmp)
            .current_dir(&self.path)
            .arg("--target")
            .arg(&self.path)
            .arg("--yes");
        cmd
    }

    /// [`Self::cmd`] installing from the local content source
    pub fn install_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--source").arg(&self.source);
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// The real vibe-flow binary, without inherited configuration
#[allow(deprecated)]
pub fn vibe_flow_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vibe-flow").unwrap();
    for var in [
        "VIBE_FLOW_TARGET",
        "VIBE_FLOW_SOURCE",
        "DEBUG",
        "RUST_LOG",
        "CLICOLOR_FORCE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Whether permission bits are enforced for the current user (false for root)
#[allow(dead_code)]
pub fn permissions_enforced(dir: &Path) -> bool {
    let probe = dir.join(".vibe-flow-probe");
    match std::fs::write(&probe, "x") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            false
        }
        Err(_) => true,
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(path, content).expect("Failed to write file");
}
