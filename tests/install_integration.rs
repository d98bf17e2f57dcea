//! End-to-end install tests using the REAL vibe-flow binary and a local content source

mod common;

use predicates::prelude::*;
use serde_json::json;

use common::{FIXTURE_VERSION, TestWorkspace};

#[test]
fn test_fresh_install_creates_everything() {
    let workspace = TestWorkspace::with_framework();

    workspace
        .install_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains(".claude/agents (created)"))
        .stdout(predicate::str::contains("Done!"));

    assert!(workspace.file_exists(".claude/agents/cvf-planner.md"));
    assert!(workspace.file_exists(".claude/commands/init.md"));
    assert!(workspace.file_exists(".claude/skills/review/SKILL.md"));
    assert!(workspace.file_exists(".claude/scripts/verify.sh"));
    assert!(workspace.file_exists(".claude/LESSONS.md"));
    assert!(workspace.file_exists(".claude/CVF_CORE.md"));
    assert!(workspace.file_exists("CLAUDE.md"));
    assert_eq!(
        workspace.read_json(".mcp.json")["mcpServers"]["github"]["command"],
        "npx"
    );

    let stamp = workspace.read_json(".claude/.vibe-flow-version.json");
    assert_eq!(stamp["version"], FIXTURE_VERSION);
    assert!(stamp["installedAt"].is_string());
    assert!(
        workspace
            .read_file(".claude/CVF_CORE.md")
            .contains(&format!("Version: {FIXTURE_VERSION}"))
    );
    assert!(workspace.leftover_work_areas().is_empty());
}

#[test]
fn test_existing_claude_md_is_preserved() {
    let workspace = TestWorkspace::with_framework();
    workspace.write_file("CLAUDE.md", "Hello World");

    workspace
        .install_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("CLAUDE.md (skipped)"));

    assert_eq!(workspace.read_file("CLAUDE.md"), "Hello World");
}

#[test]
fn test_existing_lessons_file_is_preserved() {
    let workspace = TestWorkspace::with_framework();
    workspace.write_file(".claude/LESSONS.md", "- never deploy on fridays\n");

    workspace.install_cmd().assert().success();

    assert_eq!(
        workspace.read_file(".claude/LESSONS.md"),
        "- never deploy on fridays\n"
    );
}

#[test]
fn test_mcp_servers_are_merged_not_replaced() {
    let workspace = TestWorkspace::with_framework();
    workspace.write_file(
        ".mcp.json",
        r#"{"mcpServers": {"custom-tool": {"command": "my-tool", "args": ["--serve"]}}}"#,
    );

    workspace
        .install_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains(".mcp.json (merged)"));

    let merged = workspace.read_json(".mcp.json");
    assert_eq!(
        merged["mcpServers"]["custom-tool"],
        json!({"command": "my-tool", "args": ["--serve"]})
    );
    assert_eq!(merged["mcpServers"]["github"]["command"], "npx");
    assert!(workspace.file_exists(".mcp.json.backup"));
}

#[test]
fn test_existing_hook_events_are_kept() {
    let workspace = TestWorkspace::with_framework();
    workspace.write_file(
        ".claude/hooks.json",
        r#"{"hooks": {"PostToolUse": [{"matcher": "Write", "hooks": []}]}}"#,
    );

    workspace.install_cmd().assert().success();

    let hooks = workspace.read_json(".claude/hooks.json");
    let rules = hooks["hooks"]["PostToolUse"].as_array().unwrap();
    // Existing sub-key wins, incoming rule sets are not spliced into it
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0]["matcher"], "Write");
}

#[test]
fn test_corrupt_mcp_json_is_backed_up_and_replaced() {
    let workspace = TestWorkspace::with_framework();
    workspace.write_file(".mcp.json", "{ this is not json");

    workspace.install_cmd().assert().success();

    assert_eq!(
        workspace.read_file(".mcp.json.corrupt.bak"),
        "{ this is not json"
    );
    assert_eq!(
        workspace.read_json(".mcp.json")["mcpServers"]["github"]["command"],
        "npx"
    );
}

#[test]
fn test_missing_optional_directory_is_skipped() {
    let workspace = TestWorkspace::with_framework();

    workspace
        .install_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains(
            ".claude/output-styles (skipped) not provided by content source",
        ));

    assert!(!workspace.file_exists(".claude/output-styles"));
}

#[test]
fn test_framework_files_are_refreshed() {
    let workspace = TestWorkspace::with_framework();
    workspace.write_file(".claude/agents/cvf-planner.md", "locally edited");
    workspace.write_file(".claude/agents/my-agent.md", "mine");

    workspace
        .install_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains(".claude/agents (updated)"));

    assert_eq!(
        workspace.read_file(".claude/agents/cvf-planner.md"),
        "# Planner\n"
    );
    assert_eq!(workspace.read_file(".claude/agents/my-agent.md"), "mine");
}

#[test]
fn test_second_run_is_idempotent() {
    let workspace = TestWorkspace::with_framework();
    workspace.install_cmd().assert().success();
    let claude_md = workspace.read_file("CLAUDE.md");
    let mcp = workspace.read_file(".mcp.json");

    workspace
        .install_cmd()
        .arg("--upgrade")
        .assert()
        .success()
        .stdout(predicate::str::contains(".claude/agents (up to date)"))
        .stdout(predicate::str::contains(".mcp.json (up to date)"))
        .stdout(predicate::str::contains("Reinstalled"));

    assert_eq!(workspace.read_file("CLAUDE.md"), claude_md);
    assert_eq!(workspace.read_file(".mcp.json"), mcp);
    assert!(!workspace.file_exists(".mcp.json.backup"));
}

#[test]
fn test_upgrade_overwrites_stamp() {
    let workspace = TestWorkspace::with_framework();
    workspace.write_file(
        ".claude/.vibe-flow-version.json",
        r#"{"version": "1.0.0", "installedAt": "2024-01-01T00:00:00Z"}"#,
    );

    workspace
        .install_cmd()
        .arg("--upgrade")
        .assert()
        .success()
        .stdout(predicate::str::contains("Upgraded 1.0.0 -> 2.0.0"));

    assert_eq!(
        workspace.read_json(".claude/.vibe-flow-version.json")["version"],
        FIXTURE_VERSION
    );
}

#[test]
fn test_existing_project_gets_generated_context() {
    let workspace = TestWorkspace::with_framework();
    workspace.write_file(
        "package.json",
        r#"{"name": "shop-web", "description": "Storefront", "scripts": {"test": "vitest"}, "devDependencies": {"vitest": "1.0.0"}}"#,
    );

    workspace.install_cmd().assert().success();

    let claude_md = workspace.read_file("CLAUDE.md");
    assert!(claude_md.starts_with("# CLAUDE.md - shop-web"));
    assert!(claude_md.contains("Storefront"));
    assert!(claude_md.contains("- **Test**: Vitest"));
}

#[test]
fn test_project_type_flag_forces_skeleton() {
    let workspace = TestWorkspace::with_framework();
    workspace.write_file("package.json", r#"{"name": "shop-web"}"#);

    workspace
        .install_cmd()
        .args(["--project-type", "new"])
        .assert()
        .success();

    assert!(
        workspace
            .read_file("CLAUDE.md")
            .contains("[TODO: Describe what this project does]")
    );
}

#[test]
fn test_legacy_profile_copies_root_directories_once() {
    let workspace = TestWorkspace::new();
    workspace.write_source("package.json", r#"{"version": "0.5.0"}"#);
    workspace.write_source("agents/planner.md", "# planner");
    workspace.write_source("commands/init.md", "# init");
    workspace.write_source(".mcp.json", r#"{"mcpServers": {}}"#);
    workspace.write_file("commands/custom.md", "mine");

    workspace
        .install_cmd()
        .args(["--profile", "legacy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("commands (skipped)"));

    assert!(workspace.file_exists("agents/planner.md"));
    assert!(!workspace.file_exists("commands/init.md"));
    assert!(!workspace.file_exists("CLAUDE.md"));
    assert!(workspace.file_exists(".claude-plugin/.vibe-flow-version.json"));
}

#[test]
fn test_custom_yaml_profile() {
    let workspace = TestWorkspace::with_framework();
    let profile = workspace.temp.path().join("agents-only.yaml");
    std::fs::write(
        &profile,
        "name: agents-only\n\
         framework_root: .claude\n\
         version_stamp: .claude/.stamp.json\n\
         items:\n\
         \x20 - name: agents\n\
         \x20   source: .claude/agents\n\
         \x20   category: framework-owned\n\
         \x20   kind: directory\n",
    )
    .unwrap();

    workspace
        .install_cmd()
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success();

    assert!(workspace.file_exists(".claude/agents/cvf-planner.md"));
    assert!(!workspace.file_exists(".claude/commands"));
    assert!(!workspace.file_exists(".mcp.json"));
    assert!(!workspace.file_exists("CLAUDE.md"));
    assert!(workspace.file_exists(".claude/.stamp.json"));
}

#[test]
fn test_target_from_environment() {
    let workspace = TestWorkspace::with_framework();

    common::vibe_flow_cmd()
        .env("TMPDIR", &workspace.tmp)
        .env("VIBE_FLOW_TARGET", &workspace.path)
        .env("VIBE_FLOW_SOURCE", &workspace.source)
        .arg("--yes")
        .assert()
        .success();

    assert!(workspace.file_exists(".claude/agents/cvf-planner.md"));
}
