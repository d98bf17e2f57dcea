//! Error handling integration tests: exit codes, messages and temp cleanup

mod common;

use predicates::prelude::*;

use common::TestWorkspace;

#[test]
fn test_unknown_profile_exits_with_usage_code() {
    let workspace = TestWorkspace::with_framework();

    workspace
        .install_cmd()
        .args(["--profile", "nightly"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown install profile: nightly"))
        .stderr(predicate::str::contains("Suggestion:"));
}

#[test]
fn test_missing_target_is_filesystem_error() {
    let workspace = TestWorkspace::with_framework();

    common::vibe_flow_cmd()
        .env("TMPDIR", &workspace.tmp)
        .arg("--target")
        .arg(workspace.path.join("does-not-exist"))
        .arg("--source")
        .arg(&workspace.source)
        .assert()
        .code(4);
}

#[test]
fn test_missing_local_source_is_filesystem_error() {
    let workspace = TestWorkspace::new();

    workspace
        .cmd()
        .arg("--source")
        .arg(workspace.temp.path().join("nowhere"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("content source is not a directory"));

    assert!(workspace.leftover_work_areas().is_empty());
}

#[test]
fn test_installer_too_old_touches_nothing() {
    let workspace = TestWorkspace::with_framework();
    workspace.write_source(
        "package.json",
        r#"{"version": "9.0.0", "minInstallerVersion": "99.0.0"}"#,
    );

    workspace
        .install_cmd()
        .assert()
        .code(7)
        .stderr(predicate::str::contains("99.0.0"));

    assert_eq!(std::fs::read_dir(&workspace.path).unwrap().count(), 0);
    assert!(workspace.leftover_work_areas().is_empty());
}

#[test]
fn test_unparsable_incoming_config_fails_run_without_stamp() {
    let workspace = TestWorkspace::with_framework();
    workspace.write_source(".claude/hooks.json", "[1, 2, 3]");

    workspace
        .install_cmd()
        .assert()
        .code(4)
        .stdout(predicate::str::contains(".claude/hooks.json (failed)"))
        .stdout(predicate::str::contains(".mcp.json (created)"));

    // Other items still completed
    assert!(workspace.file_exists(".mcp.json"));
    assert!(workspace.file_exists(".claude/agents/cvf-planner.md"));
    assert!(!workspace.file_exists(".claude/.vibe-flow-version.json"));
}

#[test]
fn test_debug_prints_diagnostic_code() {
    let workspace = TestWorkspace::with_framework();

    workspace
        .install_cmd()
        .env("DEBUG", "1")
        .args(["--profile", "nightly"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("vibe_flow::config::unknown_profile"))
        .stderr(predicate::str::contains("UnknownProfile"));
}

#[cfg(unix)]
#[test]
fn test_permission_denied_on_framework_root() {
    use std::os::unix::fs::PermissionsExt;

    let workspace = TestWorkspace::with_framework();
    let framework_root = workspace.path.join(".claude");
    std::fs::create_dir_all(&framework_root).unwrap();
    std::fs::set_permissions(&framework_root, std::fs::Permissions::from_mode(0o555)).unwrap();

    if !common::permissions_enforced(&framework_root) {
        std::fs::set_permissions(&framework_root, std::fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let assert = workspace.install_cmd().assert();
    std::fs::set_permissions(&framework_root, std::fs::Permissions::from_mode(0o755)).unwrap();

    assert
        .code(5)
        .stderr(predicate::str::contains("Permission denied"));
    assert!(workspace.leftover_work_areas().is_empty());
    assert!(!workspace.file_exists(".claude/.vibe-flow-version.json"));
}

#[cfg(unix)]
fn write_script(path: &std::path::Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_network_failure_exits_3_and_cleans_up() {
    let workspace = TestWorkspace::new();
    let bin = workspace.temp.path().join("bin");
    write_script(
        &bin.join("curl"),
        "#!/bin/sh\necho 'curl: (22) The requested URL returned error: 404' >&2\nexit 22\n",
    );
    let path = format!(
        "{}:{}",
        bin.display(),
        std::env::var("PATH").unwrap_or_default()
    );

    workspace
        .cmd()
        .env("PATH", path)
        .args(["--repo", "example/does-not-exist"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("404"))
        .stderr(predicate::str::contains("internet connection"));

    assert!(workspace.leftover_work_areas().is_empty());
    assert_eq!(std::fs::read_dir(&workspace.path).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn test_rejected_archive_is_filesystem_error() {
    let workspace = TestWorkspace::new();
    let bin = workspace.temp.path().join("bin");
    write_script(
        &bin.join("curl"),
        "#!/bin/sh\necho 'curl: (23) Failure writing output to destination' >&2\nexit 23\n",
    );
    write_script(
        &bin.join("tar"),
        "#!/bin/sh\necho 'tar: Error is not recoverable: exiting now' >&2\nexit 2\n",
    );
    let path = format!(
        "{}:{}",
        bin.display(),
        std::env::var("PATH").unwrap_or_default()
    );

    workspace
        .cmd()
        .env("PATH", path)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("not recoverable"));

    assert!(workspace.leftover_work_areas().is_empty());
}

#[test]
fn test_missing_curl_exits_6() {
    let workspace = TestWorkspace::new();
    let empty_bin = workspace.temp.path().join("empty-bin");
    std::fs::create_dir_all(&empty_bin).unwrap();

    workspace
        .cmd()
        .env("PATH", &empty_bin)
        .assert()
        .code(6)
        .stderr(predicate::str::contains("curl"));

    assert!(workspace.leftover_work_areas().is_empty());
}
