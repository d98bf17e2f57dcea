//! Install command implementation
//!
//! One run, in order:
//! 1. resolve the target directory and the install profile
//! 2. read the previous version stamp (informational only)
//! 3. acquire the work area and decide the context document up front
//! 4. materialize the content source and check its minimum installer version
//! 5. install tree items, reconcile JSON configs, refresh the core rules
//! 6. write the context document if absent
//! 7. stamp the version, unless an item failed
//!
//! The work area is dropped, and removed, on every return path.

use std::path::{Path, PathBuf};

use console::Style;

use crate::cli::InstallArgs;
use crate::config::manifest::INSTALLER_VERSION;
use crate::config::{FrameworkManifest, InstallProfile};
use crate::context::{
    self, ContextDocument, DetectedProjectType, FixedProjectType, ProjectTypeSource,
};
use crate::domain::InstallReport;
use crate::error::{Result, VibeFlowError, fs_error};
use crate::installer::{TreeInstaller, merge, tree};
use crate::inspector;
use crate::progress::ProgressDisplay;
use crate::source::{ContentSource, GitHubTarball, LocalDirectory};
use crate::stamp::VersionStamp;
use crate::temp::WorkArea;
use crate::ui;

/// Run install or upgrade
pub fn run(args: InstallArgs, upgrade: bool) -> Result<()> {
    let target = resolve_target(args.target.as_deref())?;
    let profile = InstallProfile::resolve(&args.profile)?;
    tracing::debug!(target = %target.display(), profile = %profile.name, upgrade, "starting install");

    let stamp_path = target.join(&profile.version_stamp);
    let previous = VersionStamp::read(&stamp_path);
    log_previous_install(previous.as_ref(), upgrade, &target, &profile);

    let work_area = WorkArea::acquire()?;

    let context_document = match &profile.context_document {
        Some(document) => {
            let type_source = project_type_source(&args);
            Some(ContextDocument::prepare(
                &target,
                document,
                type_source.as_ref(),
            )?)
        }
        None => None,
    };

    let source = content_source(&args);
    ui::print_banner(INSTALLER_VERSION, &source.describe(), &target);
    let source_root = source.materialize(work_area.path())?;

    let manifest = profile
        .manifest
        .as_ref()
        .map(|m| FrameworkManifest::load(&source_root.join(m)))
        .unwrap_or_default();
    manifest.check_installer_version(INSTALLER_VERSION)?;
    let version = manifest.framework_version();
    tracing::debug!(framework = ?manifest.name, %version, source = %source_root.display(), "content source ready");

    let mut report = InstallReport::new();

    let progress = ProgressDisplay::new(tree::count_files(&source_root, &profile.items));
    TreeInstaller::new(&source_root, &target, &progress).install_all(&profile.items, &mut report)?;
    progress.finish();

    merge::reconcile_all(&source_root, &target, &profile.json_configs, &mut report);

    if let Some(rules) = &profile.core_rules_document {
        let outcome = context::refresh_core_rules(&target.join(rules), &version)?;
        report.record(rules.display().to_string(), outcome);
    }

    if let (Some(document), Some(state)) = (&profile.context_document, context_document) {
        let name = document.display().to_string();
        match state.write(&target.join(document))? {
            (outcome, Some(detail)) => report.record_with_detail(name, outcome, detail),
            (outcome, None) => report.record(name, outcome),
        }
    }

    ui::print_report(&report);

    if let Some(err) = report.take_failure() {
        tracing::debug!("run had failed items, version stamp not written");
        return Err(err);
    }

    VersionStamp::now(&version, &profile.name).write(&stamp_path)?;
    ui::print_summary(&report, previous.as_ref().map(|s| s.version.as_str()), &version);
    print_next_steps();

    Ok(())
}

/// Absolute target directory; it must already exist
fn resolve_target(target: Option<&Path>) -> Result<PathBuf> {
    let target = match target {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().map_err(|e| fs_error(Path::new("."), e))?,
    };
    let target = std::path::absolute(&target).map_err(|e| fs_error(&target, e))?;

    if !target.is_dir() {
        return Err(VibeFlowError::FileSystem {
            path: target.display().to_string(),
            reason: "target is not an existing directory".to_string(),
        });
    }
    Ok(target)
}

fn content_source(args: &InstallArgs) -> Box<dyn ContentSource> {
    match &args.source {
        Some(dir) => Box::new(LocalDirectory::new(dir)),
        None => Box::new(GitHubTarball::new(&args.repo, &args.git_ref)),
    }
}

fn project_type_source(args: &InstallArgs) -> Box<dyn ProjectTypeSource> {
    match args.project_type {
        Some(project_type) => Box::new(FixedProjectType(project_type)),
        None => Box::new(DetectedProjectType::new(
            !args.yes && console::user_attended(),
        )),
    }
}

fn log_previous_install(
    previous: Option<&VersionStamp>,
    upgrade: bool,
    target: &Path,
    profile: &InstallProfile,
) {
    match previous {
        Some(stamp) => tracing::info!(
            from = %stamp.version,
            installed_at = %stamp.installed_at,
            "upgrading existing installation"
        ),
        None if inspector::has_installed_state(target, profile) => {
            tracing::info!("framework files present without version stamp")
        }
        None => {
            if upgrade {
                tracing::warn!("no existing installation found, performing a fresh install");
            } else {
                tracing::info!("fresh install");
            }
        }
    }
}

fn print_next_steps() {
    let bold = Style::new().bold();
    println!();
    println!("{}", bold.apply_to("Next steps:"));
    println!("  1. Run Claude Code:  claude");
    println!("  2. Initialize:       /claude-vibe-flow:init");
    println!("  3. Start building:   /claude-vibe-flow:new-feature \"Your feature\"");
}
