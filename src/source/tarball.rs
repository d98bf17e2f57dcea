//! GitHub branch tarball content source
//!
//! Equivalent of `curl -fsSL <url> | tar -xz -C <work area>`. Both executables
//! must be on PATH; the archive's single top-level directory becomes the
//! content source root.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::ContentSource;
use crate::error::{Result, VibeFlowError, fs_error};

/// Branch or tag archive of a GitHub repository
#[derive(Debug, Clone)]
pub struct GitHubTarball {
    repo: String,
    git_ref: String,
}

impl GitHubTarball {
    pub fn new(repo: impl Into<String>, git_ref: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            git_ref: git_ref.into(),
        }
    }

    pub fn url(&self) -> String {
        format!(
            "https://github.com/{}/archive/{}.tar.gz",
            self.repo, self.git_ref
        )
    }

    fn network_error(&self, reason: impl Into<String>) -> VibeFlowError {
        VibeFlowError::Network {
            url: self.url(),
            reason: reason.into(),
        }
    }
}

/// curl's exit code when writing to its output failed
const CURL_WRITE_ERROR: i32 = 23;

/// Exit state of one process of the download pipeline
#[derive(Debug)]
struct StepStatus {
    success: bool,
    code: Option<i32>,
    reason: String,
}

impl GitHubTarball {
    /// Error of a finished `curl | tar` pipeline, if any. A tar failure makes curl
    /// die with a write error, so that case is reported as the tar failure.
    fn pipeline_error(
        &self,
        work_area: &Path,
        curl: StepStatus,
        tar: StepStatus,
    ) -> Option<VibeFlowError> {
        let tar_error = || VibeFlowError::FileSystem {
            path: work_area.display().to_string(),
            reason: tar.reason.clone(),
        };

        if !curl.success {
            if !tar.success && curl.code == Some(CURL_WRITE_ERROR) {
                tracing::debug!(curl = %curl.reason, tar_code = ?tar.code, "tar rejected the download stream");
                return Some(tar_error());
            }
            return Some(self.network_error(curl.reason));
        }
        if !tar.success {
            return Some(tar_error());
        }
        None
    }
}

/// Locate a required executable on PATH
pub fn require_executable(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|e| {
        tracing::debug!(executable = name, error = %e, "dependency lookup failed");
        VibeFlowError::Dependency {
            name: name.to_string(),
        }
    })
}

fn spawn_error(name: &str, err: std::io::Error) -> VibeFlowError {
    match err.kind() {
        std::io::ErrorKind::NotFound => VibeFlowError::Dependency {
            name: name.to_string(),
        },
        _ => VibeFlowError::Unknown {
            message: format!("failed to run {name}: {err}"),
        },
    }
}

fn first_line(bytes: &[u8]) -> Option<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

/// The single directory an archive unpacked into
fn extracted_root(work_area: &Path) -> Result<PathBuf> {
    let entries = std::fs::read_dir(work_area).map_err(|e| fs_error(work_area, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| fs_error(work_area, e))?;
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            dirs.push(entry.path());
        }
    }
    dirs.sort();

    match dirs.len() {
        1 => Ok(dirs.remove(0)),
        0 => Err(VibeFlowError::FileSystem {
            path: work_area.display().to_string(),
            reason: "downloaded archive contained no directory".to_string(),
        }),
        n => {
            tracing::debug!(count = n, "archive has several top-level directories, using the first");
            Ok(dirs.remove(0))
        }
    }
}

impl ContentSource for GitHubTarball {
    fn describe(&self) -> String {
        format!("{}@{}", self.repo, self.git_ref)
    }

    fn materialize(&self, work_area: &Path) -> Result<PathBuf> {
        let curl_path = require_executable("curl")?;
        let tar_path = require_executable("tar")?;
        let url = self.url();

        tracing::debug!(%url, work_area = %work_area.display(), "downloading framework tarball");
        let pb = crate::progress::fetch_spinner(&self.describe());

        let mut curl = Command::new(&curl_path)
            .args(["-fsSL", &url])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error("curl", e))?;

        let Some(curl_stdout) = curl.stdout.take() else {
            pb.finish_and_clear();
            return Err(self.network_error("curl produced no output stream"));
        };

        let tar_result = Command::new(&tar_path)
            .arg("-xz")
            .arg("-C")
            .arg(work_area)
            .stdin(Stdio::from(curl_stdout))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output();

        let curl_status = curl.wait();
        let mut curl_stderr = Vec::new();
        if let Some(mut stderr) = curl.stderr.take() {
            if let Err(e) = stderr.read_to_end(&mut curl_stderr) {
                tracing::debug!(error = %e, "failed to read curl stderr");
            }
        }
        pb.finish_and_clear();

        let curl_status = curl_status.map_err(|e| spawn_error("curl", e))?;
        let tar_output = tar_result.map_err(|e| spawn_error("tar", e))?;

        let curl = StepStatus {
            success: curl_status.success(),
            code: curl_status.code(),
            reason: first_line(&curl_stderr)
                .unwrap_or_else(|| format!("curl exited with {curl_status}")),
        };
        let tar = StepStatus {
            success: tar_output.status.success(),
            code: tar_output.status.code(),
            reason: first_line(&tar_output.stderr)
                .unwrap_or_else(|| format!("tar exited with {}", tar_output.status)),
        };
        if let Some(err) = self.pipeline_error(work_area, curl, tar) {
            return Err(err);
        }

        let root = extracted_root(work_area)?;
        tracing::debug!(root = %root.display(), "framework tarball extracted");
        Ok(root)
    }
}
