//! Framework manifest shipped inside a content source
//!
//! The manifest is the content source's `package.json`. Only two fields matter:
//! `version`, stamped into the target after a successful run, and the optional
//! `minInstallerVersion`, which gates the run on the installer's own version.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, VibeFlowError, read_failed};

/// Version of this installer binary
pub const INSTALLER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkManifest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub min_installer_version: Option<String>,
}

impl FrameworkManifest {
    /// Read the manifest; a missing or unreadable manifest yields the default
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(manifest)) => manifest,
            Ok(None) => {
                tracing::debug!(path = %path.display(), "no framework manifest in content source");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable framework manifest");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|e| read_failed(path, e))?;
        let manifest = serde_json::from_str(&content).map_err(|e| VibeFlowError::ConfigParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(manifest))
    }

    /// Framework version to stamp, falling back to the installer version
    pub fn framework_version(&self) -> String {
        self.version
            .clone()
            .unwrap_or_else(|| INSTALLER_VERSION.to_string())
    }

    /// Fail when `installer_version` is below `minInstallerVersion`
    pub fn check_installer_version(&self, installer_version: &str) -> Result<()> {
        let Some(required) = self.min_installer_version.as_deref() else {
            return Ok(());
        };

        let (required_version, found_version) = match (
            semver::Version::parse(required.trim_start_matches('v')),
            semver::Version::parse(installer_version.trim_start_matches('v')),
        ) {
            (Ok(r), Ok(f)) => (r, f),
            _ => {
                tracing::warn!(
                    required,
                    installer_version,
                    "cannot compare installer versions, skipping check"
                );
                return Ok(());
            }
        };

        if found_version < required_version {
            return Err(VibeFlowError::RuntimeVersion {
                required: required_version.to_string(),
                found: found_version.to_string(),
            });
        }

        Ok(())
    }
}
