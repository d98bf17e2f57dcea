//! Version stamp of the last successful installation
//!
//! The stamp is informational: it is written at the end of every successful run
//! and read back only to log whether a run is a fresh install or an upgrade.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::manifest::INSTALLER_VERSION;
use crate::error::Result;
use crate::installer::file_ops;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionStamp {
    /// Framework version that was installed
    pub version: String,

    pub installed_at: DateTime<Utc>,

    #[serde(default)]
    pub installer_version: Option<String>,

    #[serde(default)]
    pub profile: Option<String>,
}

impl VersionStamp {
    /// Stamp for a run finishing now
    pub fn now(version: impl Into<String>, profile: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            installed_at: Utc::now(),
            installer_version: Some(INSTALLER_VERSION.to_string()),
            profile: Some(profile.into()),
        }
    }

    /// Read a stamp; absence and corruption both yield `None`
    pub fn read(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "cannot read version stamp");
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(stamp) => Some(stamp),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt version stamp");
                None
            }
        }
    }

    /// Write the stamp, replacing any previous one
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        file_ops::atomic_write(path, json.as_bytes())?;
        tracing::debug!(path = %path.display(), version = %self.version, "wrote version stamp");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let path = temp.path().join(".claude/.vibe-flow-version.json");

        let stamp = VersionStamp::now("2.1.0", "current");
        stamp.write(&path).unwrap();

        assert_eq!(VersionStamp::read(&path), Some(stamp));
    }

    #[test]
    fn test_written_json_shape() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let path = temp.path().join("stamp.json");
        VersionStamp::now("1.0.0", "legacy").write(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["profile"], "legacy");
        let installed_at = value["installedAt"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(installed_at).is_ok());
    }

    #[test]
    fn test_write_overwrites_unconditionally() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let path = temp.path().join("stamp.json");
        VersionStamp::now("9.9.9", "current").write(&path).unwrap();
        VersionStamp::now("1.0.0", "current").write(&path).unwrap();

        assert_eq!(VersionStamp::read(&path).unwrap().version, "1.0.0");
    }

    #[test]
    fn test_read_missing_and_corrupt() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let path = temp.path().join("stamp.json");
        assert!(VersionStamp::read(&path).is_none());

        std::fs::write(&path, "{\"version\": ").unwrap();
        assert!(VersionStamp::read(&path).is_none());
    }

    #[test]
    fn test_read_stamp_without_optional_fields() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let path = temp.path().join("stamp.json");
        std::fs::write(
            &path,
            r#"{"version": "0.9.0", "installedAt": "2025-01-02T03:04:05Z"}"#,
        )
        .unwrap();

        let stamp = VersionStamp::read(&path).unwrap();
        assert_eq!(stamp.version, "0.9.0");
        assert!(stamp.installer_version.is_none());
    }
}
