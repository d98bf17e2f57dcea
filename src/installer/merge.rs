//! Merge policy for JSON configuration files
//!
//! The destination always wins. For each top-level key of the incoming document:
//!
//! ```text
//! both arrays       -> append incoming elements not already present (deep equality)
//! both objects      -> add sub-keys missing from the destination (one level only)
//! missing in dest   -> add the key with the incoming value
//! anything else     -> keep the destination value
//! ```
//!
//! ```json
//! Existing: {"mcpServers": {"custom-tool": {"command": "x"}}, "hooks": {"Stop": [1]}}
//! Incoming: {"mcpServers": {"github": {"command": "npx"}}, "hooks": {"Stop": [2]}}
//! Result:   {"mcpServers": {"custom-tool": {"command": "x"}, "github": {"command": "npx"}},
//!            "hooks": {"Stop": [1]}}
//! ```
//!
//! Nothing that exists in the destination is removed or changed, so user edits
//! survive upgrades and merging the same document twice is a no-op.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::domain::{InstallItem, InstallReport, Outcome};
use crate::error::{Result, VibeFlowError, fs_error, read_failed};

use super::file_ops;

/// Suffix of the copy kept before a merged file is rewritten
pub const BACKUP_SUFFIX: &str = ".backup";

/// Suffix of the copy kept when an unparsable destination is replaced
pub const CORRUPT_BACKUP_SUFFIX: &str = ".corrupt.bak";

/// Merge `incoming` into `existing`; returns whether anything was added
pub fn merge_documents(existing: &mut Map<String, Value>, incoming: &Map<String, Value>) -> bool {
    let mut changed = false;

    for (key, incoming_value) in incoming {
        let Some(existing_value) = existing.get_mut(key) else {
            existing.insert(key.clone(), incoming_value.clone());
            changed = true;
            continue;
        };

        match (existing_value, incoming_value) {
            (Value::Array(existing_items), Value::Array(incoming_items)) => {
                for item in incoming_items {
                    if !existing_items.contains(item) {
                        existing_items.push(item.clone());
                        changed = true;
                    }
                }
            }
            (Value::Object(existing_map), Value::Object(incoming_map)) => {
                for (sub_key, sub_value) in incoming_map {
                    if !existing_map.contains_key(sub_key) {
                        existing_map.insert(sub_key.clone(), sub_value.clone());
                        changed = true;
                    }
                }
            }
            _ => {}
        }
    }

    changed
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Parse raw bytes; invalid UTF-8 is a parse failure, never replaced
fn parse_object(content: &[u8]) -> std::result::Result<Map<String, Value>, String> {
    match serde_json::from_slice::<Value>(content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("top-level value is not an object".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

fn render(map: &Map<String, Value>) -> Result<Vec<u8>> {
    let mut out = serde_json::to_vec_pretty(map)?;
    out.push(b'\n');
    Ok(out)
}

/// Path that receives writes for `path`: the link target when `path` is a
/// symlink, so a linked config stays a link
fn write_path(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path).unwrap_or_else(|_| {
            match fs::read_link(path) {
                Ok(link) => path.parent().unwrap_or(Path::new("")).join(link),
                Err(_) => path.to_path_buf(),
            }
        }),
        _ => path.to_path_buf(),
    }
}

/// Reconcile one incoming JSON file with its destination
pub fn reconcile_file(source: &Path, destination: &Path) -> Result<(Outcome, Option<String>)> {
    let source_bytes = fs::read(source).map_err(|e| read_failed(source, e))?;
    let incoming = parse_object(&source_bytes).map_err(|reason| VibeFlowError::ConfigParse {
        path: source.display().to_string(),
        reason,
    })?;

    let resolved = write_path(destination);
    if resolved != destination {
        tracing::debug!(link = %destination.display(), target = %resolved.display(), "json config is a symlink, writing through it");
    }

    if !file_ops::entry_exists(&resolved) {
        file_ops::atomic_write(&resolved, &source_bytes)?;
        return Ok((Outcome::Created, None));
    }

    let existing_bytes = fs::read(&resolved).map_err(|e| read_failed(&resolved, e))?;
    let mut existing = match parse_object(&existing_bytes) {
        Ok(map) => map,
        Err(reason) => {
            let backup = with_suffix(destination, CORRUPT_BACKUP_SUFFIX);
            tracing::warn!(
                path = %destination.display(),
                backup = %backup.display(),
                %reason,
                "destination is not a valid JSON object, backing it up and starting fresh"
            );
            fs::write(&backup, &existing_bytes).map_err(|e| fs_error(&backup, e))?;
            file_ops::atomic_write(&resolved, &source_bytes)?;
            return Ok((
                Outcome::Created,
                Some(format!("replaced unparsable file, backup at {}", backup.display())),
            ));
        }
    };

    if !merge_documents(&mut existing, &incoming) {
        return Ok((Outcome::UpToDate, None));
    }

    let backup = with_suffix(destination, BACKUP_SUFFIX);
    fs::write(&backup, &existing_bytes).map_err(|e| fs_error(&backup, e))?;
    file_ops::atomic_write(&resolved, &render(&existing)?)?;
    Ok((Outcome::Merged, None))
}

/// Reconcile every JSON config. Failures are recorded per item and do not stop
/// the remaining configs.
pub fn reconcile_all(
    source_root: &Path,
    target_root: &Path,
    configs: &[InstallItem],
    report: &mut InstallReport,
) {
    for item in configs {
        let source = item.source_in(source_root);
        if !source.is_file() {
            tracing::debug!(item = %item.name, "json config not in content source");
            report.record_with_detail(&item.name, Outcome::Skipped, super::tree::NOT_PROVIDED);
            continue;
        }

        let destination = item.destination_in(target_root);
        match reconcile_file(&source, &destination) {
            Ok((outcome, detail)) => {
                tracing::debug!(item = %item.name, %outcome, "json config reconciled");
                match detail {
                    Some(detail) => report.record_with_detail(&item.name, outcome, detail),
                    None => report.record(&item.name, outcome),
                }
            }
            Err(e) => {
                tracing::warn!(item = %item.name, error = %e, "failed to reconcile json config");
                report.record_failure(&item.name, e);
            }
        }
    }
}
