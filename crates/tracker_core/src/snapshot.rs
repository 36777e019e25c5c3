//! Export/import of the whole collection as a JSON array.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::Value;
use shared::{domain::JobApplication, error::ImportError};

/// A serialized collection ready to be saved by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub filename: String,
    pub contents: String,
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("job-applications-{}.json", date.format("%Y-%m-%d"))
}

pub fn build_snapshot(jobs: &[JobApplication], date: NaiveDate) -> Result<Snapshot> {
    let contents =
        serde_json::to_string_pretty(jobs).context("failed to serialize job applications")?;
    Ok(Snapshot {
        filename: export_filename(date),
        contents,
    })
}

/// Parses an import payload. The top level must be an array and every entry
/// must have the shape of a [`JobApplication`]; ids must be unique.
pub fn parse_snapshot(blob: &str) -> Result<Vec<JobApplication>, ImportError> {
    let value: Value = serde_json::from_str(blob).map_err(ImportError::Parse)?;
    let Value::Array(entries) = value else {
        return Err(ImportError::NotASequence);
    };

    let records = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value::<JobApplication>(entry)
                .map_err(|source| ImportError::InvalidRecord { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::with_capacity(records.len());
    if let Some(dup) = records.iter().find(|job| !seen.insert(job.id)) {
        return Err(ImportError::DuplicateId(dup.id.0));
    }

    Ok(records)
}

/// Reads a user-selected import file. Resolves exactly once with either the
/// file text or an [`ImportError::Read`].
pub async fn read_snapshot_file(path: impl AsRef<Path>) -> Result<String, ImportError> {
    tokio::fs::read_to_string(path.as_ref())
        .await
        .map_err(ImportError::Read)
}

/// Writes `snapshot` into `dir`, creating the directory when missing.
pub async fn write_snapshot(dir: &Path, snapshot: &Snapshot) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create export directory '{}'", dir.display()))?;
    let path = dir.join(&snapshot.filename);
    tokio::fs::write(&path, snapshot.contents.as_bytes())
        .await
        .with_context(|| format!("failed to write export file '{}'", path.display()))?;
    Ok(path)
}

#[cfg(test)]
#[path = "tests/snapshot_tests.rs"]
mod tests;
