use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::SaftSubmission;
use crate::core::FacturaError;

/// Persistence behind the [`SubmissionLedger`](super::SubmissionLedger).
///
/// Append-only: entries come back from `load_all` oldest first.
pub trait SubmissionStore {
    fn load_all(&self) -> Result<Vec<SaftSubmission>, FacturaError>;

    fn append(&mut self, submission: SaftSubmission) -> Result<(), FacturaError>;
}

/// Session-lifetime store.
#[derive(Debug, Clone, Default)]
pub struct MemorySubmissionStore {
    entries: Vec<SaftSubmission>,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubmissionStore for MemorySubmissionStore {
    fn load_all(&self) -> Result<Vec<SaftSubmission>, FacturaError> {
        Ok(self.entries.clone())
    }

    fn append(&mut self, submission: SaftSubmission) -> Result<(), FacturaError> {
        self.entries.push(submission);
        Ok(())
    }
}

/// Store persisted as a JSON array in a single file.
///
/// Each append rewrites the file through a sibling temp file and a rename,
/// so readers see either the old or the new array.
#[derive(Debug, Clone)]
pub struct JsonFileSubmissionStore {
    path: PathBuf,
}

fn storage_err(path: &Path, e: impl std::fmt::Display) -> FacturaError {
    FacturaError::Storage(format!("{}: {e}", path.display()))
}

impl JsonFileSubmissionStore {
    /// Use `path`; the file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, entries: &[SaftSubmission]) -> Result<(), FacturaError> {
        let json = serde_json::to_vec_pretty(entries).map_err(|e| storage_err(&self.path, e))?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json).map_err(|e| storage_err(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| storage_err(&self.path, e))
    }
}

impl SubmissionStore for JsonFileSubmissionStore {
    fn load_all(&self) -> Result<Vec<SaftSubmission>, FacturaError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(storage_err(&self.path, e)),
        };
        serde_json::from_slice(&bytes).map_err(|e| storage_err(&self.path, e))
    }

    fn append(&mut self, submission: SaftSubmission) -> Result<(), FacturaError> {
        let mut entries = self.load_all()?;
        entries.push(submission);
        self.write_all(&entries)?;
        debug!(path = %self.path.display(), entries = entries.len(), "submission store written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CompanyBuilder, ReportingPeriod};
    use crate::saft::SubmissionKind;
    use chrono::{TimeZone, Utc};

    fn submission(month: u32) -> SaftSubmission {
        let company = CompanyBuilder::new("c1", "Tech Solutions Lda", "5000000000").build();
        SaftSubmission::generated(
            &company,
            ReportingPeriod::new(2025, month).unwrap(),
            SubmissionKind::Normal,
            "Administrador",
            Utc.with_ymd_and_hms(2025, month, 1, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn json_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let mut store = JsonFileSubmissionStore::new(&path);
        assert!(store.load_all().unwrap().is_empty());
        let first = submission(1);
        let second = submission(2);
        store.append(first.clone()).unwrap();
        store.append(second.clone()).unwrap();

        let reopened = JsonFileSubmissionStore::new(&path);
        assert_eq!(reopened.load_all().unwrap(), vec![first, second]);
    }

    #[test]
    fn corrupt_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, b"not json").unwrap();
        let store = JsonFileSubmissionStore::new(&path);
        assert!(matches!(store.load_all(), Err(FacturaError::Storage(_))));
    }
}
