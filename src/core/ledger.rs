//! Durable run state: the result ledger and the failure list.
//!
//! The ledger file is the single source of truth for per-project outcomes.
//! One mutex guards both the full read-modify-write cycle on the ledger file
//! and the append-only failure list, so concurrent workers never lose
//! updates; this is the only correctness-critical region in the system.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::core::errors::RunError;

/// Ledger file name, written into the fleet root.
pub const LEDGER_FILE: &str = "build-ledger.json";

/// Failure report file name, written into the fleet root.
pub const FAILURE_REPORT_FILE: &str = "failed-projects.json";

/// Build outcome for one project.
///
/// Stored on disk as the integer codes 0/1/2. A project is `Pending` from
/// run start until exactly one worker moves it to a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ProjectStatus {
    Pending,
    Success,
    Failed,
}

impl From<ProjectStatus> for u8 {
    fn from(status: ProjectStatus) -> u8 {
        match status {
            ProjectStatus::Pending => 0,
            ProjectStatus::Success => 1,
            ProjectStatus::Failed => 2,
        }
    }
}

impl TryFrom<u8> for ProjectStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ProjectStatus::Pending),
            1 => Ok(ProjectStatus::Success),
            2 => Ok(ProjectStatus::Failed),
            other => Err(format!("unknown status code {}", other)),
        }
    }
}

/// Shared, durable project-status ledger plus the append-only failure list.
pub struct ResultLedger {
    path: PathBuf,
    /// Failure list; the lock also serializes every ledger file access.
    shared: Mutex<Vec<PathBuf>>,
}

impl ResultLedger {
    /// Create the ledger file with every project `Pending`.
    ///
    /// The file is rewritten in full, discarding any previous run's state.
    pub fn initialize(path: impl Into<PathBuf>, projects: &[PathBuf]) -> Result<Self, RunError> {
        let path = path.into();
        let map: BTreeMap<String, ProjectStatus> = projects
            .iter()
            .map(|p| (p.display().to_string(), ProjectStatus::Pending))
            .collect();
        write_map(&path, &map)?;

        Ok(ResultLedger {
            path,
            shared: Mutex::new(Vec::new()),
        })
    }

    /// Record a terminal status for one project.
    ///
    /// The whole read-modify-write cycle runs under the lock; the new status
    /// is durable by the time this returns.
    pub fn record(&self, project: &Path, status: ProjectStatus) -> Result<(), RunError> {
        let mut failures = self.lock_shared();

        let mut map = read_map(&self.path)?;
        map.insert(project.display().to_string(), status);
        write_map(&self.path, &map)?;

        if status == ProjectStatus::Failed {
            failures.push(project.to_path_buf());
        }
        Ok(())
    }

    /// Projects recorded as failed so far, in completion order.
    pub fn failures(&self) -> Vec<PathBuf> {
        self.lock_shared().clone()
    }

    /// Write the failure report, in full, once at run end.
    pub fn write_failure_report(&self, path: &Path) -> Result<(), RunError> {
        let failures = self.lock_shared();
        let entries: Vec<String> = failures.iter().map(|p| p.display().to_string()).collect();
        let raw = serde_json::to_string_pretty(&entries)
            .map_err(|e| ledger_io(path, e.to_string()))?;
        std::fs::write(path, raw).map_err(|e| ledger_io(path, e.to_string()))?;
        Ok(())
    }

    /// Read the current full mapping.
    pub fn snapshot(&self) -> Result<BTreeMap<String, ProjectStatus>, RunError> {
        let _guard = self.lock_shared();
        read_map(&self.path)
    }

    fn lock_shared(&self) -> std::sync::MutexGuard<'_, Vec<PathBuf>> {
        // A poisoned lock still holds a valid failure list; a panicking
        // worker must not block its siblings from recording.
        self.shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn read_map(path: &Path) -> Result<BTreeMap<String, ProjectStatus>, RunError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ledger_io(path, e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| ledger_io(path, e.to_string()))
}

fn write_map(path: &Path, map: &BTreeMap<String, ProjectStatus>) -> Result<(), RunError> {
    let raw = serde_json::to_string_pretty(map).map_err(|e| ledger_io(path, e.to_string()))?;
    std::fs::write(path, raw).map_err(|e| ledger_io(path, e.to_string()))
}

fn ledger_io(path: &Path, reason: String) -> RunError {
    RunError::LedgerIo {
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn projects(tmp: &TempDir, names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|n| tmp.path().join(n)).collect()
    }

    #[test]
    fn test_initialize_writes_all_pending() {
        let tmp = TempDir::new().unwrap();
        let projects = projects(&tmp, &["a", "b"]);
        let ledger = ResultLedger::initialize(tmp.path().join(LEDGER_FILE), &projects).unwrap();

        let map = ledger.snapshot().unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.values().all(|s| *s == ProjectStatus::Pending));
    }

    #[test]
    fn test_record_persists_immediately() {
        let tmp = TempDir::new().unwrap();
        let projects = projects(&tmp, &["a", "b"]);
        let ledger = ResultLedger::initialize(tmp.path().join(LEDGER_FILE), &projects).unwrap();

        ledger.record(&projects[0], ProjectStatus::Success).unwrap();

        // The file itself reflects the transition, not just in-memory state.
        let raw = std::fs::read_to_string(tmp.path().join(LEDGER_FILE)).unwrap();
        let map: BTreeMap<String, u8> = serde_json::from_str(&raw).unwrap();
        assert_eq!(map[&projects[0].display().to_string()], 1);
        assert_eq!(map[&projects[1].display().to_string()], 0);
    }

    #[test]
    fn test_failures_match_failed_entries() {
        let tmp = TempDir::new().unwrap();
        let projects = projects(&tmp, &["a", "b", "c"]);
        let ledger = ResultLedger::initialize(tmp.path().join(LEDGER_FILE), &projects).unwrap();

        ledger.record(&projects[0], ProjectStatus::Success).unwrap();
        ledger.record(&projects[1], ProjectStatus::Failed).unwrap();
        ledger.record(&projects[2], ProjectStatus::Failed).unwrap();

        assert_eq!(ledger.failures(), vec![projects[1].clone(), projects[2].clone()]);

        let report = tmp.path().join(FAILURE_REPORT_FILE);
        ledger.write_failure_report(&report).unwrap();
        let entries: Vec<String> =
            serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.contains(&projects[1].display().to_string()));
    }

    #[test]
    fn test_concurrent_records_lose_nothing() {
        let tmp = TempDir::new().unwrap();
        let projects: Vec<PathBuf> = (0..16).map(|i| tmp.path().join(format!("p{i}"))).collect();
        let ledger = ResultLedger::initialize(tmp.path().join(LEDGER_FILE), &projects).unwrap();

        std::thread::scope(|scope| {
            for (i, project) in projects.iter().enumerate() {
                let ledger = &ledger;
                scope.spawn(move || {
                    let status = if i % 3 == 0 {
                        ProjectStatus::Failed
                    } else {
                        ProjectStatus::Success
                    };
                    ledger.record(project, status).unwrap();
                });
            }
        });

        let map = ledger.snapshot().unwrap();
        assert_eq!(map.len(), 16);
        assert!(map.values().all(|s| *s != ProjectStatus::Pending));

        let failed_in_map = map.values().filter(|s| **s == ProjectStatus::Failed).count();
        assert_eq!(ledger.failures().len(), failed_in_map);
    }

    #[test]
    fn test_status_codes_round_trip() {
        for status in [ProjectStatus::Pending, ProjectStatus::Success, ProjectStatus::Failed] {
            assert_eq!(ProjectStatus::try_from(u8::from(status)).unwrap(), status);
        }
        assert!(ProjectStatus::try_from(7u8).is_err());
    }
}
