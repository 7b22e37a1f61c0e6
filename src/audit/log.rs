use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::types::{AuditAction, AuditRecord};

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Audit log I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize audit record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Corrupt audit log entry on line {line}: {source}")]
    Corrupt {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of a key-guarded log read.
#[derive(Debug, Clone, PartialEq)]
pub enum LogAccess {
    Unauthorized,
    Granted(Vec<AuditRecord>),
}

/// Append-only newline-delimited JSON file.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single line. Creates the parent directory on
    /// first use.
    pub async fn append(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| self.io_error(e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), action = %record.action, "appended audit record");
        Ok(())
    }

    /// Read every record, provided `key` equals the configured secret.
    ///
    /// Plain string equality; with no secret configured nothing is readable.
    /// A missing log file is an empty log, not an error.
    pub async fn read(&self, key: &str, secret: Option<&str>) -> Result<LogAccess, AuditError> {
        match secret {
            Some(secret) if secret == key => {}
            _ => return Ok(LogAccess::Unauthorized),
        }

        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LogAccess::Granted(Vec::new())),
            Err(e) => return Err(self.io_error(e)),
        };

        let mut records = Vec::new();
        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(line)
                .map_err(|source| AuditError::Corrupt { line: i + 1, source })?;
            records.push(record);
        }

        Ok(LogAccess::Granted(records))
    }

    fn io_error(&self, source: std::io::Error) -> AuditError {
        AuditError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// The instant `age` before `now`, or None when that falls outside the
/// representable date range.
pub fn since_cutoff(now: DateTime<Utc>, age: std::time::Duration) -> Option<DateTime<Utc>> {
    let delta = chrono::Duration::from_std(age).ok()?;
    now.checked_sub_signed(delta)
}

/// Keep records at or after `since` and, if given, of one action only.
pub fn filter_records(
    records: Vec<AuditRecord>,
    since: Option<DateTime<Utc>>,
    action: Option<AuditAction>,
) -> Vec<AuditRecord> {
    records
        .into_iter()
        .filter(|r| since.map_or(true, |s| r.timestamp >= s))
        .filter(|r| action.map_or(true, |a| r.action == a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::{Answers, UseCase};
    use chrono::{Duration, TimeZone};

    const SECRET: &str = "s3cret";

    fn record(action: AuditAction, hour: u32) -> AuditRecord {
        AuditRecord {
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap(),
            action,
            use_case: UseCase {
                id: 1,
                name: "Triage".to_string(),
                description: "Route tickets".to_string(),
                impact: 6,
                effort: 4,
                answers: Answers::new(),
                implementation_type: None,
            },
            ip: "unknown".to_string(),
            user_agent: "ai-prio/test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_append_writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("logs").join("use-cases.log"));

        log.append(&record(AuditAction::AddUseCase, 10)).await.unwrap();
        log.append(&record(AuditAction::DeleteUseCase, 11)).await.unwrap();

        let raw = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"action\":\"add_use_case\""));
        assert!(raw.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_read_with_correct_key() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("use-cases.log"));
        let first = record(AuditAction::AddUseCase, 10);
        let second = record(AuditAction::EditUseCase, 11);
        log.append(&first).await.unwrap();
        log.append(&second).await.unwrap();

        let access = log.read(SECRET, Some(SECRET)).await.unwrap();
        assert_eq!(access, LogAccess::Granted(vec![first, second]));
    }

    #[tokio::test]
    async fn test_wrong_key_is_unauthorized() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("use-cases.log"));
        log.append(&record(AuditAction::AddUseCase, 10)).await.unwrap();

        assert_eq!(log.read("guess", Some(SECRET)).await.unwrap(), LogAccess::Unauthorized);
        assert_eq!(log.read("", Some(SECRET)).await.unwrap(), LogAccess::Unauthorized);
    }

    #[tokio::test]
    async fn test_no_secret_configured_is_unauthorized() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("use-cases.log"));
        assert_eq!(log.read("", None).await.unwrap(), LogAccess::Unauthorized);
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("never-written.log"));
        assert_eq!(
            log.read(SECRET, Some(SECRET)).await.unwrap(),
            LogAccess::Granted(Vec::new())
        );
    }

    #[tokio::test]
    async fn test_corrupt_line_reports_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("use-cases.log"));
        log.append(&record(AuditAction::AddUseCase, 10)).await.unwrap();
        std::fs::OpenOptions::new()
            .append(true)
            .open(log.path())
            .and_then(|mut f| std::io::Write::write_all(&mut f, b"{oops\n"))
            .unwrap();

        match log.read(SECRET, Some(SECRET)).await {
            Err(AuditError::Corrupt { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected corrupt entry error, got {:?}", other),
        }
    }

    #[test]
    fn test_since_cutoff() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(
            since_cutoff(now, std::time::Duration::from_secs(2 * 3600)),
            Some(now - Duration::hours(2))
        );

        let huge: std::time::Duration = "300000years".parse::<humantime::Duration>().unwrap().into();
        assert_eq!(since_cutoff(now, huge), None);
        assert_eq!(since_cutoff(now, std::time::Duration::MAX), None);
    }

    #[test]
    fn test_filter_records() {
        let records = vec![
            record(AuditAction::AddUseCase, 8),
            record(AuditAction::EditUseCase, 10),
            record(AuditAction::AddUseCase, 12),
        ];
        let since = Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap();

        let recent = filter_records(records.clone(), Some(since), None);
        assert_eq!(recent.len(), 2);

        let adds = filter_records(records.clone(), None, Some(AuditAction::AddUseCase));
        assert_eq!(adds.len(), 2);

        let recent_adds = filter_records(records, Some(since), Some(AuditAction::AddUseCase));
        assert_eq!(recent_adds.len(), 1);
        assert_eq!(recent_adds[0].timestamp, since + Duration::hours(2));
    }
}
