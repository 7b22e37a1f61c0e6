use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Instant};
use tracing::warn;

use super::log::AuditLog;
use super::types::{AuditAction, AuditContext, AuditRecord};
use crate::usecase::UseCase;

/// Fire-and-forget audit writer.
///
/// `record` returns immediately; the write runs on a spawned task and a
/// failure is reported through `tracing` only. Callers mutate and save
/// their state before recording, and nothing here can undo that.
pub struct AuditDispatcher {
    log: Option<Arc<AuditLog>>,
    context: AuditContext,
    pending: Vec<JoinHandle<()>>,
}

impl AuditDispatcher {
    pub fn new(log: AuditLog, context: AuditContext) -> Self {
        Self {
            log: Some(Arc::new(log)),
            context,
            pending: Vec::new(),
        }
    }

    /// A dispatcher that drops every record.
    pub fn disabled() -> Self {
        Self {
            log: None,
            context: AuditContext::default(),
            pending: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.log.is_some()
    }

    /// Schedule one record for writing. Must be called inside a tokio runtime.
    pub fn record(&mut self, action: AuditAction, use_case: &UseCase) {
        let Some(log) = self.log.clone() else {
            return;
        };

        let record = AuditRecord {
            timestamp: Utc::now(),
            action,
            use_case: use_case.clone(),
            ip: self.context.ip.clone(),
            user_agent: self.context.user_agent.clone(),
        };

        self.pending.push(tokio::spawn(async move {
            if let Err(e) = log.append(&record).await {
                warn!(
                    action = %record.action,
                    use_case = record.use_case.id,
                    error = %e,
                    "audit log write failed"
                );
            }
        }));
    }

    /// Wait for outstanding writes, up to `limit` in total.
    ///
    /// Returns the number of writes that finished. Timeouts and panicked
    /// tasks are logged, never returned as errors.
    pub async fn drain(&mut self, limit: Duration) -> usize {
        let deadline = Instant::now() + limit;
        let mut finished = 0;

        for handle in self.pending.drain(..) {
            match timeout_at(deadline, handle).await {
                Ok(Ok(())) => finished += 1,
                Ok(Err(e)) => warn!(error = %e, "audit log task failed"),
                Err(_) => {
                    warn!(timeout = ?limit, "gave up waiting for audit log writes");
                    break;
                }
            }
        }

        finished
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::LogAccess;
    use crate::usecase::Answers;

    fn use_case() -> UseCase {
        UseCase {
            id: 7,
            name: "Forecasting".to_string(),
            description: "Demand forecasting".to_string(),
            impact: 8,
            effort: 6,
            answers: Answers::new(),
            implementation_type: None,
        }
    }

    #[tokio::test]
    async fn test_records_are_written_after_drain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("use-cases.log");
        let mut dispatcher = AuditDispatcher::new(AuditLog::new(path.clone()), AuditContext::default());

        dispatcher.record(AuditAction::AddUseCase, &use_case());
        dispatcher.record(AuditAction::DeleteUseCase, &use_case());
        assert_eq!(dispatcher.drain(Duration::from_secs(5)).await, 2);
        assert_eq!(dispatcher.pending(), 0);

        let access = AuditLog::new(path).read("k", Some("k")).await.unwrap();
        let LogAccess::Granted(records) = access else {
            panic!("expected access");
        };
        let actions: Vec<AuditAction> = records.iter().map(|r| r.action).collect();
        assert_eq!(actions.len(), 2);
        assert!(actions.contains(&AuditAction::AddUseCase));
        assert!(actions.contains(&AuditAction::DeleteUseCase));
        assert_eq!(records[0].use_case.id, 7);
    }

    #[tokio::test]
    async fn test_write_failure_does_not_propagate() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the log directory should be
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        let log = AuditLog::new(blocker.join("use-cases.log"));
        let mut dispatcher = AuditDispatcher::new(log, AuditContext::default());

        dispatcher.record(AuditAction::AddUseCase, &use_case());
        // The task completes (with a logged warning) rather than erroring out
        assert_eq!(dispatcher.drain(Duration::from_secs(5)).await, 1);
    }

    #[tokio::test]
    async fn test_disabled_dispatcher_drops_records() {
        let mut dispatcher = AuditDispatcher::disabled();
        assert!(!dispatcher.is_enabled());
        dispatcher.record(AuditAction::EditUseCase, &use_case());
        assert_eq!(dispatcher.pending(), 0);
        assert_eq!(dispatcher.drain(Duration::from_millis(10)).await, 0);
    }

    #[tokio::test]
    async fn test_context_is_stamped_on_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("use-cases.log");
        let context = AuditContext {
            ip: "10.0.0.5".to_string(),
            user_agent: "tester".to_string(),
        };
        let mut dispatcher = AuditDispatcher::new(AuditLog::new(path.clone()), context);
        dispatcher.record(AuditAction::AddUseCase, &use_case());
        dispatcher.drain(Duration::from_secs(5)).await;

        let raw = std::fs::read_to_string(path).unwrap();
        assert!(raw.contains("\"ip\":\"10.0.0.5\""));
        assert!(raw.contains("\"userAgent\":\"tester\""));
    }
}
