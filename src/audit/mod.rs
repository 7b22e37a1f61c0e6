pub mod dispatch;
pub mod log;
pub mod types;

pub use dispatch::AuditDispatcher;
pub use log::{filter_records, since_cutoff, AuditError, AuditLog, LogAccess};
pub use types::{AuditAction, AuditContext, AuditRecord};
