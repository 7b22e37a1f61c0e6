use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::usecase::UseCase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    AddUseCase,
    EditUseCase,
    DeleteUseCase,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::AddUseCase => "add_use_case",
            AuditAction::EditUseCase => "edit_use_case",
            AuditAction::DeleteUseCase => "delete_use_case",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "add_use_case" | "add" => Ok(AuditAction::AddUseCase),
            "edit_use_case" | "edit" => Ok(AuditAction::EditUseCase),
            "delete_use_case" | "delete" => Ok(AuditAction::DeleteUseCase),
            other => Err(format!(
                "unknown action '{}' (expected add_use_case, edit_use_case or delete_use_case)",
                other
            )),
        }
    }
}

/// One line of the audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub use_case: UseCase,
    pub ip: String,
    pub user_agent: String,
}

/// Who performed an action, as far as the log is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditContext {
    pub ip: String,
    pub user_agent: String,
}

impl Default for AuditContext {
    fn default() -> Self {
        Self {
            ip: "unknown".to_string(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// ISO-8601 timestamps with millisecond precision, e.g. `2025-03-01T12:00:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
