mod init;
mod schema;

pub use init::run_init_wizard;
pub use schema::{AuditConfig, Config};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::audit::AuditContext;

/// Environment variable that overrides `audit.access_key`
pub const LOG_KEY_ENV: &str = "AI_PRIO_LOG_KEY";

/// Get the config directory path (~/.config/ai-prio/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("ai-prio"))
}

/// Get the default config file path (~/.config/ai-prio/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path (~/.config/ai-prio/config.yaml)
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed or has unknown keys
///
/// A missing file at the default path is not an error; defaults apply.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let mut config = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            read_config(&path)?
        }
        None => {
            let path = get_config_path()?;
            if path.exists() {
                read_config(&path)?
            } else {
                debug!(path = %path.display(), "no config file, using defaults");
                Config::default()
            }
        }
    };

    apply_log_key_override(&mut config, std::env::var(LOG_KEY_ENV).ok());
    Ok(config)
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", path.display()))?;

    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// A trimmed, non-empty override replaces the configured access key.
fn apply_log_key_override(config: &mut Config, value: Option<String>) {
    if let Some(key) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        config.audit.access_key = Some(key);
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

impl Config {
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store_path {
            Some(path) => Ok(expand_tilde(path)),
            None => crate::usecase::get_store_path(),
        }
    }

    pub fn audit_log_path(&self) -> Result<PathBuf> {
        match &self.audit.path {
            Some(path) => Ok(expand_tilde(path)),
            None => Ok(get_config_dir()?.join("logs").join("use-cases.log")),
        }
    }

    pub fn audit_context(&self) -> AuditContext {
        let mut context = AuditContext::default();
        if let Some(ip) = self.audit.client_ip.as_deref().filter(|ip| !ip.trim().is_empty()) {
            context.ip = ip.trim().to_string();
        }
        context
    }
}
