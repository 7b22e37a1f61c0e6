use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_dir, get_config_path, AuditConfig, Config};
use crate::prompt::Prompter;

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, it is offered as the config file location.
/// `read_secret` reads the log access key; the binary passes a no-echo
/// terminal reader. Returns the written path, or None when the user
/// declines to overwrite an existing file.
pub fn run_init_wizard<R, W, F>(
    prompter: &mut Prompter<R, W>,
    default_path: Option<PathBuf>,
    mut read_secret: F,
) -> Result<Option<PathBuf>>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Result<String>,
{
    let config_dir = get_config_dir()?;

    prompter.say("")?;
    prompter.say("AI Prioritization Configuration")?;
    prompter.say("===============================")?;
    prompter.say("")?;

    // 1. Use case storage
    let default_store = config_dir.join("use-cases.json").display().to_string();
    let store = prompter.ask_with_default("Where should use cases be stored?", &default_store)?;
    let store_path = (store != default_store).then(|| PathBuf::from(store));

    // 2. Audit log
    prompter.say("")?;
    prompter.say("Every add, edit and delete can be recorded in an audit log.")?;
    let enabled = prompter.ask_yes_no("Keep an audit log?", true)?;

    let audit = if enabled {
        let default_log = config_dir
            .join("logs")
            .join("use-cases.log")
            .display()
            .to_string();
        let log = prompter.ask_with_default("Audit log location", &default_log)?;

        prompter.say("Reading the log back requires an access key. Leave it empty to keep the log write-only.")?;
        let key = read_secret("Access key: ")?.trim().to_string();

        let client_ip = prompter.ask_with_default("Client address recorded with each entry", "unknown")?;

        AuditConfig {
            enabled: true,
            path: (log != default_log).then(|| PathBuf::from(log)),
            access_key: (!key.is_empty()).then_some(key),
            client_ip: (client_ip != "unknown").then_some(client_ip),
        }
    } else {
        AuditConfig {
            enabled: false,
            ..AuditConfig::default()
        }
    };

    // 3. Config path
    let default_config_path = match default_path {
        Some(path) => path,
        None => get_config_path()?,
    };
    prompter.say("")?;
    let path_str = prompter.ask_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompter.ask_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            prompter.say("Aborted.")?;
            return Ok(None);
        }
    }

    // 4. Write config
    let config = Config { store_path, audit };

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    prompter.say("")?;
    prompter.say(&format!("Config written to {}", config_path.display()))?;
    prompter.say("Run `ai-prio add` to score your first use case.")?;

    Ok(Some(config_path))
}
