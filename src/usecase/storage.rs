use super::store::{UseCaseStore, STORE_VERSION};
use super::types::UseCaseDraft;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Get the default state file path (~/.config/ai-prio/use-cases.json)
pub fn get_store_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("use-cases.json"))
}

/// Load the use case list from a JSON file
///
/// If the file doesn't exist, returns a new empty store.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_store(path: &Path) -> Result<UseCaseStore> {
    if !path.exists() {
        debug!(path = %path.display(), "no state file yet, starting empty");
        return Ok(UseCaseStore::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open use case file at {}", path.display()))?;

    let store: UseCaseStore = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load use cases from {}", path.display()))?;

    if store.version != STORE_VERSION {
        anyhow::bail!("Unsupported use case file version: {}", store.version);
    }

    debug!(path = %path.display(), count = store.len(), "loaded use cases");
    Ok(store)
}

/// Save the use case list to a JSON file atomically
///
/// The file is never left half-written. Creates the parent directory if
/// it doesn't exist.
pub fn save_store(path: &Path, store: &UseCaseStore) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, store).context("Failed to serialize use cases")?;

    file.commit().context("Failed to save use cases")?;

    debug!(path = %path.display(), count = store.len(), "saved use cases");
    Ok(())
}

/// Read a questionnaire draft from a YAML (or JSON) file, for `add --from`
pub fn load_draft(path: &Path) -> Result<UseCaseDraft> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read use case file at {}", path.display()))?;

    serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse use case: invalid YAML in {}", path.display()))
}
