use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use ai_prio::audit::{
    filter_records, since_cutoff, AuditAction, AuditDispatcher, AuditLog, LogAccess,
};
use ai_prio::config::Config;
use ai_prio::prompt::Prompter;
use ai_prio::ranking::rank_use_cases;
use ai_prio::usecase::{StoreError, UseCase, UseCaseDraft, UseCaseStore};

const EXIT_SUCCESS: i32 = 0;
const EXIT_UNAUTHORIZED: i32 = 1;
const EXIT_STORAGE: i32 = 2;
const EXIT_NOT_FOUND: i32 = 3;
const EXIT_CONFIG: i32 = 4;

/// How long to wait for pending audit writes before exiting
const AUDIT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List use cases ranked by priority (default if no subcommand)
    List {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Score a new use case with the questionnaire
    Add {
        /// Read the answers from a YAML file instead of prompting
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Re-answer the questionnaire for a use case and rescore it
    Edit {
        id: u64,
        /// Read the answers from a YAML file instead of prompting
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Remove a use case
    Delete { id: u64 },
    /// Show one use case with its score breakdown
    Show { id: u64 },
    /// Plot use cases on the impact/effort quadrant
    Chart,
    /// Print the questionnaire
    Questions,
    /// Read the audit log (requires the access key)
    Logs {
        /// Access key (prompted without echo if omitted)
        #[arg(long)]
        key: Option<String>,
        /// Only entries newer than this, e.g. "2h", "7days"
        #[arg(long)]
        since: Option<humantime::Duration>,
        /// Only entries for one action (add_use_case, edit_use_case, delete_use_case)
        #[arg(long)]
        action: Option<AuditAction>,
    },
    /// Write a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "ai-prio")]
#[command(about = "AI use case prioritization on an impact/effort quadrant", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/ai-prio/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// A command outcome that maps onto an exit code.
struct Failure {
    code: i32,
    message: String,
}

impl Failure {
    fn new(code: i32, message: impl Display) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }
}

impl From<StoreError> for Failure {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => Failure::new(EXIT_NOT_FOUND, e),
            StoreError::Invalid(_) => Failure::new(EXIT_CONFIG, e),
        }
    }
}

type CommandResult = Result<(), Failure>;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    ai_prio::logging::init(cli.verbose);

    let command = cli.command.unwrap_or(Commands::List {
        format: OutputFormat::Table,
    });
    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init = command {
        let stdin = std::io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
        let result = ai_prio::config::run_init_wizard(&mut prompter, config_path, |message| {
            rpassword::prompt_password(message).context("Failed to read access key")
        });
        if let Err(e) = result {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match ai_prio::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let mut audit = build_dispatcher(&config);

    let result = match command {
        Commands::List { format } => list(&config, format),
        Commands::Add { from } => add(&config, from.as_deref(), &mut audit),
        Commands::Edit { id, from } => edit(&config, id, from.as_deref(), &mut audit),
        Commands::Delete { id } => delete(&config, id, &mut audit),
        Commands::Show { id } => show(&config, id),
        Commands::Chart => chart(&config),
        Commands::Questions => {
            println!("{}", ai_prio::output::format_questions(ai_prio::output::should_use_colors()));
            Ok(())
        }
        Commands::Logs { key, since, action } => logs(&config, key, since, action).await,
        Commands::Init => Ok(()),
    };

    // The store is already saved; give the audit writes a chance to land.
    audit.drain(AUDIT_DRAIN_TIMEOUT).await;

    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(failure) => {
            eprintln!("{}", failure.message);
            std::process::exit(failure.code);
        }
    }
}

fn build_dispatcher(config: &Config) -> AuditDispatcher {
    if !config.audit.enabled {
        return AuditDispatcher::disabled();
    }
    match config.audit_log_path() {
        Ok(path) => AuditDispatcher::new(AuditLog::new(path), config.audit_context()),
        Err(e) => {
            warn!(error = %e, "audit log disabled: no usable log path");
            AuditDispatcher::disabled()
        }
    }
}

fn open_store(config: &Config) -> Result<(PathBuf, UseCaseStore), Failure> {
    let path = config
        .store_path()
        .map_err(|e| Failure::new(EXIT_CONFIG, format!("Config error: {:#}", e)))?;
    let store = ai_prio::usecase::load_store(&path)
        .map_err(|e| Failure::new(EXIT_STORAGE, format!("Storage error: {:#}", e)))?;
    Ok((path, store))
}

fn save(path: &Path, store: &UseCaseStore) -> CommandResult {
    ai_prio::usecase::save_store(path, store)
        .map_err(|e| Failure::new(EXIT_STORAGE, format!("Storage error: {:#}", e)))
}

/// Answers from `--from FILE`, or the interactive questionnaire
fn read_draft(from: Option<&Path>, initial: Option<&UseCaseDraft>) -> Result<UseCaseDraft, Failure> {
    let draft = match from {
        Some(path) => ai_prio::usecase::load_draft(path),
        None => {
            let stdin = std::io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
            ai_prio::questionnaire::run_questionnaire(&mut prompter, initial)
        }
    };
    draft.map_err(|e| Failure::new(EXIT_CONFIG, format!("{:#}", e)))
}

fn summary(verb: &str, use_case: &UseCase) -> String {
    format!(
        "{} #{} {}: {} (impact {}, effort {}, priority {})",
        verb,
        use_case.id,
        use_case.name,
        use_case.quadrant(),
        use_case.impact,
        use_case.effort,
        ai_prio::output::format_score(use_case.priority_score())
    )
}

fn list(config: &Config, format: OutputFormat) -> CommandResult {
    let (_, store) = open_store(config)?;
    let ranked = rank_use_cases(store.use_cases());

    let output = match format {
        OutputFormat::Table => {
            ai_prio::output::format_scored_table(&ranked, ai_prio::output::should_use_colors())
        }
        OutputFormat::Tsv => ai_prio::output::format_tsv(&ranked),
        OutputFormat::Json => ai_prio::output::format_json(&ranked)
            .map_err(|e| Failure::new(EXIT_STORAGE, format!("Failed to serialize use cases: {}", e)))?,
    };
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn add(config: &Config, from: Option<&Path>, audit: &mut AuditDispatcher) -> CommandResult {
    let (path, mut store) = open_store(config)?;
    let draft = read_draft(from, None)?;

    let added = store.add(draft, Utc::now())?.clone();
    save(&path, &store)?;

    info!(id = added.id, quadrant = %added.quadrant(), "use case added");
    audit.record(AuditAction::AddUseCase, &added);
    println!("{}", summary("Added", &added));
    Ok(())
}

fn edit(config: &Config, id: u64, from: Option<&Path>, audit: &mut AuditDispatcher) -> CommandResult {
    let (path, mut store) = open_store(config)?;
    let current = store
        .get(id)
        .map(UseCase::to_draft)
        .ok_or(StoreError::NotFound(id))?;
    let draft = read_draft(from, Some(&current))?;

    let edited = store.edit(id, draft)?.clone();
    save(&path, &store)?;

    info!(id = edited.id, quadrant = %edited.quadrant(), "use case edited");
    audit.record(AuditAction::EditUseCase, &edited);
    println!("{}", summary("Updated", &edited));
    Ok(())
}

fn delete(config: &Config, id: u64, audit: &mut AuditDispatcher) -> CommandResult {
    let (path, mut store) = open_store(config)?;

    let removed = store.delete(id)?;
    save(&path, &store)?;

    info!(id = removed.id, "use case deleted");
    audit.record(AuditAction::DeleteUseCase, &removed);
    println!("Deleted #{} {}", removed.id, removed.name);
    Ok(())
}

fn show(config: &Config, id: u64) -> CommandResult {
    let (_, store) = open_store(config)?;
    let use_case = store.get(id).ok_or(StoreError::NotFound(id))?;
    println!(
        "{}",
        ai_prio::output::format_use_case_detail(use_case, ai_prio::output::should_use_colors())
    );
    Ok(())
}

fn chart(config: &Config) -> CommandResult {
    let (_, store) = open_store(config)?;
    let ranked = rank_use_cases(store.use_cases());
    println!(
        "{}",
        ai_prio::output::format_quadrant_grid(&ranked, ai_prio::output::should_use_colors())
    );
    Ok(())
}

async fn logs(
    config: &Config,
    key: Option<String>,
    since: Option<humantime::Duration>,
    action: Option<AuditAction>,
) -> CommandResult {
    let key = match key {
        Some(key) => key,
        None => rpassword::prompt_password("Access key: ")
            .map_err(|e| Failure::new(EXIT_UNAUTHORIZED, format!("Failed to read access key: {}", e)))?,
    };

    let path = config
        .audit_log_path()
        .map_err(|e| Failure::new(EXIT_CONFIG, format!("Config error: {:#}", e)))?;
    let access = AuditLog::new(path)
        .read(key.trim(), config.audit.access_key.as_deref())
        .await
        .map_err(|e| Failure::new(EXIT_STORAGE, format!("Audit log error: {}", e)))?;

    let records = match access {
        LogAccess::Unauthorized => {
            return Err(Failure::new(EXIT_UNAUTHORIZED, "Unauthorized: invalid access key"));
        }
        LogAccess::Granted(records) => records,
    };

    let now = Utc::now();
    let cutoff = match since {
        Some(d) => {
            let age: Duration = d.into();
            Some(since_cutoff(now, age).ok_or_else(|| {
                Failure::new(
                    EXIT_CONFIG,
                    format!("Invalid --since: {} is out of range", humantime::format_duration(age)),
                )
            })?)
        }
        None => None,
    };

    let records = filter_records(records, cutoff, action);
    println!(
        "{}",
        ai_prio::output::format_audit_records(&records, now, ai_prio::output::should_use_colors())
    );
    Ok(())
}
