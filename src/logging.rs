use tracing_subscriber::EnvFilter;

fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "ai_prio=debug,warn"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for table/TSV/JSON output. `RUST_LOG` wins over `-v`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    // A second init (e.g. from tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(false), "warn");
        assert!(default_level(true).contains("ai_prio=debug"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
