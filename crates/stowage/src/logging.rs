use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "STOWAGE_LOG";

/// Install the global subscriber. `STOWAGE_LOG` overrides the level picked
/// from `verbose`.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
