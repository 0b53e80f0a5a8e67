use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

static INSTALLED: OnceLock<Result<(), String>> = OnceLock::new();

/// Checks a `MOBSTATE_LOG` style directive list.
pub fn parse_filter(filter: &str) -> Result<EnvFilter, String> {
    EnvFilter::try_new(filter).map_err(|err| format!("invalid log filter '{}': {}", filter, err))
}

/// Installs the global fmt subscriber. Safe to call more than once; only the
/// first valid call takes effect and later calls report its outcome.
pub fn init(filter: &str) -> Result<(), String> {
    if let Some(installed) = INSTALLED.get() {
        return installed.clone();
    }
    let filter = parse_filter(filter)?;
    INSTALLED
        .get_or_init(|| {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .try_init()
                .map_err(|err| format!("log system init failed: {}", err))
        })
        .clone()
}
