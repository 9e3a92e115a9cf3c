use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Picks the active filter: `RUST_LOG` first, then the configured filter.
pub fn resolve_log_filter(configured: Option<&str>) -> String {
    std::env::var("RUST_LOG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| {
            configured
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Installs the global fmt subscriber on stderr. Safe to call more than once.
pub fn init_tracing(configured: Option<&str>) {
    let filter = EnvFilter::try_new(resolve_log_filter(configured))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
