use tracing_subscriber::EnvFilter;

/// Installs a stderr fmt subscriber. `RUST_LOG` wins over `fallback`.
/// Calling it again after a subscriber is installed does nothing.
pub fn init_tracing(fallback: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
