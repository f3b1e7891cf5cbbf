use tracing_subscriber::EnvFilter;

/// Filter directives are read from this variable, e.g. `QUIP_LOG=quip=trace`.
pub const LOG_ENV: &str = "QUIP_LOG";

/// Installs the stderr subscriber. Library code only emits `tracing` events;
/// nothing is printed unless the binary calls this.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "quip=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second install (tests, embedding) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
