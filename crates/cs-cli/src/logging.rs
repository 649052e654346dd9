use tracing_subscriber::EnvFilter;

pub(crate) fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,cs_serial=info"
    } else {
        "warn"
    }
}

/// Logs go to stderr; stdout carries the result protocol.
pub(crate) fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    // A second initialization in the same process keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
