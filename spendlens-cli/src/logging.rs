use tracing_subscriber::EnvFilter;

/// Filter directives covering the binary and the library crates.
pub fn directives(level: &str) -> String {
    format!("spendlens={level},spendlens_core={level},spendlens_ingest={level}")
}

/// Install the stderr subscriber. `RUST_LOG` wins over the configured level.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
