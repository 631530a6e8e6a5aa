/// Installs the global tracing subscriber.
///
/// Verbosity comes from `RUST_LOG` (default `info`); timestamps are uptime so
/// request latencies read directly off the log.
///
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=storefront_core::clients=debug,info cargo run
/// ```
pub fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // A second call (tests, embedding binaries) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_target(true)
        .compact()
        .try_init();
}
