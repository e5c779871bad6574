use {super::*, anyhow::Context, tracing_appender::non_blocking::WorkerGuard};

pub fn logs_enabled() -> bool {
    std::env::var_os("RUST_LOG").is_some()
}

fn filter() -> EnvFilter {
    if logs_enabled() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("warn,auxminer=info")
    }
}

/// Installs the global subscriber. Keep the returned guard alive for as
/// long as log lines should be flushed to stderr.
pub fn init() -> Result<WorkerGuard> {
    let (writer, guard) = non_blocking(io::stderr());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(writer)
                .with_filter(filter()),
        )
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(guard)
}
