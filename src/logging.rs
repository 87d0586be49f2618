use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs a stdout subscriber. `RUST_LOG` can raise or lower verbosity;
/// without it the crate logs at info.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bank_marketing_etl=info"));

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stdout);

    // try_init: a second call (e.g. from tests) leaves the first subscriber in place
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init();
}
