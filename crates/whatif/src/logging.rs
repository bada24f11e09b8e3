//! Tracing setup for the CLI
//!
//! Logs go to stderr so result tables on stdout stay pipeable. The filter
//! comes from `RUST_LOG` when set, otherwise from the `--log-level` flag.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

pub fn init_logging(level: &str) -> color_eyre::Result<()> {
    let default_filter = format!("whatif={level},whatif_core=warn");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    Ok(())
}
