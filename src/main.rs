mod analysis;
mod config;
mod error;
mod models;
mod run;
mod store;
mod tracker;
mod util;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config, command) = config::Config::resolve(&args)?;

    // RUST_LOG > --verbose > warn
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if config.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    tracing::debug!(
        data_dir = %config.data_dir().display(),
        anchor = config.forecast_anchor.as_str(),
        "Resolved configuration"
    );
    let mut tracker = tracker::Tracker::open(&config).with_context(|| {
        format!(
            "Failed to open expense store in {}",
            config.data_dir().display()
        )
    })?;

    run::as_cli(&command, &mut tracker)
}
