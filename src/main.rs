//! folio CLI entrypoint

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio::cli::{Cli, Outcome};

fn main() -> Result<ExitCode> {
    // Initialize tracing (stderr, so table output stays clean)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Parse and execute CLI
    let cli = Cli::parse();
    match cli.execute()? {
        Outcome::Done => Ok(ExitCode::SUCCESS),
        Outcome::NotFound => Ok(ExitCode::from(2)),
    }
}
