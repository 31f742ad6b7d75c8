use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use client_registry::cli::{self, Cli};
use client_registry::{config, db};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Diagnostics go to stderr so stdout only carries results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Every failure is reported the same way and the process still exits cleanly
    if let Err(err) = run(cli).await {
        eprintln!("ERROR: {:#}", err);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let config = config::init(cli.database_url.clone())?;

    // Initialize database connection
    let mut repo = db::init(&config).await?;

    let mut stdout = io::stdout().lock();
    let result = cli::execute(cli.command(), &mut repo, &mut stdout).await;

    cli::settle(result, repo.close().await)
}
