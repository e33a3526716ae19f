//! Phpgate server entrypoint.
//!
//! Parses the CLI, builds the immutable validator, and serves the HTTP API.

mod adapter;
mod cli;
mod response;
mod routes;

use clap::Parser;
use cli::Cli;
use routes::AppState;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(cli) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

#[tokio::main]
async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let validator = cli.validator()?;
    let versions: Vec<&str> = validator.bindings().versions().collect();
    tracing::info!(
        listen = %cli.listen,
        versions = ?versions,
        jobs = cli.jobs,
        suffix = %cli.suffix,
        "phpgate listening"
    );

    let app = routes::router(AppState::new(validator), cli.max_upload_bytes);
    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
