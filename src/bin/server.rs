use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use trivia_api::configuration::get_configuration;
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::{server::app::run_server, telemetry::init_tracing};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the `base` configuration file
    #[clap(long, default_value = "configuration")]
    config_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = get_configuration(&cli.config_dir).context("Failed to read configuration")?;

    let pool = establish_connection(&settings.database.path)
        .await
        .with_context(|| format!("Cannot open {}", settings.database.path.display()))?;

    tracing::info!("Running db migrations...");
    run_migrations(&pool).await?;

    run_server(pool, &settings.application.address()).await
}
