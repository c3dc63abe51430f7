use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trivia_api::db;
use trivia_api::seed::{export_data, import_data};
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Database path
    db_path: PathBuf,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Export categories.csv and questions.csv into a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");
    let cli = Cli::parse();
    let url = format!("sqlite:{}", cli.db_path.display());
    let pool = db::establish_connection(&url)
        .await
        .context("Cannot connect to DB")?;
    db::init_schema(&pool).await?;
    match cli.command {
        Commands::Export { path } => {
            let transferred = export_data(&pool, &path).await.context("Cannot export")?;
            tracing::info!(?transferred, "Exported to {}", path.display());
        }
        Commands::Import { path } => {
            let transferred = import_data(&pool, &path).await.context("Cannot import")?;
            tracing::info!(?transferred, "Imported from {}", path.display());
        }
    }
    pool.close().await;
    Ok(())
}
