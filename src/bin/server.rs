use anyhow::Context;
use trivia_api::configuration::get_settings;
use trivia_api::db;
use trivia_api::server::app::run_server;
use trivia_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = get_settings().context("Failed to load settings, is DATABASE_URL set?")?;
    init_tracing(&settings.log_level);

    let pool = db::establish_connection(&settings.database_url)
        .await
        .context("Cannot connect to DB")?;
    tracing::info!("Preparing database schema...");
    db::init_schema(&pool)
        .await
        .context("Failed to prepare database schema")?;

    run_server(pool.clone(), &settings.address()).await?;
    pool.close().await;
    Ok(())
}
