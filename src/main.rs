use std::sync::Arc;

use tracing::info;

use feedhub::rss::{HttpFetcher, PollScheduler};
use feedhub::{db, Config, Result, WebServer};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };
    config.validate()?;

    // Initialize logging
    if let Err(e) = feedhub::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        feedhub::logging::init_console_only(&config.logging.level);
    }

    info!("feedhub - RSS feed aggregation service");

    let pool = db::connect(&config.database.url).await?;
    db::migrate(&pool).await?;
    info!("Database ready at {}", config.database.url);

    let fetcher = Arc::new(HttpFetcher::new(&config.scheduler)?);
    let scheduler = PollScheduler::new(pool.clone(), fetcher, &config.scheduler);
    tokio::spawn(scheduler.run());

    let server = WebServer::new(&config.server, pool)?;
    server.run().await
}
