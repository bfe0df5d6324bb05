use std::sync::Arc;

use cadastre::{
    config::Config,
    error::Error,
    scheduler::Scheduler,
    service::{
        cache::{
            store::{CacheStore, MemoryStore},
            StatisticsCache,
        },
        dashboard::DashboardService,
    },
    startup,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadastre=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config).await {
        tracing::error!("Fatal error: {:?}", e);
        std::process::exit(1);
    }
}

async fn run(config: &Config) -> Result<(), Error> {
    let db = startup::connect_to_database(config).await?;

    // Valkey being down is a degraded mode, not a startup failure: the
    // cache falls back to a process-local store until the next restart.
    match startup::connect_to_cache(config).await {
        Ok(store) => serve(config, db, store).await,
        Err(e) => {
            tracing::warn!(
                "Error connecting to Valkey, using the in-memory cache: {:?}",
                e
            );
            serve(config, db, MemoryStore::new()).await
        }
    }
}

async fn serve<S>(config: &Config, db: DatabaseConnection, store: S) -> Result<(), Error>
where
    S: CacheStore + 'static,
{
    let cache = StatisticsCache::new(store);
    let dashboard = Arc::new(DashboardService::new(db, cache));

    let scheduler = Scheduler::new(Arc::clone(&dashboard), config.warmup_cron.clone()).await?;
    scheduler.start().await?;

    // First sweep runs in the background so startup stays fast.
    let warmup = Arc::clone(&dashboard);
    tokio::spawn(async move {
        match warmup.warm_up().await {
            Ok(count) => tracing::info!("Warmed {} dashboard cache entries", count),
            Err(e) => tracing::warn!("Error during initial cache warm-up: {:?}", e),
        }
    });

    tracing::info!("Statistics service started");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");

    Ok(())
}
