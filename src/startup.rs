use sea_orm::DatabaseConnection;

use crate::{config::Config, error::Error, service::cache::valkey::ValkeyStore};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to Valkey for the statistics cache
pub async fn connect_to_cache(config: &Config) -> Result<ValkeyStore, Error> {
    use fred::prelude::*;

    let valkey_config = Config::from_url(&config.valkey_url)?;
    let pool = Pool::new(valkey_config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    Ok(ValkeyStore::new(pool))
}
