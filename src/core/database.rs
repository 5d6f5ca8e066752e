//! Database - Pool di connessioni condiviso dal processo
//!
//! Il pool viene creato una sola volta all'avvio, le migrazioni in `migrations/`
//! vengono applicate subito dopo. I repository ricevono una copia dell'handle.

use crate::core::Config;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

pub async fn connect_pool(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5))
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .max_lifetime(Duration::from_secs(config.connection_lifetime_secs))
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database ready, migrations applied");

    Ok(pool)
}
