use std::path::Path;

use anyhow::Result;
use sqlx_migrator::{Migrate, Plan};

use crate::config::{CloudBackend, Config};

/// Applies pending migrations to the local database and, with the sqlite
/// backend, to the cloud database.
pub async fn migrate(config: &Config) -> Result<()> {
    tracing::info!("Migrating local database {}", config.database.url);
    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    let mut conn = pool.acquire().await?;
    recipebook_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;
    drop(conn);
    pool.close().await;

    if let (CloudBackend::Sqlite, Some(url)) = (config.cloud.backend, &config.cloud.url) {
        tracing::info!("Migrating cloud database {url}");
        let pool = crate::db::create_pool(url, 1).await?;
        let mut conn = pool.acquire().await?;
        recipebook_db::cloud_migrator()?
            .run(&mut *conn, &Plan::apply_all())
            .await?;
        drop(conn);
        pool.close().await;
    }

    tracing::info!("Migrations completed successfully");

    Ok(())
}

/// Drops the local database and migrates it again. Cloud data is kept.
pub async fn reset(config: &Config) -> Result<()> {
    let path = config
        .database
        .url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");

    for file in [path.to_owned(), format!("{path}-wal"), format!("{path}-shm")] {
        if Path::new(&file).exists() {
            std::fs::remove_file(&file)?;
            tracing::warn!("Dropped database file: {file}");
        }
    }

    migrate(config).await
}
