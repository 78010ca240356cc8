use std::sync::Arc;

use anyhow::Result;
use recipebook_cloud::{AccountService, ListService, StorageService, memory, sql};

use crate::config::{CloudBackend, Config};

pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting recipebook server...");

    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    super::migrate(&config).await?;

    // Write pool: 1 connection for every write and transaction
    let write_pool = crate::db::create_write_pool(&config.database.url).await?;
    let read_pool =
        crate::db::create_read_pool(&config.database.url, config.database.max_connections).await?;

    let mut cloud_pool = None;
    let (storage, lists, accounts) = match (config.cloud.backend, &config.cloud.url) {
        (CloudBackend::Sqlite, Some(url)) => {
            let pool = crate::db::create_pool(url, config.database.max_connections).await?;
            cloud_pool = Some(pool.clone());
            tracing::info!("Using sqlite cloud backend at {url}");

            services(Arc::new(sql::Backend::new(pool)))
        }
        (CloudBackend::Sqlite, None) => {
            anyhow::bail!("Cloud url is required by the sqlite backend")
        }
        (CloudBackend::Memory, _) => {
            tracing::warn!("Using in-memory cloud backend, data is lost on restart");

            services(Arc::new(memory::Backend::new()))
        }
    };

    let state = crate::app_state(
        recipebook_cloud::State {
            read_db: read_pool.clone(),
            write_db: write_pool.clone(),
            storage,
            lists,
            accounts,
        },
        &config,
    );

    match state.recipe_command.refresh().await {
        Ok(count) => tracing::info!("Feed cache warmed with {count} recipe(s)"),
        Err(e) => tracing::warn!("Failed to warm feed cache: {e}"),
    }

    let app = crate::routes::router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Closing database pools...");
    read_pool.close().await;
    write_pool.close().await;
    if let Some(pool) = cloud_pool {
        pool.close().await;
    }

    tracing::info!("Graceful shutdown complete");

    Ok(())
}

type Services = (
    Arc<dyn StorageService>,
    Arc<dyn ListService>,
    Arc<dyn AccountService>,
);

fn services<B>(backend: Arc<B>) -> Services
where
    B: StorageService + ListService + AccountService + 'static,
{
    (backend.clone(), backend.clone(), backend)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown...");
}
