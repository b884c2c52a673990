mod api;
mod middleware;

use std::sync::Arc;

use storefront_catalog::PrintfulClient;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(storefront_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if config.printful_api_key.is_none() {
        tracing::warn!("PRINTFUL_API_KEY not set; catalog requests will fail until it is configured");
    }

    let pool = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool_config = storefront_db::PoolConfig::from_app_config(&config);
            let pool = storefront_db::connect_pool(database_url, pool_config).await?;
            let applied = storefront_db::run_migrations(&pool).await?;
            tracing::info!(applied, "database ready");
            Some(pool)
        }
        None => {
            tracing::info!("DATABASE_URL not set; catalog read API disabled");
            None
        }
    };

    let catalog = PrintfulClient::with_base_url(
        &config.printful_base_url,
        config.printful_request_timeout_secs,
        &config.user_agent,
    )?;

    let app = build_app(AppState {
        pool,
        catalog,
        printful_api_key: config.printful_api_key.clone(),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "storefront server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
