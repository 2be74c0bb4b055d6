mod api;
mod middleware;

use std::sync::Arc;

use adcat_assets::AssetResolver;
use adcat_db::{AdStore, PoolConfig};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = adcat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting adcat-server");

    let store = AdStore::connect(&config.database_url, PoolConfig::from_app_config(&config)).await?;
    let applied = adcat_db::run_migrations(store.pool()).await?;
    tracing::info!(applied, "migrations complete");

    let assets = Arc::new(AssetResolver::new(config.asset_roots.clone()));
    tracing::info!(root = %assets.assets_root().display(), "assets root");

    let state = AppState {
        store: store.clone(),
        assets,
        version_file: config.version_file.clone(),
    };
    let app = build_app(state, config.client_build_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await;
    served?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
