mod ads;
mod assets;
mod stats;

use std::future::Future;

use adcat_core::AppConfig;
use adcat_db::{AdStore, PoolConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::ads::AdsCommands;
use crate::assets::AssetsCommands;

#[derive(Debug, Parser)]
#[command(name = "adcat-cli")]
#[command(about = "Ad catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Query scraped ads
    Ads {
        #[command(subcommand)]
        command: AdsCommands,
    },
    /// Print the catalog summary
    Stats,
    /// Inspect the asset store
    Assets {
        #[command(subcommand)]
        command: AssetsCommands,
    },
}

/// Opens the store, runs `f` against it, and closes the pool afterwards.
async fn with_store<F, Fut>(config: &AppConfig, f: F) -> anyhow::Result<()>
where
    F: FnOnce(AdStore) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let store = AdStore::connect(&config.database_url, PoolConfig::from_app_config(config)).await?;
    let result = f(store.clone()).await;
    store.close().await;
    result
}

async fn run_migrate(store: &AdStore) -> anyhow::Result<()> {
    let applied = adcat_db::run_migrations(store.pool()).await?;
    println!("migrations complete: {applied} applied");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("adcat-cli: no command given; run with --help for usage");
        return Ok(());
    };

    let config = adcat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Migrate => {
            with_store(&config, |store| async move { run_migrate(&store).await }).await
        }
        Commands::Ads { command } => {
            with_store(&config, |store| async move {
                ads::run_ads_command(&store, command).await
            })
            .await
        }
        Commands::Stats => {
            with_store(&config, |store| async move { stats::run_stats(&store).await }).await
        }
        Commands::Assets { command } => assets::run_assets_command(&config, &command),
    }
}
