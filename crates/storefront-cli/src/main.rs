mod browse;
mod catalog;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::browse::BrowseArgs;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Storefront catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the normalized catalog and print the filtered, sorted listing
    Browse(BrowseArgs),
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Printful catalog operations
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[derive(Debug, Subcommand)]
enum CatalogCommands {
    /// Fetch the Printful catalog and upsert it into the database
    Sync {
        /// Fetch and normalize only; print what would be written
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Browse(args)) => return browse::run_browse(&config, &args).await,
        Some(Commands::Db { command }) => {
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    storefront_db::health_check(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = storefront_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        Some(Commands::Catalog {
            command: CatalogCommands::Sync { dry_run },
        }) => {
            let pool = if dry_run {
                None
            } else {
                Some(connect(&config).await?)
            };
            catalog::run_catalog_sync(&config, pool.as_ref(), dry_run).await?;
        }
        None => println!("storefront: no command given; run `storefront --help`"),
    }

    Ok(ExitCode::SUCCESS)
}

async fn connect(config: &storefront_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or(storefront_db::DbError::MissingDatabaseUrl)?;
    let pool_config = storefront_db::PoolConfig::from_app_config(config);
    let pool = storefront_db::connect_pool(database_url, pool_config).await?;
    Ok(pool)
}
