mod ads;

use clap::{Parser, Subcommand};
use museboard_core::{AppConfig, ConfigError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "museboard-cli")]
#[command(about = "MuseBoard command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Print generated ad copy without storing it
    Preview {
        /// Template category (restaurant, fashion, tech, courses; anything else is generic)
        #[arg(long, default_value = museboard_core::DEFAULT_CATEGORY)]
        category: String,
        /// Product description to embed in the copy
        description: String,
    },
    /// List stored ads, newest first
    List {
        /// Only show ads in this category ("all" disables the filter)
        #[arg(long)]
        category: Option<String>,
        /// Maximum number of ads to show
        #[arg(long, default_value = "20")]
        limit: i64,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Create the ads table if it does not exist
    Init,
    /// Check that the database can be reached
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("museboard-cli: run with --help to see available commands");
        return Ok(());
    };

    run(command, museboard_core::load_app_config_from_env).await
}

/// Dispatch a command. Config is only loaded by commands that open the database.
async fn run<F>(command: Commands, load_config: F) -> anyhow::Result<()>
where
    F: FnOnce() -> Result<AppConfig, ConfigError>,
{
    match command {
        Commands::Preview {
            category,
            description,
        } => ads::run_preview(&category, &description),
        Commands::Db {
            command: DbCommands::Init,
        } => {
            let config = prepare(load_config)?;
            connect(&config).await?;
            tracing::info!(database_url = %config.redacted_database_url(), "schema ready");
            println!("schema ready");
        }
        Commands::Db {
            command: DbCommands::Ping,
        } => {
            let config = prepare(load_config)?;
            let pool = connect(&config).await?;
            museboard_db::health_check(&pool).await?;
            println!("database reachable");
        }
        Commands::List { category, limit } => {
            let config = prepare(load_config)?;
            let pool = connect(&config).await?;
            ads::run_list(&pool, category.as_deref(), limit).await?;
        }
    }

    Ok(())
}

/// Load config and install the log subscriber it configures.
fn prepare<F>(load_config: F) -> anyhow::Result<AppConfig>
where
    F: FnOnce() -> Result<AppConfig, ConfigError>,
{
    let config = load_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
    Ok(config)
}

async fn connect(config: &AppConfig) -> anyhow::Result<sqlx::SqlitePool> {
    let pool_config = museboard_db::PoolConfig::from_app_config(config);
    let pool = museboard_db::connect_pool(&config.database_url, pool_config).await?;
    museboard_db::init_schema(&pool).await?;
    Ok(pool)
}
