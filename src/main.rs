use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use music_catalog_server::catalog_store::{
    SqliteCatalogStore, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_MAX_CONFLICT_RETRIES,
    DEFAULT_READ_POOL_SIZE,
};
use music_catalog_server::config::{AppConfig, CliConfig, FileConfig};
use music_catalog_server::server::{run_server, RequestsLoggingLevel, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

fn parse_dir(s: &str) -> Result<PathBuf> {
    let path = parse_path(s)?;
    if !path.is_dir() {
        bail!("Not a directory: {:?}", path);
    }
    Ok(path)
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Values in it override the flags below.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory holding catalog.db and admin.db.
    #[clap(long, value_parser = parse_dir)]
    pub db_dir: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Number of read-only SQLite connections.
    #[clap(long, default_value_t = DEFAULT_READ_POOL_SIZE)]
    pub read_pool_size: usize,

    /// How many times a write that hit a locked database is retried.
    #[clap(long, default_value_t = DEFAULT_MAX_CONFLICT_RETRIES)]
    pub max_conflict_retries: usize,

    /// Milliseconds a write waits on a locked database before it is retried.
    #[clap(long, default_value_t = DEFAULT_BUSY_TIMEOUT_MS)]
    pub busy_timeout_ms: u64,
}

impl From<&CliArgs> for CliConfig {
    fn from(args: &CliArgs) -> Self {
        CliConfig {
            db_dir: args.db_dir.clone(),
            port: args.port,
            logging_level: args.logging_level.clone(),
            read_pool_size: args.read_pool_size,
            max_conflict_retries: args.max_conflict_retries,
            busy_timeout_ms: args.busy_timeout_ms,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&CliConfig::from(&cli_args), file_config)?;

    info!("Configuration loaded:");
    info!("  db_dir: {:?}", app_config.db_dir);
    info!("  port: {}", app_config.port);
    info!("  logging_level: {}", app_config.logging_level);
    info!("  read_pool_size: {}", app_config.store.read_pool_size);
    info!(
        "  max_conflict_retries: {}",
        app_config.store.max_conflict_retries
    );
    info!("  busy_timeout_ms: {}", app_config.store.busy_timeout_ms);

    let catalog_db_path = app_config.catalog_db_path();
    info!("Opening SQLite catalog database at {:?}...", catalog_db_path);
    let catalog_store = Arc::new(SqliteCatalogStore::new(
        &catalog_db_path,
        app_config.store.read_pool_size,
        app_config.store.max_conflict_retries,
    )?);
    catalog_store.set_busy_timeout(Duration::from_millis(app_config.store.busy_timeout_ms))?;

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level,
        port: app_config.port,
    };
    run_server(server_config, catalog_store).await
}
