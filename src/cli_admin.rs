//! Operator tool: admin provisioning, track renumbering and statistics,
//! working directly on the databases in `--db-dir`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use music_catalog_server::admin::{
    provision_admin, provisioning_enabled_from_env, ProvisionOutcome, SqliteAdminStore,
};
use music_catalog_server::catalog_store::{CatalogStore, SqliteCatalogStore};
use music_catalog_server::config::{AppConfig, CliConfig, FileConfig};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "catalog-admin")]
struct CliArgs {
    /// Path to a TOML config file, its db_dir wins over --db-dir.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory holding catalog.db and admin.db.
    #[clap(long, value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Creates an admin account unless it already exists.
    /// Requires CATALOG_PROVISION_ADMIN=1 in the environment.
    ProvisionAdmin {
        #[clap(long)]
        username: String,
        #[clap(long)]
        password: String,
    },

    /// Rewrites track positions of the given albums to 1..n, keeping their order.
    Renumber {
        #[clap(required = true)]
        album_ids: Vec<i64>,
    },

    /// Prints per-entity statistics as JSON.
    Stats {
        #[clap(value_enum)]
        entity: StatsEntity,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StatsEntity {
    Artists,
    Albums,
    Songs,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn open_catalog(config: &AppConfig) -> Result<SqliteCatalogStore> {
    let store = SqliteCatalogStore::new(
        config.catalog_db_path(),
        1,
        config.store.max_conflict_retries,
    )?;
    store.set_busy_timeout(Duration::from_millis(config.store.busy_timeout_ms))?;
    Ok(store)
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let cli_config = CliConfig {
        db_dir: cli_args.db_dir.clone(),
        ..Default::default()
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    match cli_args.command {
        Command::ProvisionAdmin { username, password } => {
            let store = SqliteAdminStore::new(config.admin_db_path())?;
            match provision_admin(&store, &username, &password, provisioning_enabled_from_env())? {
                ProvisionOutcome::Created => println!("Admin {} created.", username.trim()),
                ProvisionOutcome::AlreadyExists => {
                    println!("Admin {} already exists, nothing changed.", username.trim())
                }
            }
        }
        Command::Renumber { album_ids } => {
            let outcome = open_catalog(&config)?.renumber_album_tracks(&album_ids)?;
            println!(
                "Renumbered {} albums, {} positions changed.",
                outcome.albums_renumbered, outcome.positions_changed
            );
        }
        Command::Stats { entity } => {
            let store = open_catalog(&config)?;
            match entity {
                StatsEntity::Artists => print_json(&store.get_artist_stats()?)?,
                StatsEntity::Albums => print_json(&store.get_album_stats()?)?,
                StatsEntity::Songs => print_json(&store.get_song_stats()?)?,
            }
        }
    }
    Ok(())
}
