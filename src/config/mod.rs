mod file_config;

pub use file_config::{FileConfig, StoreConfig};

use crate::catalog_store::{
    DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_MAX_CONFLICT_RETRIES, DEFAULT_READ_POOL_SIZE,
};
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub read_pool_size: usize,
    pub max_conflict_retries: usize,
    pub busy_timeout_ms: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            db_dir: None,
            port: 3001,
            logging_level: RequestsLoggingLevel::Path,
            read_pool_size: DEFAULT_READ_POOL_SIZE,
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_dir: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub store: StoreSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub read_pool_size: usize,
    pub max_conflict_retries: usize,
    pub busy_timeout_ms: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            read_pool_size: DEFAULT_READ_POOL_SIZE,
            max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_dir = file
            .db_dir
            .map(PathBuf::from)
            .or_else(|| cli.db_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_dir must be specified via --db-dir or in config file")
            })?;

        if !db_dir.exists() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }
        if !db_dir.is_dir() {
            bail!("db_dir is not a directory: {:?}", db_dir);
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = match file.logging_level {
            Some(level) => match parse_logging_level(&level) {
                Some(level) => level,
                None => bail!("Unknown logging_level in config file: {:?}", level),
            },
            None => cli.logging_level.clone(),
        };

        let store_file = file.store.unwrap_or_default();
        let store = StoreSettings {
            read_pool_size: store_file.read_pool_size.unwrap_or(cli.read_pool_size),
            max_conflict_retries: store_file
                .max_conflict_retries
                .unwrap_or(cli.max_conflict_retries),
            busy_timeout_ms: store_file.busy_timeout_ms.unwrap_or(cli.busy_timeout_ms),
        };
        if store.read_pool_size == 0 {
            bail!("read_pool_size must be at least 1");
        }

        Ok(Self {
            db_dir,
            port,
            logging_level,
            store,
        })
    }

    pub fn catalog_db_path(&self) -> PathBuf {
        self.db_dir.join("catalog.db")
    }

    pub fn admin_db_path(&self) -> PathBuf {
        self.db_dir.join("admin.db")
    }
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli_for(dir: &TempDir) -> CliConfig {
        CliConfig {
            db_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_logging_level() {
        assert_eq!(parse_logging_level("none"), Some(RequestsLoggingLevel::None));
        assert_eq!(parse_logging_level("HEADERS"), Some(RequestsLoggingLevel::Headers));
        assert_eq!(parse_logging_level("body"), Some(RequestsLoggingLevel::Body));
        assert!(parse_logging_level("verbose").is_none());
    }

    #[test]
    fn test_resolve_cli_only() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            port: 8080,
            logging_level: RequestsLoggingLevel::Headers,
            read_pool_size: 2,
            ..cli_for(&temp_dir)
        };

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.db_dir, temp_dir.path());
        assert_eq!(config.port, 8080);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Headers);
        assert_eq!(
            config.store,
            StoreSettings {
                read_pool_size: 2,
                max_conflict_retries: DEFAULT_MAX_CONFLICT_RETRIES,
                busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            }
        );
        assert_eq!(config.catalog_db_path(), temp_dir.path().join("catalog.db"));
        assert_eq!(config.admin_db_path(), temp_dir.path().join("admin.db"));
    }

    #[test]
    fn test_file_overrides_cli() {
        let cli_dir = TempDir::new().unwrap();
        let file_dir = TempDir::new().unwrap();
        let file = FileConfig {
            db_dir: Some(file_dir.path().to_string_lossy().into_owned()),
            port: Some(9000),
            logging_level: Some("none".to_string()),
            store: Some(StoreConfig {
                read_pool_size: None,
                max_conflict_retries: Some(7),
                busy_timeout_ms: Some(40),
            }),
        };

        let config = AppConfig::resolve(&cli_for(&cli_dir), Some(file)).unwrap();

        assert_eq!(config.db_dir, file_dir.path());
        assert_eq!(config.port, 9000);
        assert_eq!(config.logging_level, RequestsLoggingLevel::None);
        assert_eq!(config.store.read_pool_size, DEFAULT_READ_POOL_SIZE);
        assert_eq!(config.store.max_conflict_retries, 7);
        assert_eq!(config.store.busy_timeout_ms, 40);
    }

    #[test]
    fn test_db_dir_is_required_and_must_exist() {
        assert!(AppConfig::resolve(&CliConfig::default(), None).is_err());

        let cli = CliConfig {
            db_dir: Some(PathBuf::from("/definitely/not/here")),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&cli, None).is_err());
    }

    #[test]
    fn test_rejects_bad_values() {
        let temp_dir = TempDir::new().unwrap();
        let bad_level = FileConfig {
            logging_level: Some("loud".to_string()),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&cli_for(&temp_dir), Some(bad_level)).is_err());

        let no_readers = CliConfig {
            read_pool_size: 0,
            ..cli_for(&temp_dir)
        };
        assert!(AppConfig::resolve(&no_readers, None).is_err());
    }
}
