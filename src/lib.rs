//! Music Catalog Server Library
//!
//! Exposes the store, configuration and HTTP layers to both binaries and
//! to the end-to-end tests.

pub mod admin;
pub mod catalog_store;
pub mod config;
pub mod server;
pub mod sqlite_persistence;

pub use admin::SqliteAdminStore;
pub use catalog_store::{CatalogStore, SqliteCatalogStore};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
