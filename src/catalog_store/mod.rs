//! Catalog storage: artists, albums, songs and the album track list that
//! ties them together.

mod error;
mod grouping;
mod models;
mod schema;
mod store;
mod trait_def;
pub mod validation;

pub use error::{CatalogError, CatalogResult, FieldErrors};
pub use grouping::group_by_album;
pub use models::*;
pub use store::{
    SqliteCatalogStore, DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_MAX_CONFLICT_RETRIES,
    DEFAULT_READ_POOL_SIZE,
};
pub use trait_def::CatalogStore;
