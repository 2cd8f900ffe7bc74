mod admin_routes;
mod catalog_routes;
pub mod config;
pub mod error;
mod http_layers;
#[allow(clippy::module_inception)]
pub mod server;
pub mod state;
mod tracks_routes;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorResponse};
pub use http_layers::*;
pub use server::{make_app, run_server};
