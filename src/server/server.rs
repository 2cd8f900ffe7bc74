use anyhow::{Context, Result};
use std::time::Duration;

use tracing::info;

use axum::{
    extract::State, middleware, response::IntoResponse, routing::get, Json, Router,
};
use serde::Serialize;

use super::admin_routes::make_admin_routes;
use super::catalog_routes::make_catalog_routes;
use super::tracks_routes::make_tracks_routes;
use super::{log_requests, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub artists: usize,
    pub albums: usize,
    pub songs: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let store = &state.catalog_store;
    Json(ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        artists: store.get_artists_count(),
        albums: store.get_albums_count(),
        songs: store.get_songs_count(),
    })
}

pub fn make_app(config: ServerConfig, catalog_store: GuardedCatalogStore) -> Result<Router> {
    let state = ServerState::new(config, catalog_store);

    let v1_routes: Router =
        make_catalog_routes(state.clone()).merge(make_tracks_routes(state.clone()));

    let app: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .nest("/v1", v1_routes)
        .nest("/v1/admin", make_admin_routes(state.clone()))
        .layer(middleware::from_fn_with_state(state, log_requests));

    Ok(app)
}

pub async fn run_server(config: ServerConfig, catalog_store: GuardedCatalogStore) -> Result<()> {
    let port = config.port;
    let app = make_app(config, catalog_store)?;

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutting down");
            }
        })
        .await?;
    Ok(())
}
