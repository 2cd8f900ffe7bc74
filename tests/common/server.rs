//! Test server lifecycle management
//!
//! Each test gets an isolated server over its own temporary database.

use super::constants::*;
use super::fixtures::seed_catalog;
use music_catalog_server::catalog_store::{CatalogStore, SqliteCatalogStore};
use music_catalog_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance with an isolated, seeded catalog.
///
/// When dropped, the server gracefully shuts down and the database
/// directory is removed.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Direct store access for assertions that bypass HTTP
    pub catalog_store: Arc<dyn CatalogStore>,

    _temp_db_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server on a random port with the fixture catalog loaded.
    pub async fn spawn() -> Self {
        Self::spawn_with(true).await
    }

    /// Spawns a server over an empty catalog.
    pub async fn spawn_empty() -> Self {
        Self::spawn_with(false).await
    }

    async fn spawn_with(seed: bool) -> Self {
        let temp_db_dir = TempDir::new().expect("Failed to create temp dir");
        let catalog_store: Arc<dyn CatalogStore> = Arc::new(
            SqliteCatalogStore::new(temp_db_dir.path().join("catalog.db"), 2, 5)
                .expect("Failed to open catalog store"),
        );
        if seed {
            seed_catalog(catalog_store.as_ref()).expect("Failed to seed catalog");
        }

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
        };
        let app = make_app(config, catalog_store.clone()).expect("Failed to build app");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            catalog_store,
            _temp_db_dir: temp_db_dir,
            _shutdown_tx: Some(shutdown_tx),
        };
        server.wait_for_ready().await;
        server
    }

    /// Polls `/` until it answers successfully.
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
