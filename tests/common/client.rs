//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per endpoint. When routes or request
//! formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    pub base_url: String,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    async fn send_json(&self, method: reqwest::Method, path: &str, body: &Value) -> Response {
        self.client
            .request(method, self.url(path))
            .json(body)
            .send()
            .await
            .expect("JSON request failed")
    }

    async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE request failed")
    }

    /// GET /
    pub async fn get_home(&self) -> Response {
        self.get("/").await
    }

    // ========================================================================
    // Artists
    // ========================================================================

    /// GET /v1/artists
    pub async fn list_artists(&self) -> Response {
        self.get("/v1/artists").await
    }

    /// GET /v1/artists/{id}
    pub async fn get_artist(&self, id: i64) -> Response {
        self.get(&format!("/v1/artists/{}", id)).await
    }

    /// POST /v1/artists
    pub async fn create_artist(&self, body: &Value) -> Response {
        self.send_json(reqwest::Method::POST, "/v1/artists", body).await
    }

    /// PATCH /v1/artists/{id}
    pub async fn patch_artist(&self, id: i64, body: &Value) -> Response {
        self.send_json(reqwest::Method::PATCH, &format!("/v1/artists/{}", id), body)
            .await
    }

    /// DELETE /v1/artists/{id}
    pub async fn delete_artist(&self, id: i64) -> Response {
        self.delete(&format!("/v1/artists/{}", id)).await
    }

    // ========================================================================
    // Songs
    // ========================================================================

    /// GET /v1/songs
    pub async fn list_songs(&self) -> Response {
        self.get("/v1/songs").await
    }

    /// POST /v1/songs
    pub async fn create_song(&self, body: &Value) -> Response {
        self.send_json(reqwest::Method::POST, "/v1/songs", body).await
    }

    /// PUT /v1/songs/{id}
    pub async fn put_song(&self, id: i64, body: &Value) -> Response {
        self.send_json(reqwest::Method::PUT, &format!("/v1/songs/{}", id), body)
            .await
    }

    /// DELETE /v1/songs/{id}
    pub async fn delete_song(&self, id: i64) -> Response {
        self.delete(&format!("/v1/songs/{}", id)).await
    }

    // ========================================================================
    // Albums
    // ========================================================================

    /// GET /v1/albums
    pub async fn list_albums(&self) -> Response {
        self.get("/v1/albums").await
    }

    /// GET /v1/albums/{id}
    pub async fn get_album(&self, id: i64) -> Response {
        self.get(&format!("/v1/albums/{}", id)).await
    }

    /// POST /v1/albums
    pub async fn create_album(&self, body: &Value) -> Response {
        self.send_json(reqwest::Method::POST, "/v1/albums", body).await
    }

    /// PUT /v1/albums/{id}
    pub async fn put_album(&self, id: i64, body: &Value) -> Response {
        self.send_json(reqwest::Method::PUT, &format!("/v1/albums/{}", id), body)
            .await
    }

    /// PATCH /v1/albums/{id}
    pub async fn patch_album(&self, id: i64, body: &Value) -> Response {
        self.send_json(reqwest::Method::PATCH, &format!("/v1/albums/{}", id), body)
            .await
    }

    /// DELETE /v1/albums/{id}
    pub async fn delete_album(&self, id: i64) -> Response {
        self.delete(&format!("/v1/albums/{}", id)).await
    }

    // ========================================================================
    // Tracks
    // ========================================================================

    /// GET /v1/tracks-grouped
    pub async fn get_grouped_tracks(&self) -> Response {
        self.get("/v1/tracks-grouped").await
    }

    /// GET /v1/tracks-grouped/{id}
    pub async fn get_grouped_track(&self, album_track_id: i64) -> Response {
        self.get(&format!("/v1/tracks-grouped/{}", album_track_id))
            .await
    }

    // ========================================================================
    // Admin
    // ========================================================================

    /// POST /v1/admin/renumber
    pub async fn renumber(&self, album_ids: &[i64]) -> Response {
        self.send_json(
            reqwest::Method::POST,
            "/v1/admin/renumber",
            &json!({ "albumIds": album_ids }),
        )
        .await
    }

    /// GET /v1/admin/stats/{entity}
    pub async fn get_stats(&self, entity: &str) -> Response {
        self.get(&format!("/v1/admin/stats/{}", entity)).await
    }
}
