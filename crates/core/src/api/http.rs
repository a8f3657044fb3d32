//! reqwest client for the catalog HTTP API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{FilterOption, Game, GamesQuery, PageResult};
use super::{ApiError, CatalogApi};
use crate::config::ApiConfig;

/// Catalog API client.
pub struct HttpCatalogApi {
    client: Client,
    base_url: String,
}

impl HttpCatalogApi {
    /// Create a new client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and decode a JSON body, mapping statuses to errors.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        resource: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;

        let status = response.status();
        if status == 404 {
            return Err(ApiError::NotFound(resource.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            ApiError::ParseError(format!("Failed to parse {} response: {}", resource, e))
        })
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_categories(&self) -> Result<Vec<FilterOption>, ApiError> {
        let url = format!("{}/api/categories", self.base_url);
        debug!("Catalog API list categories");
        self.fetch_json(self.client.get(&url), "categories").await
    }

    async fn list_publishers(&self) -> Result<Vec<FilterOption>, ApiError> {
        let url = format!("{}/api/publishers", self.base_url);
        debug!("Catalog API list publishers");
        self.fetch_json(self.client.get(&url), "publishers").await
    }

    async fn list_games(&self, query: &GamesQuery) -> Result<PageResult, ApiError> {
        let url = format!("{}/api/games", self.base_url);

        debug!(
            limit = query.limit,
            offset = query.offset,
            category = ?query.category_id,
            publisher = ?query.publisher_id,
            "Catalog API list games"
        );

        let request = self.client.get(&url).query(&query.to_pairs());
        self.fetch_json(request, "games").await
    }

    async fn get_game(&self, id: u32) -> Result<Game, ApiError> {
        let url = format!("{}/api/games/{}", self.base_url, id);
        debug!("Catalog API get game: id={}", id);
        self.fetch_json(self.client.get(&url), &format!("Game ID {}", id))
            .await
    }
}
