//! Catalog domain services: one typed async operation per resource.
//!
//! A service builds exactly one request descriptor per call, dispatches it
//! through the transport client, and maps the wire payload into a domain
//! entity. It holds no state and caches nothing; errors are forwarded
//! untouched so callers see the transport client's taxonomy directly.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::sync::oneshot;

use crate::net::{HttpClient, InlineContext, NetworkError, Request};

use super::types::{Category, CategoryDto, CollectionDto, NftCollection};

#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetches all collection summaries.
    async fn fetch_collections(&self) -> Result<Vec<Category>, NetworkError>;

    /// Fetches one collection with its items.
    async fn fetch_collection(&self, id: &str) -> Result<NftCollection, NetworkError>;
}

/// The catalog service backed by the real API.
pub struct HttpCatalogService {
    client: HttpClient,
    base_url: String,
}

impl HttpCatalogService {
    pub fn new(client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpCatalogService { client, base_url }
    }

    /// Bridges the client's callback delivery into an awaitable result.
    async fn dispatch<T: DeserializeOwned + Send + 'static>(
        &self,
        request: Request,
    ) -> Result<T, NetworkError> {
        let (tx, rx) = oneshot::channel();
        let _handle = self
            .client
            .send::<T, _>(request, Arc::new(InlineContext), move |result| {
                let _ = tx.send(result);
            });
        match rx.await {
            Ok(result) => result,
            // The service never cancels its own calls, so a dropped sender
            // can only mean the runtime tore the request task down.
            Err(_) => Err(NetworkError::Transport(
                "request dropped before completion".to_string(),
            )),
        }
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    async fn fetch_collections(&self) -> Result<Vec<Category>, NetworkError> {
        let request = Request::get(format!("{}/api/v1/collections", self.base_url));
        let dtos: Vec<CategoryDto> = self.dispatch(request).await?;
        Ok(dtos.into_iter().map(CategoryDto::into_domain).collect())
    }

    async fn fetch_collection(&self, id: &str) -> Result<NftCollection, NetworkError> {
        let request = Request::get(format!("{}/api/v1/collections/{id}", self.base_url));
        let dto: CollectionDto = self.dispatch(request).await?;
        Ok(dto.into_domain())
    }
}
