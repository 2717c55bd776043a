//! HTTP-shaped collaborator contracts.

use async_trait::async_trait;
use eyre::Result;
use serde_json::Value;

/// Generic JSON request capability, used uniformly for free-text search,
/// template-driven GeoJSON fetches and feature overlay loading.
#[async_trait]
pub trait RequestClient {
    /// Issue a request for the given URL and decode the response body as
    /// JSON.
    async fn request_json(&self, url: &str) -> Result<Value>;
}

/// Source of versioned catalog documents.
///
/// An absent or failed fetch is reported as `None`; the engine treats it as
/// an empty catalog, never as a fault.
#[async_trait]
pub trait CatalogSource {
    async fn get_json(&self, url: &str) -> Option<Value>;
}
