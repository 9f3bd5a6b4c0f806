//! HTTP page source
//!
//! Executes one page request through `HttpClient` and hands the response to
//! the endpoint's cursor strategy.

use super::types::{BackendPage, Endpoint, PageSource};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use async_trait::async_trait;
use tracing::debug;

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch_page(
        &self,
        endpoint: &Endpoint,
        cursor: &str,
        limit: u32,
    ) -> Result<BackendPage> {
        let paginator = endpoint.style.paginator();

        let mut config = RequestConfig::new();
        for (key, value) in &endpoint.filters {
            config = config.query(key.as_str(), value.as_str());
        }
        for (key, value) in paginator.request_params(cursor, limit) {
            config = config.query(key, value);
        }

        let response = self.get_with_config(&endpoint.url, config).await?;
        let headers = response.headers().clone();
        let body = response.text().await.map_err(Error::Http)?;

        let page = paginator.extract(&body, &headers)?;
        debug!(
            endpoint = %endpoint.url,
            resumed = !cursor.is_empty(),
            items = page.items.len(),
            last = page.is_last(),
            "Fetched page"
        );
        Ok(page)
    }
}
