use crate::domain::ports::IndexSource;
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Fetches the index document from an http(s) endpoint, the way the
/// browser build pulled `mega-search-index.json` from the site root.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl IndexSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Fetching index from: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        tracing::debug!("Index response status: {}", status);

        if !status.is_success() {
            return Err(CatalogError::FetchStatusError {
                status: status.as_u16(),
                location: self.url.clone(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    fn location(&self) -> &str {
        &self.url
    }
}
