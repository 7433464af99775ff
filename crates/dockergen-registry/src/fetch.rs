/// A fetched mapping document: HTTP status and raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    pub status: u16,
    pub body: String,
}

impl FetchedDocument {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstraction over the HTTP transport for testability.
///
/// Production code uses [`HttpFetcher`], tests use mockall-generated mocks.
/// Status handling is left to the caller so that every transport reports
/// non-success responses the same way.
#[allow(async_fn_in_trait)]
pub trait MappingFetcher: Send + Sync {
    /// GET `url` and return the status and body.
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, FetchError>;
}

/// Real HTTP fetcher backed by `reqwest` with default timeouts.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MappingFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedDocument, FetchError> {
        tracing::debug!(url, "fetching image mapping");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request { source: e })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Body { source: e })?;

        Ok(FetchedDocument { status, body })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed")]
    Request { source: reqwest::Error },

    #[error("failed to read response body")]
    Body { source: reqwest::Error },
}
