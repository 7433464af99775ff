use std::collections::BTreeMap;

use dockergen_core::ProjectMetadata;

use crate::fetch::{FetchError, HttpFetcher, MappingFetcher};
use crate::mapping::ImageMapping;

/// Merges image mappings published by sibling repositories, parameterized
/// over the fetcher for testability.
pub struct ExternalMerger<F: MappingFetcher = HttpFetcher> {
    fetcher: F,
}

impl ExternalMerger<HttpFetcher> {
    pub fn new() -> Self {
        Self {
            fetcher: HttpFetcher::new(),
        }
    }
}

impl Default for ExternalMerger<HttpFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: MappingFetcher> ExternalMerger<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Fetch the mapping of every repository and add its new identities to
    /// `mapping`.
    ///
    /// Repositories are fetched one after another in the given order, so for
    /// an identity published by several of them the first one wins. Entries
    /// already in `mapping` are never replaced. Returns the number of
    /// entries added.
    ///
    /// # Errors
    ///
    /// Any transport failure, non-2xx status or unparseable document aborts
    /// the merge.
    pub async fn merge(
        &self,
        repositories: &[String],
        metadata: &ProjectMetadata,
        url_fmt: &str,
        mapping: &mut ImageMapping,
    ) -> Result<usize, MergeError> {
        let branch = metadata.release_branch();
        let mut added = 0;
        for repository in repositories {
            let external = self.download(repository, &branch, url_fmt).await?;
            added += mapping.merge_external(repository, external);
        }
        Ok(added)
    }

    async fn download(
        &self,
        repository: &str,
        branch: &str,
        url_fmt: &str,
    ) -> Result<BTreeMap<String, String>, MergeError> {
        let url = dockergen_core::format::fill(url_fmt, &[repository, branch]).map_err(|e| {
            MergeError::Url {
                repository: repository.to_owned(),
                source: e,
            }
        })?;

        tracing::info!(repository, url = %url, "downloading image mapping");
        let document = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|e| MergeError::Fetch {
                repository: repository.to_owned(),
                url: url.clone(),
                source: e,
            })?;

        if !document.is_success() {
            return Err(MergeError::Status {
                repository: repository.to_owned(),
                url,
                status: document.status,
            });
        }

        parse_mapping(&document.body).map_err(|e| MergeError::Parse {
            repository: repository.to_owned(),
            url,
            source: e,
        })
    }
}

/// An empty document is an empty mapping.
fn parse_mapping(body: &str) -> Result<BTreeMap<String, String>, serde_yaml::Error> {
    if body.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_yaml::from_str(body)
}

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("invalid image mapping URL format for repository {repository}")]
    Url {
        repository: String,
        source: dockergen_core::Error,
    },

    #[error("failed to get images for repository {repository} from {url}")]
    Fetch {
        repository: String,
        url: String,
        source: FetchError,
    },

    #[error("failed to get images for repository {repository} from {url}: status code {status}")]
    Status {
        repository: String,
        url: String,
        status: u16,
    },

    #[error("failed to parse images for repository {repository} from {url}")]
    Parse {
        repository: String,
        url: String,
        source: serde_yaml::Error,
    },
}
