//! Registry fetching from the remote blocks registry or a local checkout
//!
//! Both sources expose the same relative layout:
//! - `registry.json` - the index of all items
//! - `public/r/styles/default/<name>.json` - one item definition
//! - `registry/<path>` - raw component source files

use super::schema::{Registry, RegistryItem};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;
use url::Url;

/// Default registry location. Override with [`REGISTRY_URL_ENV`].
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/jm-sky/vue-blocks-registry/main";

/// Environment variable for pointing the CLI at another registry.
pub const REGISTRY_URL_ENV: &str = "VUEBLOCKS_REGISTRY_URL";

const USER_AGENT: &str = "vueblocks";

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid registry URL: {0}")]
    InvalidUrl(String),

    #[error("failed to fetch {url}")]
    Http {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    #[error("registry returned HTTP {status} for {url}")]
    Status { url: Url, status: reqwest::StatusCode },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {what}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0} not found in registry")]
    NotFound(String),
}

/// Registry source - either remote URL or local checkout
#[derive(Debug, Clone)]
pub enum RegistrySource {
    Remote(Url),
    Local(PathBuf),
}

impl RegistrySource {
    /// Remote source from [`REGISTRY_URL_ENV`], falling back to the
    /// built-in registry.
    pub fn from_env() -> Result<Self, RegistryError> {
        let url_str =
            std::env::var(REGISTRY_URL_ENV).unwrap_or_else(|_| DEFAULT_REGISTRY_URL.to_string());
        let url = Url::parse(&url_str).map_err(|_| RegistryError::InvalidUrl(url_str))?;
        Ok(Self::Remote(url))
    }

    /// Local registry checkout (for development use).
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

/// Registry client - fetches the index, item definitions, and file contents.
pub struct RegistryClient {
    source: RegistrySource,
    client: reqwest::Client,
    /// Cache of item definitions fetched through the per-item endpoint
    item_cache: HashMap<String, RegistryItem>,
}

impl RegistryClient {
    pub fn new(source: RegistrySource) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            item_cache: HashMap::new(),
        }
    }

    /// Client for the registry named by the environment, or the default.
    pub fn from_env() -> Result<Self, RegistryError> {
        Ok(Self::new(RegistrySource::from_env()?))
    }

    /// Client for a local registry checkout.
    pub fn from_local(path: PathBuf) -> Self {
        Self::new(RegistrySource::local(path))
    }

    pub fn source(&self) -> &RegistrySource {
        &self.source
    }

    /// Build a URL by appending path segments, preserving query parameters
    fn build_url(base: &Url, segments: &[&str]) -> Result<Url, RegistryError> {
        let mut url = base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| RegistryError::InvalidUrl(base.to_string()))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// Read one document from the source. `Ok(None)` when it does not exist.
    async fn read_source(&self, segments: &[&str]) -> Result<Option<String>, RegistryError> {
        match &self.source {
            RegistrySource::Remote(base) => {
                let url = Self::build_url(base, segments)?;
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(|source| RegistryError::Http {
                        url: url.clone(),
                        source,
                    })?;

                if response.status() == reqwest::StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                if !response.status().is_success() {
                    return Err(RegistryError::Status {
                        url,
                        status: response.status(),
                    });
                }

                let text = response
                    .text()
                    .await
                    .map_err(|source| RegistryError::Http { url, source })?;
                Ok(Some(text))
            }
            RegistrySource::Local(root) => {
                let mut path = root.clone();
                for segment in segments {
                    path.push(segment);
                }
                if !path.exists() {
                    return Ok(None);
                }
                let text = fs::read_to_string(&path)
                    .await
                    .map_err(|source| RegistryError::Io { path, source })?;
                Ok(Some(text))
            }
        }
    }

    /// Fetch the registry index (`registry.json`).
    pub async fn fetch_registry(&self) -> Result<Registry, RegistryError> {
        let text = self
            .read_source(&["registry.json"])
            .await?
            .ok_or_else(|| RegistryError::NotFound("registry.json".to_string()))?;
        serde_json::from_str(&text).map_err(|source| RegistryError::Parse {
            what: "registry.json".to_string(),
            source,
        })
    }

    /// Fetch a single item definition through the per-item endpoint.
    /// `Ok(None)` when the registry has no item with this name.
    pub async fn fetch_item(&mut self, name: &str) -> Result<Option<RegistryItem>, RegistryError> {
        if let Some(item) = self.item_cache.get(name) {
            return Ok(Some(item.clone()));
        }

        let file = format!("{name}.json");
        let Some(text) = self
            .read_source(&["public", "r", "styles", "default", &file])
            .await?
        else {
            return Ok(None);
        };

        let item: RegistryItem =
            serde_json::from_str(&text).map_err(|source| RegistryError::Parse {
                what: file,
                source,
            })?;
        self.item_cache.insert(name.to_string(), item.clone());
        Ok(Some(item))
    }

    /// Fetch raw component source for a registry file path.
    pub async fn fetch_file(&self, path: &str) -> Result<String, RegistryError> {
        let mut segments = vec!["registry"];
        segments.extend(path.split('/'));
        self.read_source(&segments)
            .await?
            .ok_or_else(|| RegistryError::NotFound(path.to_string()))
    }
}
