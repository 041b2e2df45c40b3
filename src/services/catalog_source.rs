//! Data sources that serve raw catalog payloads.
//!
//! A source only knows how to turn a locator into text. Parsing, validation
//! and failure recovery live in [`super::CatalogLoader`].

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to fetch a catalog payload.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No catalog exists at the locator.
    #[error("catalog not found: {0}")]
    NotFound(String),
    /// The source could not be reached or read.
    #[error("failed to read catalog {locator}: {source}")]
    Io {
        /// Locator that was requested
        locator: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The server answered with a non-success status.
    #[error("catalog {locator} returned status {status}")]
    Status {
        /// Locator that was requested
        locator: String,
        /// HTTP status code
        status: u16,
    },
    /// Transport-level failure (connection refused, TLS, ...).
    #[error("failed to fetch catalog {locator}: {reason}")]
    Transport {
        /// Locator that was requested
        locator: String,
        /// Human-readable cause
        reason: String,
    },
    /// The fetch did not finish within the configured timeout.
    #[error("timed out fetching catalog {0}")]
    TimedOut(String),
}

/// Anything that can serve catalog payloads by locator.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the raw payload stored at `locator`.
    async fn fetch(&self, locator: &str) -> Result<String, CatalogError>;
}

/// Serves catalogs from JSON files below a root directory.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    root: PathBuf,
}

impl FileCatalogSource {
    /// Creates a source resolving locators relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self, locator: &str) -> Result<String, CatalogError> {
        let path = self.root.join(locator);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(CatalogError::NotFound(path.display().to_string()))
            }
            Err(source) => Err(CatalogError::Io {
                locator: path.display().to_string(),
                source,
            }),
        }
    }
}

/// Serves catalogs from an in-memory map.
///
/// Used by the headless mode and by tests that need deterministic data.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogSource {
    payloads: HashMap<String, String>,
}

impl MemoryCatalogSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `payload` under `locator`.
    pub fn insert(&mut self, locator: impl Into<String>, payload: impl Into<String>) {
        self.payloads.insert(locator.into(), payload.into());
    }

    /// Builder form of [`Self::insert`].
    pub fn with(mut self, locator: impl Into<String>, payload: impl Into<String>) -> Self {
        self.insert(locator, payload);
        self
    }
}

#[async_trait]
impl CatalogSource for MemoryCatalogSource {
    async fn fetch(&self, locator: &str) -> Result<String, CatalogError> {
        self.payloads
            .get(locator)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(locator.to_string()))
    }
}

/// Serves catalogs over HTTP relative to a base URL.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "http")]
impl HttpCatalogSource {
    /// Creates a source resolving locators against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, locator: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            locator.trim_start_matches('/')
        )
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self, locator: &str) -> Result<String, CatalogError> {
        let url = self.url_for(locator);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Transport {
                locator: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url));
        }
        if !status.is_success() {
            return Err(CatalogError::Status {
                locator: url,
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| CatalogError::Transport {
            locator: url,
            reason: e.to_string(),
        })
    }
}
