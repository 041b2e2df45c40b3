//! Service layer for catalog I/O.
//!
//! This module contains the data sources that serve catalog payloads and the
//! loader that turns them into validated color lists.

pub mod catalog_loader;
pub mod catalog_source;

// Re-export commonly used types
pub use catalog_loader::{CatalogFeed, CatalogLoader, CatalogMessage, LayerLoad, LoadReport};
#[cfg(feature = "http")]
pub use catalog_source::HttpCatalogSource;
pub use catalog_source::{CatalogError, CatalogSource, FileCatalogSource, MemoryCatalogSource};
