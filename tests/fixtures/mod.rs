//! Shared test fixtures for session and catalog tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use async_trait::async_trait;
use outfit_wizard::models::LayerDescriptor;
use outfit_wizard::render::HeadlessSink;
use outfit_wizard::services::{
    CatalogError, CatalogLoader, CatalogSource, FileCatalogSource, MemoryCatalogSource,
};
use outfit_wizard::session::{OutfitSession, SessionOptions};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Two-color catalog in the on-disk format.
pub const RED_BLUE: &str =
    r#"{"colors":[{"name":"red","label":"Red"},{"name":"blue","label":"Blue"}]}"#;

/// Catalog whose color list is not a list.
pub const MALFORMED: &str = r#"{"colors": "oops"}"#;

/// Single-color catalog.
pub const BLACK_ONLY: &str = r#"{"colors":[{"name":"black","label":"Black"}]}"#;

/// Shoes, shirt and pants, with catalogs named `<id>.json`.
pub fn three_layers() -> Vec<LayerDescriptor> {
    vec![
        LayerDescriptor::new("shoes", "Shoes", "shoes.json", "assets/shoes-"),
        LayerDescriptor::new("shirt", "T-Shirt", "shirt.json", "assets/shirt-"),
        LayerDescriptor::new("pants", "Pants", "pants.json", "assets/pants-"),
    ]
}

/// In-memory source: shoes black, shirt red/blue, pants malformed.
pub fn memory_source() -> MemoryCatalogSource {
    MemoryCatalogSource::new()
        .with("shoes.json", BLACK_ONLY)
        .with("shirt.json", RED_BLUE)
        .with("pants.json", MALFORMED)
}

/// Loader over [`memory_source`].
pub fn memory_loader() -> CatalogLoader {
    CatalogLoader::new(Arc::new(memory_source()))
}

/// Source whose listed locators never answer; everything else comes from
/// [`memory_source`].
pub struct StallingSource {
    inner: MemoryCatalogSource,
    stalled: Vec<String>,
}

#[async_trait]
impl CatalogSource for StallingSource {
    async fn fetch(&self, locator: &str) -> Result<String, CatalogError> {
        if self.stalled.iter().any(|s| s == locator) {
            futures::future::pending::<()>().await;
        }
        self.inner.fetch(locator).await
    }
}

/// Loader over [`memory_source`] where `stalled` locators hang forever.
pub fn stalling_loader(stalled: &[&str]) -> CatalogLoader {
    CatalogLoader::new(Arc::new(StallingSource {
        inner: memory_source(),
        stalled: stalled.iter().map(|s| (*s).to_string()).collect(),
    }))
}

/// Writes catalog files into a fresh temp directory.
pub fn catalog_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        write_file(dir.path(), name, content);
    }
    dir
}

/// Loader reading catalogs from `dir`.
pub fn file_loader(dir: &Path) -> CatalogLoader {
    CatalogLoader::new(Arc::new(FileCatalogSource::new(dir)))
}

/// Writes `content` to `dir/name`.
pub fn write_file(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

/// A started headless session over `layers`.
pub fn started_session(
    layers: Vec<LayerDescriptor>,
    options: SessionOptions,
) -> OutfitSession<HeadlessSink> {
    let mut session = OutfitSession::new(layers, options, HeadlessSink::new()).with_seed(1);
    session.start();
    session
}

/// Counts `WARN` events.
#[derive(Clone, Default)]
pub struct WarnCounter {
    count: Arc<AtomicUsize>,
}

impl WarnCounter {
    /// Number of warnings seen so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Installs a thread-local subscriber that counts warnings.
///
/// Keep the guard alive for as long as warnings should be counted.
pub fn count_warnings() -> (WarnCounter, tracing::subscriber::DefaultGuard) {
    let counter = WarnCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (counter, guard)
}
