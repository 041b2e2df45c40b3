//! Catalog loading with isolated, non-fatal failures.
//!
//! Every layer's catalog is fetched concurrently. A load never returns an
//! error to its caller: unreachable sources, bad payloads and timeouts all
//! degrade to an empty catalog plus a diagnostic.
//!
//! [`CatalogLoader::spawn_all`] runs the loads as a background task and hands
//! results back through a [`CatalogFeed`], so a UI loop can keep drawing while
//! slow catalogs are still in flight.

use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, error, info, warn};

use super::catalog_source::{CatalogError, CatalogSource};
use crate::config::PopulationMode;
use crate::models::{parse_catalog, ColorEntry, LayerDescriptor};

/// Outcome of one layer's load attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerLoad {
    /// Layer id
    pub layer: String,
    /// Number of colors that ended up in the catalog
    pub colors: usize,
}

/// Summary returned once every layer's load attempt has completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Per-layer results in completion order
    pub layers: Vec<LayerLoad>,
}

impl LoadReport {
    /// Layers whose catalog came back empty.
    pub fn empty_layers(&self) -> impl Iterator<Item = &str> {
        self.layers
            .iter()
            .filter(|load| load.colors == 0)
            .map(|load| load.layer.as_str())
    }

    /// Color count for a layer, if it was part of the batch.
    pub fn colors_for(&self, layer: &str) -> Option<usize> {
        self.layers
            .iter()
            .find(|load| load.layer == layer)
            .map(|load| load.colors)
    }
}

/// Message sent from a background load to its [`CatalogFeed`].
#[derive(Debug)]
pub enum CatalogMessage {
    /// One layer's catalog arrived
    Loaded {
        /// Layer id
        layer: String,
        /// Validated colors, possibly empty
        colors: Vec<ColorEntry>,
    },
    /// Every load attempt completed
    Finished(LoadReport),
}

/// Receiving end of [`CatalogLoader::spawn_all`].
///
/// Drain it with [`CatalogFeed::try_next`] from a synchronous loop; it never
/// blocks.
#[derive(Debug)]
pub struct CatalogFeed {
    rx: UnboundedReceiver<CatalogMessage>,
    report: Option<LoadReport>,
}

impl CatalogFeed {
    /// Next catalog that has arrived, if any.
    pub fn try_next(&mut self) -> Option<(String, Vec<ColorEntry>)> {
        loop {
            match self.rx.try_recv() {
                Ok(CatalogMessage::Loaded { layer, colors }) => return Some((layer, colors)),
                Ok(CatalogMessage::Finished(report)) => self.report = Some(report),
                Err(_) => return None,
            }
        }
    }

    /// Whether the background task has reported completion.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.report.is_some()
    }

    /// Final report, once finished.
    #[must_use]
    pub const fn report(&self) -> Option<&LoadReport> {
        self.report.as_ref()
    }
}

/// Fetches and validates color catalogs through a [`CatalogSource`].
#[derive(Clone)]
pub struct CatalogLoader {
    source: Arc<dyn CatalogSource>,
    timeout: Option<Duration>,
}

impl CatalogLoader {
    /// Creates a loader without a fetch timeout.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            timeout: None,
        }
    }

    /// Sets (or removes) the per-fetch timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads one catalog. Never fails: problems yield an empty list.
    pub async fn load(&self, locator: &str) -> Vec<ColorEntry> {
        let payload = match self.fetch(locator).await {
            Ok(payload) => payload,
            Err(e) => {
                error!(locator, error = %e, "catalog fetch failed");
                return Vec::new();
            }
        };

        match parse_catalog(&payload) {
            Ok(parsed) => {
                for id in &parsed.duplicates {
                    warn!(locator, color = %id, "duplicate color id dropped");
                }
                debug!(locator, colors = parsed.entries.len(), "catalog loaded");
                parsed.entries
            }
            Err(problem) => {
                warn!(locator, %problem, "catalog payload rejected");
                Vec::new()
            }
        }
    }

    /// Loads every layer's catalog concurrently.
    ///
    /// `on_loaded` runs once per layer as soon as that layer's load finishes,
    /// in completion order. The returned report is only produced after every
    /// attempt has completed.
    pub async fn load_all<F>(&self, layers: &[LayerDescriptor], mut on_loaded: F) -> LoadReport
    where
        F: FnMut(&str, Vec<ColorEntry>),
    {
        let mut pending: FuturesUnordered<_> = layers
            .iter()
            .map(|layer| async move {
                let entries = self.load(&layer.catalog_source).await;
                (layer.id.as_str(), entries)
            })
            .collect();

        let mut report = LoadReport::default();
        while let Some((layer, entries)) = pending.next().await {
            report.layers.push(LayerLoad {
                layer: layer.to_string(),
                colors: entries.len(),
            });
            on_loaded(layer, entries);
        }

        info!(
            layers = report.layers.len(),
            empty = report.empty_layers().count(),
            "all catalogs ready"
        );
        report
    }

    /// Runs [`Self::load_all`] on `handle` and returns a feed of its results.
    ///
    /// Incremental population forwards each catalog as it completes. Batch
    /// population holds them until the last load is done, then forwards all
    /// of them in completion order. [`CatalogMessage::Finished`] always comes
    /// last.
    #[must_use]
    pub fn spawn_all(
        &self,
        handle: &Handle,
        layers: Vec<LayerDescriptor>,
        population: PopulationMode,
    ) -> CatalogFeed {
        let (tx, rx) = mpsc::unbounded_channel();
        let loader = self.clone();

        handle.spawn(async move {
            let mut held = Vec::new();
            let report = loader
                .load_all(&layers, |layer, colors| {
                    let message = CatalogMessage::Loaded {
                        layer: layer.to_string(),
                        colors,
                    };
                    match population {
                        PopulationMode::Incremental => {
                            if tx.send(message).is_err() {
                                debug!(layer, "catalog feed closed");
                            }
                        }
                        PopulationMode::Batch => held.push(message),
                    }
                })
                .await;

            for message in held {
                if tx.send(message).is_err() {
                    debug!("catalog feed closed");
                    return;
                }
            }
            if tx.send(CatalogMessage::Finished(report)).is_err() {
                debug!("catalog feed closed");
            }
        });

        CatalogFeed { rx, report: None }
    }

    async fn fetch(&self, locator: &str) -> Result<String, CatalogError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.source.fetch(locator))
                .await
                .map_err(|_| CatalogError::TimedOut(locator.to_string()))?,
            None => self.source.fetch(locator).await,
        }
    }
}
