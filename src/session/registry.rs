//! Layer registry: descriptors plus per-layer catalog and selection storage.
//!
//! The registry is pure storage. It does not validate selections; that is
//! the selection controller's job, and it is the only writer of selections.

use serde::Serialize;

use crate::models::{ColorEntry, LayerDescriptor};

/// Load state of a layer's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogStatus {
    /// No load attempt has completed yet
    #[default]
    Pending,
    /// Catalog loaded with at least one color
    Ready,
    /// Load completed but produced no colors
    Unavailable,
}

#[derive(Debug, Clone, Default)]
struct LayerSlot {
    catalog: Vec<ColorEntry>,
    selection: Option<String>,
    status: CatalogStatus,
}

/// Static layer descriptions and their mutable catalog/selection state.
#[derive(Debug, Clone)]
pub struct LayerRegistry {
    descriptors: Vec<LayerDescriptor>,
    slots: Vec<LayerSlot>,
}

impl LayerRegistry {
    /// Creates a registry with empty catalogs and no selections.
    pub fn new(descriptors: Vec<LayerDescriptor>) -> Self {
        let slots = vec![LayerSlot::default(); descriptors.len()];
        Self { descriptors, slots }
    }

    /// All descriptors in wizard order.
    pub fn descriptors(&self) -> &[LayerDescriptor] {
        &self.descriptors
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the registry has no layers.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Position of a layer in wizard order.
    pub fn index_of(&self, layer: &str) -> Option<usize> {
        self.descriptors.iter().position(|d| d.id == layer)
    }

    /// Descriptor of a layer by id.
    pub fn descriptor(&self, layer: &str) -> Option<&LayerDescriptor> {
        self.descriptors.iter().find(|d| d.id == layer)
    }

    /// Descriptor at a wizard position.
    pub fn descriptor_at(&self, index: usize) -> Option<&LayerDescriptor> {
        self.descriptors.get(index)
    }

    /// Catalog of a layer; empty for unknown layers.
    pub fn catalog(&self, layer: &str) -> &[ColorEntry] {
        match self.slot(layer) {
            Some(slot) => &slot.catalog,
            None => &[],
        }
    }

    /// Current selection of a layer.
    pub fn selection(&self, layer: &str) -> Option<&str> {
        self.slot(layer).and_then(|slot| slot.selection.as_deref())
    }

    /// Catalog load state of a layer.
    pub fn status(&self, layer: &str) -> Option<CatalogStatus> {
        self.slot(layer).map(|slot| slot.status)
    }

    /// Whether `color` is in the layer's current catalog.
    pub fn contains_color(&self, layer: &str, color: &str) -> bool {
        self.catalog(layer).iter().any(|entry| entry.id == color)
    }

    pub(crate) fn set_selection(&mut self, layer: &str, selection: Option<String>) -> bool {
        match self.slot_mut(layer) {
            Some(slot) => {
                slot.selection = selection;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_catalog(&mut self, layer: &str, catalog: Vec<ColorEntry>) -> bool {
        match self.slot_mut(layer) {
            Some(slot) => {
                slot.status = if catalog.is_empty() {
                    CatalogStatus::Unavailable
                } else {
                    CatalogStatus::Ready
                };
                slot.catalog = catalog;
                true
            }
            None => false,
        }
    }

    fn slot(&self, layer: &str) -> Option<&LayerSlot> {
        self.index_of(layer).map(|index| &self.slots[index])
    }

    fn slot_mut(&mut self, layer: &str) -> Option<&mut LayerSlot> {
        self.index_of(layer).map(|index| &mut self.slots[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> LayerRegistry {
        LayerRegistry::new(vec![
            LayerDescriptor::new("shoes", "Shoes", "shoes.json", "assets/shoes-"),
            LayerDescriptor::new("shirt", "T-Shirt", "shirt.json", "assets/shirt-"),
        ])
    }

    #[test]
    fn test_new_registry_is_pending_and_empty() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.status("shirt"), Some(CatalogStatus::Pending));
        assert!(registry.catalog("shirt").is_empty());
        assert_eq!(registry.selection("shirt"), None);
    }

    #[test]
    fn test_unknown_layer_lookups() {
        let mut registry = registry();
        assert_eq!(registry.index_of("hat"), None);
        assert!(registry.catalog("hat").is_empty());
        assert_eq!(registry.status("hat"), None);
        assert!(!registry.set_selection("hat", Some("red".to_string())));
        assert!(!registry.set_catalog("hat", Vec::new()));
    }

    #[test]
    fn test_set_catalog_updates_status() {
        let mut registry = registry();
        registry.set_catalog("shoes", vec![ColorEntry::new("black", "Black")]);
        registry.set_catalog("shirt", Vec::new());

        assert_eq!(registry.status("shoes"), Some(CatalogStatus::Ready));
        assert_eq!(registry.status("shirt"), Some(CatalogStatus::Unavailable));
        assert!(registry.contains_color("shoes", "black"));
        assert!(!registry.contains_color("shoes", "white"));
    }

    #[test]
    fn test_lookup_by_position() {
        let registry = registry();
        assert_eq!(registry.index_of("shirt"), Some(1));
        assert_eq!(registry.descriptor_at(0).map(|d| d.id.as_str()), Some("shoes"));
        assert!(registry.descriptor_at(2).is_none());
    }
}
