//! Layer descriptors: the static description of each customizable slot.

use serde::{Deserialize, Serialize};

use crate::constants::ASSET_EXTENSION;

/// Placeholder replaced by the color id inside an asset template.
const COLOR_PLACEHOLDER: &str = "{color}";

/// Immutable description of one colorable layer of the avatar.
///
/// Descriptors are created once at startup (from configuration) and never
/// change afterwards. The `control` and `surface` handles name targets in the
/// hosting environment; `None` means the host has no such target and every
/// operation touching it is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    /// Unique key of the layer (e.g., "shirt")
    pub id: String,
    /// Human-readable name shown in the step indicator (e.g., "T-Shirt")
    #[serde(rename = "label")]
    pub display_label: String,
    /// Handle of the selection control (dropdown)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<String>,
    /// Handle of the rendered avatar layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    /// Locator of the color catalog, resolved by the catalog source
    #[serde(rename = "catalog")]
    pub catalog_source: String,
    /// Image locator pattern: either a prefix (`assets/shirt-`) or a
    /// template containing `{color}`
    pub asset_template: String,
}

impl LayerDescriptor {
    /// Creates a descriptor with conventional control/surface handles
    /// (`<id>-select` and `avatar-<id>`).
    pub fn new(
        id: impl Into<String>,
        display_label: impl Into<String>,
        catalog_source: impl Into<String>,
        asset_template: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            control: Some(format!("{id}-select")),
            surface: Some(format!("avatar-{id}")),
            display_label: display_label.into(),
            catalog_source: catalog_source.into(),
            asset_template: asset_template.into(),
            id,
        }
    }

    /// Replaces the control handle.
    pub fn with_control(mut self, control: Option<String>) -> Self {
        self.control = control;
        self
    }

    /// Replaces the surface handle.
    pub fn with_surface(mut self, surface: Option<String>) -> Self {
        self.surface = surface;
        self
    }

    /// Derives the image locator for a color of this layer.
    ///
    /// A template without `{color}` is treated as a prefix, so
    /// `assets/shirt-` + `red` gives `assets/shirt-red.png`.
    pub fn asset_for(&self, color_id: &str) -> String {
        if self.asset_template.contains(COLOR_PLACEHOLDER) {
            self.asset_template.replace(COLOR_PLACEHOLDER, color_id)
        } else {
            format!("{}{}.{}", self.asset_template, color_id, ASSET_EXTENSION)
        }
    }
}

/// The stock layer set: shoes, shirt, pants and an optional accessory.
pub fn default_layers() -> Vec<LayerDescriptor> {
    vec![
        LayerDescriptor::new("shoes", "Shoes", "shoes-colors.json", "assets/shoes-"),
        LayerDescriptor::new("shirt", "T-Shirt", "shirt-colors.json", "assets/shirt-"),
        LayerDescriptor::new("pants", "Pants", "pants-colors.json", "assets/pants-"),
        LayerDescriptor::new(
            "accessory",
            "Accessory",
            "accessory-colors.json",
            "assets/accessory-",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventional_handles() {
        let layer = LayerDescriptor::new("shirt", "T-Shirt", "shirt.json", "assets/shirt-");
        assert_eq!(layer.control.as_deref(), Some("shirt-select"));
        assert_eq!(layer.surface.as_deref(), Some("avatar-shirt"));
    }

    #[test]
    fn test_asset_prefix() {
        let layer = LayerDescriptor::new("shirt", "T-Shirt", "shirt.json", "assets/shirt-");
        assert_eq!(layer.asset_for("red"), "assets/shirt-red.png");
    }

    #[test]
    fn test_asset_template_placeholder() {
        let layer = LayerDescriptor::new("shoes", "Shoes", "shoes.json", "img/{color}/shoes.webp");
        assert_eq!(layer.asset_for("blue"), "img/blue/shoes.webp");
    }

    #[test]
    fn test_default_layers_unique() {
        let layers = default_layers();
        assert_eq!(layers.len(), 4);
        let ids: std::collections::HashSet<&str> =
            layers.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids.len(), layers.len());
    }

    #[test]
    fn test_deserialize_without_handles() {
        let layer: LayerDescriptor = toml::from_str(
            r#"
            id = "hat"
            label = "Hat"
            catalog = "hat.json"
            asset_template = "assets/hat-"
            "#,
        )
        .unwrap();
        assert_eq!(layer.control, None);
        assert_eq!(layer.surface, None);
    }
}
