//! Preview gallery for the active wizard step.

use super::registry::{CatalogStatus, LayerRegistry};
use super::state::SessionState;
use crate::models::LayerDescriptor;
use crate::render::{Gallery, GalleryContent, GalleryItem, RenderSink};

/// Placeholder texts used when a layer has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLabels {
    /// Shown while the catalog has not arrived
    pub loading: String,
    /// Shown when the catalog loaded empty
    pub unavailable: String,
}

/// Builds the gallery of the active step and keeps its highlight in sync.
#[derive(Debug, Clone)]
pub struct PreviewPresenter {
    labels: PreviewLabels,
}

impl PreviewPresenter {
    /// Creates a presenter with the given placeholder texts.
    pub fn new(labels: PreviewLabels) -> Self {
        Self { labels }
    }

    /// Rebuilds the gallery for the layer at `step`.
    pub fn render_for_step(&self, state: &mut SessionState, step: usize, sink: &mut dyn RenderSink) {
        let Some(descriptor) = state.registry.descriptor_at(step) else {
            return;
        };
        let gallery = self.build_gallery(&state.registry, descriptor);
        state.gallery_layer = Some(gallery.layer.clone());
        sink.render_gallery(&gallery);
    }

    /// Re-toggles the selected marker if the rendered gallery belongs to `layer`.
    pub fn update_highlight(
        &self,
        state: &SessionState,
        layer: &str,
        color: Option<&str>,
        sink: &mut dyn RenderSink,
    ) {
        if state.gallery_layer.as_deref() == Some(layer) {
            sink.set_gallery_highlight(color);
        }
    }

    /// Builds the gallery model for a layer from the registry's state.
    pub fn build_gallery(&self, registry: &LayerRegistry, descriptor: &LayerDescriptor) -> Gallery {
        let catalog = registry.catalog(&descriptor.id);
        let content = if catalog.is_empty() {
            let text = match registry.status(&descriptor.id) {
                Some(CatalogStatus::Pending) => &self.labels.loading,
                _ => &self.labels.unavailable,
            };
            GalleryContent::Placeholder(text.clone())
        } else {
            let selection = registry.selection(&descriptor.id);
            GalleryContent::Items(
                catalog
                    .iter()
                    .map(|entry| GalleryItem {
                        color_id: entry.id.clone(),
                        label: entry.display_label.clone(),
                        image: descriptor.asset_for(&entry.id),
                        selected: selection == Some(entry.id.as_str()),
                    })
                    .collect(),
            )
        };

        Gallery {
            layer: descriptor.id.clone(),
            title: descriptor.display_label.clone(),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorEntry;
    use crate::render::{HeadlessSink, SinkCall};

    fn presenter() -> PreviewPresenter {
        PreviewPresenter::new(PreviewLabels {
            loading: "Loading".to_string(),
            unavailable: "Unavailable".to_string(),
        })
    }

    fn state() -> SessionState {
        SessionState::new(vec![
            LayerDescriptor::new("shoes", "Shoes", "shoes.json", "assets/shoes-"),
            LayerDescriptor::new("shirt", "T-Shirt", "shirt.json", "assets/shirt-"),
        ])
    }

    #[test]
    fn test_gallery_marks_selection() {
        let mut state = state();
        state.registry.set_catalog(
            "shirt",
            vec![ColorEntry::new("red", "Red"), ColorEntry::new("blue", "Blue")],
        );
        state.registry.set_selection("shirt", Some("blue".to_string()));

        let mut sink = HeadlessSink::new();
        presenter().render_for_step(&mut state, 1, &mut sink);

        let gallery = sink.gallery.unwrap();
        assert_eq!(gallery.layer, "shirt");
        assert_eq!(gallery.items().len(), 2);
        assert_eq!(gallery.items()[0].image, "assets/shirt-red.png");
        assert_eq!(gallery.selected(), Some("blue"));
        assert_eq!(state.gallery_layer.as_deref(), Some("shirt"));
    }

    #[test]
    fn test_placeholder_while_loading_and_when_unavailable() {
        let mut state = state();
        let mut sink = HeadlessSink::new();

        presenter().render_for_step(&mut state, 0, &mut sink);
        assert_eq!(
            sink.gallery.as_ref().unwrap().content,
            GalleryContent::Placeholder("Loading".to_string())
        );

        state.registry.set_catalog("shoes", Vec::new());
        presenter().render_for_step(&mut state, 0, &mut sink);
        assert_eq!(
            sink.gallery.as_ref().unwrap().content,
            GalleryContent::Placeholder("Unavailable".to_string())
        );
    }

    #[test]
    fn test_highlight_ignores_other_layers() {
        let mut state = state();
        state.registry.set_catalog("shoes", vec![ColorEntry::new("black", "Black")]);
        let mut sink = HeadlessSink::new();
        presenter().render_for_step(&mut state, 0, &mut sink);
        sink.clear_calls();

        presenter().update_highlight(&state, "shirt", Some("red"), &mut sink);
        assert!(sink.calls.is_empty());

        presenter().update_highlight(&state, "shoes", Some("black"), &mut sink);
        assert_eq!(
            sink.calls,
            vec![SinkCall::GalleryHighlight(Some("black".to_string()))]
        );
        assert_eq!(sink.gallery.unwrap().selected(), Some("black"));
    }

    #[test]
    fn test_out_of_range_step_renders_nothing() {
        let mut state = state();
        let mut sink = HeadlessSink::new();
        presenter().render_for_step(&mut state, 5, &mut sink);
        assert!(sink.gallery.is_none());
        assert!(state.gallery_layer.is_none());
    }
}
