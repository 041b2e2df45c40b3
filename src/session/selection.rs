//! Selection controller: the only writer of per-layer selections.
//!
//! Every selection change and its visual consequences (surface image,
//! control value, gallery highlight) happen inside one call, so no caller
//! can observe a selection without its matching visuals.

use rand::Rng;
use tracing::{debug, info, warn};

use super::preview::PreviewPresenter;
use super::state::SessionState;
use super::wizard::WizardNavigator;
use crate::render::RenderSink;

/// Result of [`SelectionController::apply_color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The color was selected and rendered
    Applied,
    /// The color is not in the layer's catalog; nothing changed
    Rejected,
}

/// Applies, validates and clears color choices.
#[derive(Debug, Clone)]
pub struct SelectionController {
    presenter: PreviewPresenter,
    navigator: WizardNavigator,
}

impl SelectionController {
    /// Creates a controller that refreshes galleries through `presenter`
    /// and rewinds the wizard through `navigator`.
    pub fn new(presenter: PreviewPresenter, navigator: WizardNavigator) -> Self {
        Self {
            presenter,
            navigator,
        }
    }

    /// Selects `color` for `layer` if it is in the layer's catalog.
    ///
    /// An unknown layer or color is logged and ignored.
    pub fn apply_color(
        &self,
        state: &mut SessionState,
        layer: &str,
        color: &str,
        sink: &mut dyn RenderSink,
    ) -> ApplyOutcome {
        if !state.registry.contains_color(layer, color) {
            warn!(layer, color, "color is not available for layer");
            return ApplyOutcome::Rejected;
        }
        let Some(descriptor) = state.registry.descriptor(layer).cloned() else {
            return ApplyOutcome::Rejected;
        };

        state.registry.set_selection(layer, Some(color.to_string()));

        if let Some(surface) = &descriptor.surface {
            let image = descriptor.asset_for(color);
            sink.set_surface_image(surface, Some(&image));
            sink.set_surface_visible(surface, true);
        }
        if let Some(control) = &descriptor.control {
            sink.set_control_value(control, Some(color));
        }
        self.presenter
            .update_highlight(state, layer, Some(color), sink);

        debug!(layer, color, "color applied");
        ApplyOutcome::Applied
    }

    /// Removes the selection of `layer` and hides its surface.
    ///
    /// Returns `false` only for an unknown layer.
    pub fn clear_layer(&self, state: &mut SessionState, layer: &str, sink: &mut dyn RenderSink) -> bool {
        let Some(descriptor) = state.registry.descriptor(layer).cloned() else {
            warn!(layer, "cannot clear unknown layer");
            return false;
        };

        state.registry.set_selection(layer, None);

        if let Some(surface) = &descriptor.surface {
            sink.set_surface_image(surface, None);
            sink.set_surface_visible(surface, false);
        }
        if let Some(control) = &descriptor.control {
            sink.set_control_value(control, None);
        }
        self.presenter.update_highlight(state, layer, None, sink);

        debug!(layer, "layer cleared");
        true
    }

    /// Picks a uniformly random color for every layer with a catalog.
    ///
    /// Layers with an empty catalog keep their current state. Returns the
    /// number of layers that received a color.
    pub fn randomize_all<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        rng: &mut R,
        sink: &mut dyn RenderSink,
    ) -> usize {
        let picks: Vec<(String, String)> = state
            .registry
            .descriptors()
            .iter()
            .filter_map(|descriptor| {
                let catalog = state.registry.catalog(&descriptor.id);
                if catalog.is_empty() {
                    return None;
                }
                let entry = &catalog[rng.gen_range(0..catalog.len())];
                Some((descriptor.id.clone(), entry.id.clone()))
            })
            .collect();

        let mut applied = 0;
        for (layer, color) in &picks {
            if self.apply_color(state, layer, color, sink) == ApplyOutcome::Applied {
                applied += 1;
            }
        }

        info!(layers = applied, "outfit randomized");
        applied
    }

    /// Clears every layer and returns the wizard to the first step.
    pub fn reset_all(&self, state: &mut SessionState, sink: &mut dyn RenderSink) {
        let layers: Vec<String> = state
            .registry
            .descriptors()
            .iter()
            .map(|descriptor| descriptor.id.clone())
            .collect();
        for layer in &layers {
            self.clear_layer(state, layer, sink);
        }
        self.navigator.go_to(state, 0, sink);
        info!("outfit reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColorEntry, LayerDescriptor};
    use crate::render::HeadlessSink;
    use crate::session::preview::PreviewLabels;
    use crate::session::wizard::WizardLabels;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn controller() -> SelectionController {
        let presenter = PreviewPresenter::new(PreviewLabels {
            loading: "Loading".to_string(),
            unavailable: "Unavailable".to_string(),
        });
        let navigator = WizardNavigator::new(
            WizardLabels {
                continue_label: "Next".to_string(),
                finish_label: "Finish".to_string(),
            },
            presenter.clone(),
        );
        SelectionController::new(presenter, navigator)
    }

    fn state() -> SessionState {
        let mut state = SessionState::new(vec![
            LayerDescriptor::new("shoes", "Shoes", "shoes.json", "assets/shoes-"),
            LayerDescriptor::new("shirt", "T-Shirt", "shirt.json", "assets/shirt-"),
        ]);
        state.registry.set_catalog(
            "shirt",
            vec![ColorEntry::new("red", "Red"), ColorEntry::new("blue", "Blue")],
        );
        state
    }

    #[test]
    fn test_apply_valid_color() {
        let mut state = state();
        let mut sink = HeadlessSink::new();

        let outcome = controller().apply_color(&mut state, "shirt", "red", &mut sink);

        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(state.registry.selection("shirt"), Some("red"));
        let surface = sink.surface("avatar-shirt").unwrap();
        assert_eq!(surface.image.as_deref(), Some("assets/shirt-red.png"));
        assert!(surface.visible);
        assert_eq!(
            sink.control("shirt-select").unwrap().value.as_deref(),
            Some("red")
        );
    }

    #[test]
    fn test_apply_invalid_color_changes_nothing() {
        let mut state = state();
        let mut sink = HeadlessSink::new();
        let controller = controller();
        controller.apply_color(&mut state, "shirt", "red", &mut sink);
        sink.clear_calls();

        let outcome = controller.apply_color(&mut state, "shirt", "green", &mut sink);

        assert_eq!(outcome, ApplyOutcome::Rejected);
        assert_eq!(state.registry.selection("shirt"), Some("red"));
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_apply_to_unknown_layer() {
        let mut state = state();
        let mut sink = HeadlessSink::new();
        let outcome = controller().apply_color(&mut state, "hat", "red", &mut sink);
        assert_eq!(outcome, ApplyOutcome::Rejected);
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_clear_layer_hides_surface() {
        let mut state = state();
        let mut sink = HeadlessSink::new();
        let controller = controller();
        controller.apply_color(&mut state, "shirt", "blue", &mut sink);

        assert!(controller.clear_layer(&mut state, "shirt", &mut sink));

        assert_eq!(state.registry.selection("shirt"), None);
        let surface = sink.surface("avatar-shirt").unwrap();
        assert_eq!(surface.image, None);
        assert!(!surface.visible);
        assert_eq!(sink.control("shirt-select").unwrap().value, None);
    }

    #[test]
    fn test_missing_surface_is_skipped() {
        let mut state = SessionState::new(vec![LayerDescriptor::new(
            "hat",
            "Hat",
            "hat.json",
            "assets/hat-",
        )
        .with_surface(None)
        .with_control(None)]);
        state
            .registry
            .set_catalog("hat", vec![ColorEntry::new("grey", "Grey")]);
        let mut sink = HeadlessSink::new();

        let outcome = controller().apply_color(&mut state, "hat", "grey", &mut sink);

        assert_eq!(outcome, ApplyOutcome::Applied);
        assert_eq!(state.registry.selection("hat"), Some("grey"));
        assert!(sink.surfaces.is_empty());
        assert!(sink.controls.is_empty());
    }

    #[test]
    fn test_randomize_skips_empty_catalogs() {
        let mut state = state();
        let mut sink = HeadlessSink::new();
        let mut rng = StdRng::seed_from_u64(7);

        let applied = controller().randomize_all(&mut state, &mut rng, &mut sink);

        assert_eq!(applied, 1);
        assert_eq!(state.registry.selection("shoes"), None);
        let shirt = state.registry.selection("shirt").unwrap();
        assert!(shirt == "red" || shirt == "blue");
    }

    #[test]
    fn test_randomize_reaches_every_color() {
        let mut state = state();
        let mut sink = HeadlessSink::new();
        let mut rng = StdRng::seed_from_u64(42);
        let controller = controller();

        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            controller.randomize_all(&mut state, &mut rng, &mut sink);
            seen.insert(state.registry.selection("shirt").unwrap().to_string());
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_reset_all_clears_and_rewinds() {
        let mut state = state();
        let mut sink = HeadlessSink::new();
        let controller = controller();
        controller.apply_color(&mut state, "shirt", "red", &mut sink);
        state.wizard.set_active(1);

        controller.reset_all(&mut state, &mut sink);

        assert_eq!(state.registry.selection("shirt"), None);
        assert_eq!(state.wizard.active_step(), 0);
        assert_eq!(sink.active_step, Some(0));
    }
}
