//! Session-wide state owned by one outfit session.

use serde::Serialize;

use super::registry::{CatalogStatus, LayerRegistry};
use crate::models::LayerDescriptor;

/// Position of the wizard.
///
/// Invariant: `active_step < step_count` whenever `step_count > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardState {
    active_step: usize,
    step_count: usize,
}

impl WizardState {
    /// Creates a wizard positioned on the first step.
    pub fn new(step_count: usize) -> Self {
        Self {
            active_step: 0,
            step_count,
        }
    }

    /// Index of the active step.
    pub fn active_step(&self) -> usize {
        self.active_step
    }

    /// Total number of steps.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Whether the active step is the first one.
    pub fn is_first(&self) -> bool {
        self.active_step == 0
    }

    /// Whether the active step is the last one.
    pub fn is_last(&self) -> bool {
        self.step_count > 0 && self.active_step == self.step_count - 1
    }

    pub(crate) fn set_active(&mut self, index: usize) {
        debug_assert!(index < self.step_count);
        self.active_step = index;
    }
}

/// Everything that changes during a session.
///
/// Owned by [`super::OutfitSession`] and passed by reference to the
/// components; there is no process-wide state.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) registry: LayerRegistry,
    pub(crate) wizard: WizardState,
    /// Layer whose gallery is currently rendered
    pub(crate) gallery_layer: Option<String>,
}

impl SessionState {
    /// Creates the initial state: empty catalogs, no selections, step 0.
    pub fn new(descriptors: Vec<LayerDescriptor>) -> Self {
        let wizard = WizardState::new(descriptors.len());
        Self {
            registry: LayerRegistry::new(descriptors),
            wizard,
            gallery_layer: None,
        }
    }

    /// Layer descriptors and their catalogs/selections.
    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    /// Wizard position.
    pub fn wizard(&self) -> &WizardState {
        &self.wizard
    }

    /// Layer whose gallery is currently rendered.
    pub fn gallery_layer(&self) -> Option<&str> {
        self.gallery_layer.as_deref()
    }

    /// Descriptor of the active step's layer.
    pub fn active_layer(&self) -> Option<&LayerDescriptor> {
        self.registry.descriptor_at(self.wizard.active_step)
    }

    /// Serializable view of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        let layers = self
            .registry
            .descriptors()
            .iter()
            .map(|descriptor| {
                let selection = self.registry.selection(&descriptor.id).map(str::to_string);
                LayerSnapshot {
                    image: selection.as_deref().map(|color| descriptor.asset_for(color)),
                    id: descriptor.id.clone(),
                    label: descriptor.display_label.clone(),
                    status: self.registry.status(&descriptor.id).unwrap_or_default(),
                    colors: self.registry.catalog(&descriptor.id).len(),
                    selection,
                }
            })
            .collect();

        SessionSnapshot {
            active_step: self.wizard.active_step,
            step_count: self.wizard.step_count,
            layers,
        }
    }
}

/// One layer in a [`SessionSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerSnapshot {
    /// Layer id
    pub id: String,
    /// Display label
    pub label: String,
    /// Catalog load state
    pub status: CatalogStatus,
    /// Number of colors available
    pub colors: usize,
    /// Selected color id
    pub selection: Option<String>,
    /// Image locator of the selected color
    pub image: Option<String>,
}

/// Serializable summary of a session, printed by the headless mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Active wizard step
    pub active_step: usize,
    /// Total number of steps
    pub step_count: usize,
    /// Per-layer state in wizard order
    pub layers: Vec<LayerSnapshot>,
}
