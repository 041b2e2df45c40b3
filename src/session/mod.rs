//! The outfit session: layer state, wizard flow and preview, wired together.
//!
//! [`OutfitSession`] owns the mutable [`SessionState`] and a [`RenderSink`].
//! The components ([`SelectionController`], [`WizardNavigator`],
//! [`PreviewPresenter`]) hold only configuration and receive the state by
//! reference, so every mutation goes through one owner.

pub mod preview;
pub mod registry;
pub mod selection;
pub mod state;
pub mod wizard;

pub use preview::{PreviewLabels, PreviewPresenter};
pub use registry::{CatalogStatus, LayerRegistry};
pub use selection::{ApplyOutcome, SelectionController};
pub use state::{LayerSnapshot, SessionSnapshot, SessionState, WizardState};
pub use wizard::{WizardLabels, WizardNavigator};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::{Config, PopulationMode};
use crate::constants::{
    DEFAULT_CONTINUE_LABEL, DEFAULT_FINISH_LABEL, DEFAULT_LOADING_LABEL,
    DEFAULT_PLACEHOLDER_LABEL, DEFAULT_UNAVAILABLE_LABEL,
};
use crate::models::{ColorEntry, LayerDescriptor};
use crate::render::RenderSink;
use crate::services::{CatalogFeed, CatalogLoader, LoadReport};

/// Behavior and texts of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Select the first color when a catalog arrives and nothing is selected
    pub default_to_first_color: bool,
    /// When loaded catalogs reach the controls
    pub population: PopulationMode,
    /// Placeholder option of every selection control
    pub placeholder_label: String,
    /// Forward button labels
    pub wizard: WizardLabels,
    /// Gallery placeholder texts
    pub preview: PreviewLabels,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            default_to_first_color: true,
            population: PopulationMode::Incremental,
            placeholder_label: DEFAULT_PLACEHOLDER_LABEL.to_string(),
            wizard: WizardLabels {
                continue_label: DEFAULT_CONTINUE_LABEL.to_string(),
                finish_label: DEFAULT_FINISH_LABEL.to_string(),
            },
            preview: PreviewLabels {
                loading: DEFAULT_LOADING_LABEL.to_string(),
                unavailable: DEFAULT_UNAVAILABLE_LABEL.to_string(),
            },
        }
    }
}

impl SessionOptions {
    /// Builds options from the application configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_to_first_color: config.behavior.default_to_first_color,
            population: config.behavior.population,
            placeholder_label: config.ui.placeholder_label.clone(),
            wizard: WizardLabels {
                continue_label: config.ui.continue_label.clone(),
                finish_label: config.ui.finish_label.clone(),
            },
            preview: PreviewLabels {
                loading: config.ui.loading_label.clone(),
                unavailable: config.ui.unavailable_label.clone(),
            },
        }
    }
}

/// User interactions the session reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A selection control changed; `None` is the placeholder option
    ControlChanged {
        /// Layer owning the control
        layer: String,
        /// New value
        value: Option<String>,
    },
    /// A gallery item was clicked
    GalleryClicked {
        /// Layer the gallery belongs to
        layer: String,
        /// Color of the clicked item
        color: String,
    },
    /// Back button
    Back,
    /// Forward button
    Next,
    /// Jump to a step
    GoTo(usize),
    /// Random outfit
    Randomize,
    /// Clear everything and rewind
    Reset,
    /// Clear one layer
    ClearLayer(String),
}

/// One customizer session bound to a render sink.
pub struct OutfitSession<S: RenderSink> {
    state: SessionState,
    sink: S,
    options: SessionOptions,
    rng: StdRng,
    presenter: PreviewPresenter,
    navigator: WizardNavigator,
    selection: SelectionController,
}

impl<S: RenderSink> OutfitSession<S> {
    /// Creates a session over `layers`. Nothing is rendered until [`Self::start`].
    pub fn new(layers: Vec<LayerDescriptor>, options: SessionOptions, sink: S) -> Self {
        let presenter = PreviewPresenter::new(options.preview.clone());
        let navigator = WizardNavigator::new(options.wizard.clone(), presenter.clone());
        let selection = SelectionController::new(presenter.clone(), navigator.clone());

        Self {
            state: SessionState::new(layers),
            sink,
            options,
            rng: StdRng::from_entropy(),
            presenter,
            navigator,
            selection,
        }
    }

    /// Uses a deterministic random source for [`Self::randomize`].
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Renders the initial view: empty disabled controls, hidden avatar
    /// layers, and the first wizard step.
    pub fn start(&mut self) {
        let descriptors = self.state.registry.descriptors().to_vec();
        for descriptor in &descriptors {
            if let Some(control) = &descriptor.control {
                self.sink
                    .populate_control(control, &self.options.placeholder_label, &[]);
                self.sink.set_control_enabled(control, false);
            }
            if let Some(surface) = &descriptor.surface {
                self.sink.set_surface_image(surface, None);
                self.sink.set_surface_visible(surface, false);
            }
        }
        self.navigator.show_initial(&mut self.state, &mut self.sink);
        info!(layers = descriptors.len(), "session started");
    }

    /// Loads every layer's catalog and applies the results.
    ///
    /// In incremental mode each catalog is applied as it arrives; in batch
    /// mode all of them are applied together after the last one.
    pub async fn load_catalogs(&mut self, loader: &CatalogLoader) -> LoadReport {
        let descriptors = self.state.registry.descriptors().to_vec();

        match self.options.population {
            PopulationMode::Incremental => {
                loader
                    .load_all(&descriptors, |layer, entries| {
                        self.apply_catalog(layer, entries);
                    })
                    .await
            }
            PopulationMode::Batch => {
                let mut arrived = Vec::with_capacity(descriptors.len());
                let report = loader
                    .load_all(&descriptors, |layer, entries| {
                        arrived.push((layer.to_string(), entries));
                    })
                    .await;
                for (layer, entries) in arrived {
                    self.apply_catalog(&layer, entries);
                }
                report
            }
        }
    }

    /// Starts loading every layer's catalog on `handle` without waiting.
    ///
    /// Results reach the session through [`Self::apply_arrivals`].
    #[must_use]
    pub fn spawn_catalog_load(
        &self,
        loader: &CatalogLoader,
        handle: &tokio::runtime::Handle,
    ) -> CatalogFeed {
        loader.spawn_all(
            handle,
            self.state.registry.descriptors().to_vec(),
            self.options.population,
        )
    }

    /// Applies every catalog that has arrived on `feed` so far.
    pub fn apply_arrivals(&mut self, feed: &mut CatalogFeed) -> usize {
        let mut applied = 0;
        while let Some((layer, colors)) = feed.try_next() {
            self.apply_catalog(&layer, colors);
            applied += 1;
        }
        applied
    }

    /// Installs a catalog for `layer` and brings its control, selection and
    /// gallery in line with it.
    ///
    /// A selection that is still in the new catalog is re-applied, one that
    /// is not is cleared. Without a selection the first color is chosen when
    /// `default_to_first_color` is set.
    pub fn apply_catalog(&mut self, layer: &str, entries: Vec<ColorEntry>) {
        if !self.state.registry.set_catalog(layer, entries) {
            debug!(layer, "catalog for unknown layer ignored");
            return;
        }
        let Some(descriptor) = self.state.registry.descriptor(layer).cloned() else {
            return;
        };
        let catalog = self.state.registry.catalog(layer).to_vec();

        if let Some(control) = &descriptor.control {
            self.sink
                .populate_control(control, &self.options.placeholder_label, &catalog);
            self.sink.set_control_enabled(control, !catalog.is_empty());
        }

        let current = self.state.registry.selection(layer).map(str::to_string);
        match current {
            Some(color) if self.state.registry.contains_color(layer, &color) => {
                self.selection
                    .apply_color(&mut self.state, layer, &color, &mut self.sink);
            }
            Some(_) => {
                self.selection
                    .clear_layer(&mut self.state, layer, &mut self.sink);
            }
            None => {
                if self.options.default_to_first_color {
                    if let Some(first) = catalog.first() {
                        self.selection
                            .apply_color(&mut self.state, layer, &first.id, &mut self.sink);
                    }
                }
            }
        }

        let active = self.state.wizard.active_step();
        if self.state.registry.index_of(layer) == Some(active) {
            self.presenter
                .render_for_step(&mut self.state, active, &mut self.sink);
        }
    }

    /// Routes a user interaction to the owning component.
    pub fn dispatch(&mut self, event: UiEvent) {
        debug!(?event, "ui event");
        match event {
            UiEvent::ControlChanged { layer, value } => match value {
                Some(color) => {
                    self.apply_color(&layer, &color);
                }
                None => {
                    self.clear_layer(&layer);
                }
            },
            UiEvent::GalleryClicked { layer, color } => self.dispatch(UiEvent::ControlChanged {
                layer,
                value: Some(color),
            }),
            UiEvent::Back => {
                self.back();
            }
            UiEvent::Next => self.next(),
            UiEvent::GoTo(index) => {
                self.navigator.go_to(&mut self.state, index, &mut self.sink);
            }
            UiEvent::Randomize => {
                self.randomize();
            }
            UiEvent::Reset => self.reset(),
            UiEvent::ClearLayer(layer) => {
                self.clear_layer(&layer);
            }
        }
    }

    /// Selects `color` for `layer`.
    pub fn apply_color(&mut self, layer: &str, color: &str) -> ApplyOutcome {
        self.selection
            .apply_color(&mut self.state, layer, color, &mut self.sink)
    }

    /// Clears the selection of `layer`.
    pub fn clear_layer(&mut self, layer: &str) -> bool {
        self.selection
            .clear_layer(&mut self.state, layer, &mut self.sink)
    }

    /// Picks a random color for every layer with a catalog.
    pub fn randomize(&mut self) -> usize {
        self.selection
            .randomize_all(&mut self.state, &mut self.rng, &mut self.sink)
    }

    /// Clears every layer and returns to the first step.
    pub fn reset(&mut self) {
        self.selection.reset_all(&mut self.state, &mut self.sink);
    }

    /// Goes one step back.
    pub fn back(&mut self) -> bool {
        self.navigator.back(&mut self.state, &mut self.sink)
    }

    /// Goes one step forward, wrapping after the last.
    pub fn next(&mut self) {
        self.navigator.next(&mut self.state, &mut self.sink);
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Session options.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// The render sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the render sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the session, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Serializable summary of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot()
    }
}
