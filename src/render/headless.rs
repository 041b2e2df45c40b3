//! A render sink that records state instead of drawing it.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use super::{Gallery, RenderSink};
use crate::models::ColorEntry;

/// Last known state of an avatar layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SurfaceState {
    /// Image locator, `None` when removed
    pub image: Option<String>,
    /// Visibility flag
    pub visible: bool,
}

/// Last known state of a selection control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlState {
    /// Placeholder text shown when no value is set
    pub placeholder: String,
    /// Available options in catalog order
    pub options: Vec<ColorEntry>,
    /// Current value
    pub value: Option<String>,
    /// Whether the control accepts input
    pub enabled: bool,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            placeholder: String::new(),
            options: Vec::new(),
            value: None,
            enabled: true,
        }
    }
}

/// A single sink invocation, kept in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    /// `set_surface_image`
    SurfaceImage(String, Option<String>),
    /// `set_surface_visible`
    SurfaceVisible(String, bool),
    /// `populate_control`
    PopulateControl(String, usize),
    /// `set_control_value`
    ControlValue(String, Option<String>),
    /// `set_control_enabled`
    ControlEnabled(String, bool),
    /// `show_step`
    ShowStep(usize),
    /// `set_back_enabled`
    BackEnabled(bool),
    /// `set_next_label`
    NextLabel(String),
    /// `set_step_indicator`
    StepIndicator(String),
    /// `render_gallery`, with the gallery's layer
    RenderGallery(String),
    /// `set_gallery_highlight`
    GalleryHighlight(Option<String>),
}

/// Records everything the engine renders.
///
/// Handles registered with [`HeadlessSink::without`] behave like widgets the
/// host does not have: calls naming them are dropped.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSink {
    /// Avatar layers by surface handle
    pub surfaces: BTreeMap<String, SurfaceState>,
    /// Selection controls by control handle
    pub controls: BTreeMap<String, ControlState>,
    /// Index of the visible step container
    pub active_step: Option<usize>,
    /// Number of step containers
    pub step_count: usize,
    /// Back button enablement
    pub back_enabled: bool,
    /// Forward button label
    pub next_label: String,
    /// Step indicator text
    pub step_indicator: String,
    /// Currently rendered gallery
    pub gallery: Option<Gallery>,
    /// Every call in order
    pub calls: Vec<SinkCall>,
    missing: HashSet<String>,
}

impl HeadlessSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a handle as absent from the host.
    pub fn without(mut self, handle: impl Into<String>) -> Self {
        self.missing.insert(handle.into());
        self
    }

    /// State of a surface, if it was ever rendered.
    pub fn surface(&self, surface: &str) -> Option<&SurfaceState> {
        self.surfaces.get(surface)
    }

    /// State of a control, if it was ever rendered.
    pub fn control(&self, control: &str) -> Option<&ControlState> {
        self.controls.get(control)
    }

    /// Forgets recorded calls, keeping the current state.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn has(&self, handle: &str) -> bool {
        !self.missing.contains(handle)
    }
}

impl RenderSink for HeadlessSink {
    fn set_surface_image(&mut self, surface: &str, image: Option<&str>) {
        if !self.has(surface) {
            return;
        }
        self.surfaces.entry(surface.to_string()).or_default().image = image.map(str::to_string);
        self.calls.push(SinkCall::SurfaceImage(
            surface.to_string(),
            image.map(str::to_string),
        ));
    }

    fn set_surface_visible(&mut self, surface: &str, visible: bool) {
        if !self.has(surface) {
            return;
        }
        self.surfaces.entry(surface.to_string()).or_default().visible = visible;
        self.calls
            .push(SinkCall::SurfaceVisible(surface.to_string(), visible));
    }

    fn populate_control(&mut self, control: &str, placeholder: &str, options: &[ColorEntry]) {
        if !self.has(control) {
            return;
        }
        let state = self.controls.entry(control.to_string()).or_default();
        state.placeholder = placeholder.to_string();
        state.options = options.to_vec();
        state.value = None;
        self.calls
            .push(SinkCall::PopulateControl(control.to_string(), options.len()));
    }

    fn set_control_value(&mut self, control: &str, value: Option<&str>) {
        if !self.has(control) {
            return;
        }
        self.controls.entry(control.to_string()).or_default().value = value.map(str::to_string);
        self.calls.push(SinkCall::ControlValue(
            control.to_string(),
            value.map(str::to_string),
        ));
    }

    fn set_control_enabled(&mut self, control: &str, enabled: bool) {
        if !self.has(control) {
            return;
        }
        self.controls.entry(control.to_string()).or_default().enabled = enabled;
        self.calls
            .push(SinkCall::ControlEnabled(control.to_string(), enabled));
    }

    fn show_step(&mut self, index: usize, count: usize) {
        self.active_step = Some(index);
        self.step_count = count;
        self.calls.push(SinkCall::ShowStep(index));
    }

    fn set_back_enabled(&mut self, enabled: bool) {
        self.back_enabled = enabled;
        self.calls.push(SinkCall::BackEnabled(enabled));
    }

    fn set_next_label(&mut self, label: &str) {
        self.next_label = label.to_string();
        self.calls.push(SinkCall::NextLabel(label.to_string()));
    }

    fn set_step_indicator(&mut self, text: &str) {
        self.step_indicator = text.to_string();
        self.calls.push(SinkCall::StepIndicator(text.to_string()));
    }

    fn render_gallery(&mut self, gallery: &Gallery) {
        self.gallery = Some(gallery.clone());
        self.calls.push(SinkCall::RenderGallery(gallery.layer.clone()));
    }

    fn set_gallery_highlight(&mut self, color_id: Option<&str>) {
        if let Some(gallery) = &mut self.gallery {
            gallery.highlight(color_id);
        }
        self.calls
            .push(SinkCall::GalleryHighlight(color_id.map(str::to_string)));
    }
}
