//! View model the terminal front end draws from.
//!
//! The session pushes state into [`TerminalSink`] through [`RenderSink`];
//! the render pass only reads it.

use crate::models::ColorEntry;
use crate::render::{Gallery, RenderSink};

/// One avatar layer as drawn in the preview panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarLayer {
    /// Surface handle
    pub surface: String,
    /// Current image locator
    pub image: Option<String>,
    /// Whether the layer is drawn
    pub visible: bool,
}

/// One selection control as drawn in the controls panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    /// Control handle
    pub control: String,
    /// Text shown without a value
    pub placeholder: String,
    /// Options in catalog order
    pub options: Vec<ColorEntry>,
    /// Current value
    pub value: Option<String>,
    /// Whether the control accepts input
    pub enabled: bool,
}

impl ControlView {
    /// Display label of the current value, or the placeholder.
    pub fn display(&self) -> &str {
        self.value
            .as_deref()
            .and_then(|value| self.options.iter().find(|entry| entry.id == value))
            .map_or(self.placeholder.as_str(), |entry| entry.display_label.as_str())
    }
}

/// Render sink backing the terminal UI.
///
/// Surfaces and controls keep the order in which the session first
/// touched them, which is wizard order.
#[derive(Debug, Clone, Default)]
pub struct TerminalSink {
    /// Avatar layers, bottom to top
    pub surfaces: Vec<AvatarLayer>,
    /// Selection controls
    pub controls: Vec<ControlView>,
    /// Visible step
    pub step: usize,
    /// Number of steps
    pub step_count: usize,
    /// Back button enablement
    pub back_enabled: bool,
    /// Forward button label
    pub next_label: String,
    /// Step indicator text
    pub step_indicator: String,
    /// Gallery of the visible step
    pub gallery: Option<Gallery>,
}

impl TerminalSink {
    /// Creates an empty view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn surface_mut(&mut self, surface: &str) -> &mut AvatarLayer {
        let index = match self.surfaces.iter().position(|s| s.surface == surface) {
            Some(index) => index,
            None => {
                self.surfaces.push(AvatarLayer {
                    surface: surface.to_string(),
                    image: None,
                    visible: false,
                });
                self.surfaces.len() - 1
            }
        };
        &mut self.surfaces[index]
    }

    fn control_mut(&mut self, control: &str) -> &mut ControlView {
        let index = match self.controls.iter().position(|c| c.control == control) {
            Some(index) => index,
            None => {
                self.controls.push(ControlView {
                    control: control.to_string(),
                    placeholder: String::new(),
                    options: Vec::new(),
                    value: None,
                    enabled: true,
                });
                self.controls.len() - 1
            }
        };
        &mut self.controls[index]
    }
}

impl RenderSink for TerminalSink {
    fn set_surface_image(&mut self, surface: &str, image: Option<&str>) {
        self.surface_mut(surface).image = image.map(str::to_string);
    }

    fn set_surface_visible(&mut self, surface: &str, visible: bool) {
        self.surface_mut(surface).visible = visible;
    }

    fn populate_control(&mut self, control: &str, placeholder: &str, options: &[ColorEntry]) {
        let view = self.control_mut(control);
        view.placeholder = placeholder.to_string();
        view.options = options.to_vec();
        view.value = None;
    }

    fn set_control_value(&mut self, control: &str, value: Option<&str>) {
        self.control_mut(control).value = value.map(str::to_string);
    }

    fn set_control_enabled(&mut self, control: &str, enabled: bool) {
        self.control_mut(control).enabled = enabled;
    }

    fn show_step(&mut self, index: usize, count: usize) {
        self.step = index;
        self.step_count = count;
    }

    fn set_back_enabled(&mut self, enabled: bool) {
        self.back_enabled = enabled;
    }

    fn set_next_label(&mut self, label: &str) {
        self.next_label = label.to_string();
    }

    fn set_step_indicator(&mut self, text: &str) {
        self.step_indicator = text.to_string();
    }

    fn render_gallery(&mut self, gallery: &Gallery) {
        self.gallery = Some(gallery.clone());
    }

    fn set_gallery_highlight(&mut self, color_id: Option<&str>) {
        if let Some(gallery) = &mut self.gallery {
            gallery.highlight(color_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surfaces_keep_first_touch_order() {
        let mut sink = TerminalSink::new();
        sink.set_surface_visible("avatar-shoes", false);
        sink.set_surface_visible("avatar-shirt", false);
        sink.set_surface_image("avatar-shoes", Some("assets/shoes-black.png"));

        let order: Vec<&str> = sink.surfaces.iter().map(|s| s.surface.as_str()).collect();
        assert_eq!(order, vec!["avatar-shoes", "avatar-shirt"]);
        assert_eq!(
            sink.surfaces[0].image.as_deref(),
            Some("assets/shoes-black.png")
        );
    }

    #[test]
    fn test_control_display_falls_back_to_placeholder() {
        let mut sink = TerminalSink::new();
        sink.populate_control(
            "shirt-select",
            "Select a color",
            &[ColorEntry::new("red", "Red")],
        );
        assert_eq!(sink.controls[0].display(), "Select a color");

        sink.set_control_value("shirt-select", Some("red"));
        assert_eq!(sink.controls[0].display(), "Red");
    }
}
