//! Rendering seam between the session engine and its hosting environment.
//!
//! The engine never touches a concrete UI. It pushes state into a
//! [`RenderSink`], which a host implements for its own widgets: the terminal
//! front end in `tui`, or the recording [`HeadlessSink`] used for scripted
//! runs and tests.

pub mod headless;

pub use headless::{ControlState, HeadlessSink, SinkCall, SurfaceState};

use serde::Serialize;

use crate::models::ColorEntry;

/// One clickable color of the preview gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryItem {
    /// Color id the item selects
    pub color_id: String,
    /// Display label of the color
    pub label: String,
    /// Derived image locator for the preview thumbnail
    pub image: String,
    /// Whether this item is the layer's current selection
    pub selected: bool,
}

/// What the gallery shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GalleryContent {
    /// One item per catalog entry
    Items(Vec<GalleryItem>),
    /// Single placeholder text (catalog loading or unavailable)
    Placeholder(String),
}

/// The preview gallery for one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gallery {
    /// Layer the gallery belongs to
    pub layer: String,
    /// Title shown above the items
    pub title: String,
    /// Items or placeholder
    pub content: GalleryContent,
}

impl Gallery {
    /// Items of the gallery, empty for a placeholder.
    pub fn items(&self) -> &[GalleryItem] {
        match &self.content {
            GalleryContent::Items(items) => items,
            GalleryContent::Placeholder(_) => &[],
        }
    }

    /// Id of the highlighted item, if any.
    pub fn selected(&self) -> Option<&str> {
        self.items()
            .iter()
            .find(|item| item.selected)
            .map(|item| item.color_id.as_str())
    }

    /// Re-toggles every item's selected marker.
    pub fn highlight(&mut self, color_id: Option<&str>) {
        if let GalleryContent::Items(items) = &mut self.content {
            for item in items {
                item.selected = Some(item.color_id.as_str()) == color_id;
            }
        }
    }
}

/// Output capability the session engine drives.
///
/// Targets are named by handle. Implementations ignore handles they do not
/// have, so a missing widget is never an error.
pub trait RenderSink {
    /// Sets (or removes) the image of an avatar layer.
    fn set_surface_image(&mut self, surface: &str, image: Option<&str>);

    /// Shows or hides an avatar layer.
    fn set_surface_visible(&mut self, surface: &str, visible: bool);

    /// Replaces the options of a selection control.
    fn populate_control(&mut self, control: &str, placeholder: &str, options: &[ColorEntry]);

    /// Sets the value of a selection control; `None` shows the placeholder.
    fn set_control_value(&mut self, control: &str, value: Option<&str>);

    /// Enables or disables a selection control.
    fn set_control_enabled(&mut self, control: &str, enabled: bool);

    /// Makes step `index` the only visible step container.
    fn show_step(&mut self, index: usize, count: usize);

    /// Enables or disables the back button.
    fn set_back_enabled(&mut self, enabled: bool);

    /// Sets the forward button label.
    fn set_next_label(&mut self, label: &str);

    /// Sets the step indicator text.
    fn set_step_indicator(&mut self, text: &str);

    /// Replaces the gallery.
    fn render_gallery(&mut self, gallery: &Gallery);

    /// Moves the gallery's selected marker without rebuilding it.
    fn set_gallery_highlight(&mut self, color_id: Option<&str>);
}
