//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the default wizard labels.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Outfit Wizard";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "outfit-wizard";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "OutfitWizard";

/// Label of the forward button on every step but the last.
pub const DEFAULT_CONTINUE_LABEL: &str = "Next";

/// Label of the forward button on the last step.
pub const DEFAULT_FINISH_LABEL: &str = "Finish";

/// Placeholder shown by a selection control with no value.
pub const DEFAULT_PLACEHOLDER_LABEL: &str = "Select a color";

/// Gallery placeholder while a catalog has not arrived yet.
pub const DEFAULT_LOADING_LABEL: &str = "Loading colors...";

/// Gallery placeholder for a layer whose catalog could not be loaded.
pub const DEFAULT_UNAVAILABLE_LABEL: &str = "No colors available";

/// File extension appended to asset templates that have no `{color}` placeholder.
pub const ASSET_EXTENSION: &str = "png";
