//! Data models for layers and color catalogs.
//!
//! Models are independent of UI and session logic.

pub mod color;
pub mod layer;

// Re-export all model types
pub use color::{parse_catalog, ColorEntry, ParsedCatalog, PayloadProblem};
pub use layer::{default_layers, LayerDescriptor};
