//! Outfit Wizard Library
//!
//! This library provides the layer-state synchronization engine behind the
//! outfit customizer: catalog loading, per-layer selections kept in sync
//! with the rendered avatar, the step-by-step wizard and its preview gallery.

// Module declarations
pub mod config;
pub mod constants;
pub mod models;
pub mod render;
pub mod services;
pub mod session;
#[cfg(feature = "tui")]
pub mod tui;
