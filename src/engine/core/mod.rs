//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! and plugin initialisation.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with asset loading systems, the pointer interaction
/// tool, and the camera fly-to systems.
pub mod app_setup;

/// Application state machine and loading progress transitions.
///
/// Manages states from configuration loading through model loading to
/// runtime execution.
pub mod app_state;

/// Window and default plugin configuration.
pub mod window_config;
