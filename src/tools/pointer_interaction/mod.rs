//! Pointer interaction tool: hover highlighting and click-to-focus.
//!
//! Sits between raw cursor events and the scene's object and camera state.
//! Two responsibilities share one picking service:
//!
//! ### Hover Tracker
//! Every frame the cursor position resolves to the nearest pickable mesh.
//! Entering a mesh captures its material colour and applies the highlight;
//! leaving it (or moving onto another mesh) restores the captured colour.
//! An optional name filter keeps bookkeeping for every hit but recolours
//! only matching objects.
//!
//! ### Focus Navigator
//! A primary-button click on a mesh starts a camera tween toward the mesh's
//! world position, replacing any flight already underway. The per-scene
//! `lock_depth` option holds the camera's Z and animates only X/Y.
//!
//! ## Picking
//!
//! Cursor pixels map to normalized device coordinates, the camera unprojects
//! them into a world-space ray, and the ray is tested against each pickable
//! mesh's axis-aligned bounds with the slab method in mesh-local space.
//! Hits come back nearest-first; an empty or unloaded scene simply yields
//! no hits.

/// Hover state machine and the system applying its colour effects.
pub mod hover;

/// Click-to-focus system starting camera flights from pick results.
pub mod focus;

/// Ray construction and slab-method intersection against pickable bounds.
pub mod picking;

/// Cursor-to-NDC mapping.
pub mod pointer;

use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
use focus::focus_click_system;
use hover::{HoverState, pointer_hover_system};

// Registers the pointer interaction resources and systems.
pub struct PointerInteractionPlugin;

impl Plugin for PointerInteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HoverState>().add_systems(
            Update,
            (pointer_hover_system, focus_click_system).run_if(in_state(AppState::Running)),
        );
    }
}
