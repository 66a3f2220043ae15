use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    /// Waiting for the scene configuration JSON.
    #[default]
    LoadingConfig,
    /// Configuration resolved, waiting for the glTF model.
    LoadingModel,
    /// Interactive. Reached even when the model failed to load; pointer
    /// systems then run against an empty pickable set.
    Running,
}

// Transition to LoadingModel once the configuration is resolved
pub fn transition_to_loading_model(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.config_resolved {
        println!("→ Transitioning to LoadingModel state");
        next_state.set(AppState::LoadingModel);
    }
}

// Final transition to the interactive state, taken on load success and on
// load failure alike
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.model_spawned || loading_progress.model_failed {
        println!("→ Transitioning to Running state");
        next_state.set(AppState::Running);
    }
}
