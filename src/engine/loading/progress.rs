use bevy::prelude::*;

/// One-shot milestones of the loading sequence. Each flag is set exactly
/// once; the state transition systems read them to advance `AppState`.
#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub config_resolved: bool,
    pub model_spawned: bool,
    pub model_failed: bool,
    pub fly_in_started: bool,
}
