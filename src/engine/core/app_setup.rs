use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::engine::camera::fly_to::{ActiveTween, begin_fly_in, step_camera_tween};
use crate::engine::core::app_state::{
    AppState, transition_to_loading_model, transition_to_running,
};
use crate::engine::core::window_config::create_default_plugins;
use crate::engine::loading::config_loader::{ConfigLoader, SceneConfig, poll_config, start_config_load};
use crate::engine::loading::model_loader::{
    ModelLoader, poll_model, start_model_load, tag_pickable_meshes,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::setup::spawn_scene;
// Crate tools modules
use crate::tools::pointer_interaction::PointerInteractionPlugin;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        // Registers SceneConfig as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<SceneConfig>::new(&["json"]))
        .add_plugins(PointerInteractionPlugin)
        .init_state::<AppState>();

    // Initialise resources early
    app.init_resource::<LoadingProgress>()
        .init_resource::<ConfigLoader>()
        .init_resource::<ModelLoader>()
        .init_resource::<ActiveTween>();

    app.add_systems(Startup, start_config_load)
        .add_systems(
            Update,
            (poll_config, transition_to_loading_model).run_if(in_state(AppState::LoadingConfig)),
        )
        .add_systems(OnEnter(AppState::LoadingModel), (spawn_scene, start_model_load))
        .add_systems(
            Update,
            (poll_model, transition_to_running).run_if(in_state(AppState::LoadingModel)),
        )
        .add_systems(
            Update,
            (tag_pickable_meshes, begin_fly_in, step_camera_tween)
                .run_if(in_state(AppState::Running)),
        );

    app
}
