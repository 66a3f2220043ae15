use bevy::asset::LoadState;
use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;

use crate::engine::loading::config_loader::ActiveSceneConfig;
use crate::engine::loading::progress::LoadingProgress;

/// Marker for mesh entities the pointer systems may pick.
#[derive(Component)]
pub struct Pickable;

/// glTF node name carried alongside the marker, used by the hover filter.
#[derive(Component)]
pub struct PickableName(pub String);

/// Root entity of the spawned model scene.
#[derive(Component)]
pub struct ModelRoot;

#[derive(Resource, Default)]
pub struct ModelLoader {
    handle: Option<Handle<Scene>>,
    spawned: bool,
    failed: bool,
}

// Start the one-shot model load. There is no retry and no cancellation;
// failure leaves the viewer running with an empty scene.
pub fn start_model_load(
    mut loader: ResMut<ModelLoader>,
    asset_server: Res<AssetServer>,
    config: Res<ActiveSceneConfig>,
) {
    let path = config.0.model_path.clone();
    println!("Loading model {}", path);
    loader.handle = Some(asset_server.load(GltfAssetLabel::Scene(0).from_asset(path)));
}

// Poll the glTF handle and spawn the scene exactly once when it settles
pub fn poll_model(
    mut loader: ResMut<ModelLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    if loader.spawned || loader.failed {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    match asset_server.get_load_state(&handle) {
        Some(LoadState::Loaded) => {
            println!("✓ Model loaded successfully");
            commands.spawn((SceneRoot(handle), ModelRoot));
            loader.spawned = true;
            loading_progress.model_spawned = true;
        }
        Some(LoadState::Failed(err)) => {
            error!("Model load failed: {}", err);
            loader.failed = true;
            loading_progress.model_failed = true;
        }
        _ => {}
    }
}

// Tag freshly instantiated meshes as pickable. Each mesh also gets its own
// material instance so that recolouring one object never bleeds into
// siblings sharing a glTF material.
pub fn tag_pickable_meshes(
    mut commands: Commands,
    q_new: Query<
        (Entity, Option<&Name>, &MeshMaterial3d<StandardMaterial>),
        (With<Mesh3d>, Without<Pickable>),
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, name, material) in &q_new {
        // Material asset may still be in flight; retry next frame.
        let Some(unique) = materials.get(&material.0).cloned() else {
            continue;
        };
        let handle = materials.add(unique);
        let name = name.map(|n| n.as_str().to_string()).unwrap_or_else(|| "unnamed".to_string());
        commands
            .entity(entity)
            .insert((Pickable, PickableName(name), MeshMaterial3d(handle)));
    }
}
