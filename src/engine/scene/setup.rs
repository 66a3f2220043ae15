use bevy::prelude::*;

use crate::engine::loading::config_loader::{ActiveSceneConfig, LightKind};

/// Marker for the single viewer camera.
#[derive(Component)]
pub struct ViewerCamera;

// Spawn the camera, the light, and the clear colour from the resolved
// configuration. One-time declarative setup; everything dynamic lives in
// the pointer interaction and fly-to systems.
pub fn spawn_scene(mut commands: Commands, config: Res<ActiveSceneConfig>) {
    let config = &config.0;

    commands.insert_resource(ClearColor(Color::srgb(
        config.background[0],
        config.background[1],
        config.background[2],
    )));

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.camera.fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_translation(Vec3::from(config.camera.position))
            .looking_at(Vec3::from(config.camera.look_at), Vec3::Y),
        ViewerCamera,
    ));

    let light_color = Color::srgb(
        config.light.color[0],
        config.light.color[1],
        config.light.color[2],
    );
    let light_transform = Transform::from_translation(Vec3::from(config.light.position));
    match config.light.kind {
        LightKind::Point => {
            commands.spawn((
                PointLight {
                    color: light_color,
                    intensity: config.light.intensity,
                    range: 1000.0,
                    shadows_enabled: config.light.shadows,
                    ..default()
                },
                light_transform,
            ));
        }
        LightKind::Directional => {
            commands.spawn((
                DirectionalLight {
                    color: light_color,
                    illuminance: config.light.intensity,
                    shadows_enabled: config.light.shadows,
                    ..default()
                },
                light_transform.looking_at(Vec3::ZERO, Vec3::Y),
            ));
        }
    }
}
