use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use bevy::window::PrimaryWindow;

use super::picking::{pick_ray, ray_pick};
use super::pointer::PointerSample;
use crate::engine::camera::fly_to::{ActiveTween, CameraTween};
use crate::engine::loading::config_loader::{ActiveSceneConfig, FocusConfig};
use crate::engine::loading::model_loader::{Pickable, PickableName};

/// Build the camera flight for a click, or `None` when the click hit
/// nothing. The flight starts at the camera's current position; with
/// `lock_depth` the scene animates only X/Y and the end point keeps the
/// camera's Z.
pub fn focus_tween(
    hit_translation: Option<Vec3>,
    camera_position: Vec3,
    config: &FocusConfig,
) -> Option<CameraTween> {
    let mut end = hit_translation?;
    if config.lock_depth {
        end.z = camera_position.z;
    }
    Some(CameraTween::new(
        camera_position,
        end,
        config.duration_secs,
        config.easing,
    ))
}

// Fly the camera toward the clicked mesh. A click that hits nothing changes
// nothing; a click during an in-flight tween replaces it, starting from the
// camera's current position.
pub fn focus_click_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform, &Transform), With<Camera3d>>,
    q_pickable: Query<(Entity, &GlobalTransform, &Aabb, &PickableName), With<Pickable>>,
    mut active: ResMut<ActiveTween>,
    config: Res<ActiveSceneConfig>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform, transform)) = cameras.single() else {
        return;
    };

    let viewport = Vec2::new(window.width(), window.height());
    let sample = PointerSample::from_cursor(cursor_pos, viewport);
    let Some(ray) = pick_ray(sample, camera, camera_transform) else {
        return;
    };

    let hits = ray_pick(
        ray,
        q_pickable.iter().map(|(e, xf, aabb, _)| (e, *xf, *aabb)),
    );
    let target = hits.first().and_then(|hit| {
        let (_, hit_transform, _, name) = q_pickable.get(hit.entity).ok()?;
        info!("Focusing {}", name.0);
        Some(hit_transform.translation())
    });

    let Some(tween) = focus_tween(target, transform.translation, &config.0.focus) else {
        return;
    };
    active.start(tween);
}
