use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use serde::{Deserialize, Serialize};

use crate::engine::loading::config_loader::ActiveSceneConfig;
use crate::engine::loading::model_loader::Pickable;
use crate::engine::loading::progress::LoadingProgress;

/// Monotonic easing curves with `e(0) = 0` and `e(1) = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    QuadraticOut,
    QuadraticInOut,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Easing::QuadraticOut => t * (2.0 - t),
            Easing::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// One camera flight: eased interpolation from `start` to `end` over
/// `duration` seconds of elapsed frame time.
#[derive(Debug, Clone)]
pub struct CameraTween {
    start: Vec3,
    end: Vec3,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl CameraTween {
    pub fn new(start: Vec3, end: Vec3, duration: f32, easing: Easing) -> Self {
        Self {
            start,
            end,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn end(&self) -> Vec3 {
        self.end
    }

    /// Position at a given elapsed time. Exact at both boundaries: zero
    /// elapsed yields `start`, anything at or past `duration` yields `end`.
    /// A non-positive duration snaps to `end` immediately.
    pub fn sample(&self, elapsed: f32) -> Vec3 {
        if self.duration <= 0.0 || elapsed >= self.duration {
            return self.end;
        }
        let t = (elapsed / self.duration).clamp(0.0, 1.0);
        self.start.lerp(self.end, self.easing.sample(t))
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn position(&self) -> Vec3 {
        self.sample(self.elapsed)
    }

    pub fn finished(&self) -> bool {
        self.duration <= 0.0 || self.elapsed >= self.duration
    }
}

/// The single in-flight camera tween. Starting a new flight replaces the
/// old one, so the camera never has competing writers.
#[derive(Resource, Default)]
pub struct ActiveTween(Option<CameraTween>);

impl ActiveTween {
    pub fn start(&mut self, tween: CameraTween) {
        self.0 = Some(tween);
    }

    pub fn current(&self) -> Option<&CameraTween> {
        self.0.as_ref()
    }
}

// Step the in-flight tween and write the eased position into the camera
pub fn step_camera_tween(
    time: Res<Time>,
    mut active: ResMut<ActiveTween>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    let Some(tween) = active.0.as_mut() else {
        return;
    };
    let Ok(mut camera_transform) = cameras.single_mut() else {
        return;
    };

    tween.advance(time.delta_secs());
    camera_transform.translation = tween.position();

    if tween.finished() {
        active.0 = None;
    }
}

// Start the initial fly-in once the model scene has produced pickable
// meshes. The destination is either the configured point or the model's
// bounding-box centre, computed once here.
pub fn begin_fly_in(
    mut loading_progress: ResMut<LoadingProgress>,
    config: Res<ActiveSceneConfig>,
    q_pickable: Query<(&GlobalTransform, &Aabb), With<Pickable>>,
    cameras: Query<&Transform, With<Camera3d>>,
    mut active: ResMut<ActiveTween>,
) {
    if loading_progress.fly_in_started || !loading_progress.model_spawned {
        return;
    }
    // Scene instantiation is asynchronous; wait until meshes exist.
    if q_pickable.is_empty() {
        return;
    }
    let Ok(camera_transform) = cameras.single() else {
        return;
    };

    let target = match config.0.fly_in.target {
        Some(point) => Vec3::from(point),
        None => bounds_center(q_pickable.iter()),
    };

    info!("Starting fly-in toward {}", target);
    active.start(CameraTween::new(
        camera_transform.translation,
        target,
        config.0.fly_in.duration_secs,
        config.0.fly_in.easing,
    ));
    loading_progress.fly_in_started = true;
}

/// World-space centre of the combined bounding boxes.
fn bounds_center<'a>(boxes: impl Iterator<Item = (&'a GlobalTransform, &'a Aabb)>) -> Vec3 {
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for (transform, aabb) in boxes {
        let center = transform.transform_point(Vec3::from(aabb.center));
        let extents = Vec3::from(aabb.half_extents);
        min = min.min(center - extents);
        max = max.max(center + extents);
    }
    if min.x > max.x {
        return Vec3::ZERO;
    }
    (min + max) * 0.5
}
