use bevy::asset::LoadState;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::SCENE_CONFIG_PATH;
use crate::engine::camera::fly_to::Easing;
use crate::engine::loading::progress::LoadingProgress;

/// Complete per-scene configuration as a Bevy asset. Mirrors the JSON
/// structure exactly; every field has a default so a partial file works.
#[derive(Asset, Debug, Clone, Serialize, Deserialize, TypePath)]
#[serde(default)]
pub struct SceneConfig {
    /// Model asset path relative to the asset root.
    pub model_path: String,
    /// Linear RGB clear colour behind the scene.
    pub background: [f32; 3],
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub hover: HoverConfig,
    pub fly_in: FlyInConfig,
    pub focus: FocusConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            model_path: "models/scene.gltf".to_string(),
            background: [1.0, 1.0, 1.0],
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            hover: HoverConfig::default(),
            fly_in: FlyInConfig::default(),
            focus: FocusConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 25.0],
            look_at: [0.0, 0.0, 0.0],
            fov_degrees: 75.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    Point,
    Directional,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub kind: LightKind,
    pub color: [f32; 3],
    /// Point lights read this as luminous intensity, directional lights as
    /// illuminance.
    pub intensity: f32,
    pub position: [f32; 3],
    pub shadows: bool,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            kind: LightKind::Point,
            color: [1.0, 1.0, 1.0],
            intensity: 100_000.0,
            position: [0.0, 5.0, 10.0],
            shadows: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub highlight: [f32; 3],
    /// Case-insensitive substring filter on node names. Objects failing the
    /// filter are still tracked as hovered but never recoloured.
    pub name_filter: Option<String>,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            highlight: [1.0, 0.0, 0.0],
            name_filter: None,
        }
    }
}

impl HoverConfig {
    pub fn passes_filter(&self, name: &str) -> bool {
        match &self.name_filter {
            Some(filter) => name.to_lowercase().contains(&filter.to_lowercase()),
            None => true,
        }
    }

    pub fn highlight_color(&self) -> Color {
        Color::srgb(self.highlight[0], self.highlight[1], self.highlight[2])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlyInConfig {
    /// Fly-in destination. `None` targets the loaded model's bounding-box
    /// centre instead.
    pub target: Option<[f32; 3]>,
    pub duration_secs: f32,
    pub easing: Easing,
}

impl Default for FlyInConfig {
    fn default() -> Self {
        Self {
            target: None,
            duration_secs: 2.0,
            easing: Easing::QuadraticOut,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    pub duration_secs: f32,
    pub easing: Easing,
    /// Animate only X/Y on click, holding the camera's depth fixed.
    pub lock_depth: bool,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            duration_secs: 2.0,
            easing: Easing::QuadraticOut,
            lock_depth: true,
        }
    }
}

/// Resolved configuration for the running scene.
#[derive(Resource, Clone)]
pub struct ActiveSceneConfig(pub SceneConfig);

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<SceneConfig>>,
}

// Start the loading process
pub fn start_config_load(mut loader: ResMut<ConfigLoader>, asset_server: Res<AssetServer>) {
    loader.handle = Some(asset_server.load(SCENE_CONFIG_PATH));
}

// Resolve the configuration once its asset settles, falling back to the
// defaults when the file is missing or malformed
pub fn poll_config(
    mut loading_progress: ResMut<LoadingProgress>,
    loader: Res<ConfigLoader>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<SceneConfig>>,
    mut commands: Commands,
) {
    if loading_progress.config_resolved {
        return;
    }
    let Some(ref handle) = loader.handle else {
        return;
    };

    match asset_server.get_load_state(handle) {
        Some(LoadState::Loaded) => {
            let Some(config) = configs.get(handle) else {
                return;
            };
            println!("✓ Scene configuration loaded from {}", SCENE_CONFIG_PATH);
            commands.insert_resource(ActiveSceneConfig(config.clone()));
            loading_progress.config_resolved = true;
        }
        Some(LoadState::Failed(err)) => {
            warn!(
                "Scene configuration {} unavailable ({}), using defaults",
                SCENE_CONFIG_PATH, err
            );
            commands.insert_resource(ActiveSceneConfig(SceneConfig::default()));
            loading_progress.config_resolved = true;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_scene() {
        let config = SceneConfig::default();
        assert_eq!(config.camera.position, [0.0, 0.0, 25.0]);
        // No configured fly-in target: the flight aims at the model's
        // bounding-box centre instead.
        assert_eq!(config.fly_in.target, None);
        assert!(config.focus.lock_depth);
        assert!(config.hover.name_filter.is_none());
    }

    #[test]
    fn explicit_fly_in_target_overrides_bounds_center() {
        let config: SceneConfig =
            serde_json::from_str(r#"{ "fly_in": { "target": [0.0, 0.0, 15.0] } }"#).unwrap();
        assert_eq!(config.fly_in.target, Some([0.0, 0.0, 15.0]));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SceneConfig = serde_json::from_str(
            r#"{ "model_path": "models/city.glb", "hover": { "name_filter": "building" } }"#,
        )
        .unwrap();
        assert_eq!(config.model_path, "models/city.glb");
        assert_eq!(config.hover.name_filter.as_deref(), Some("building"));
        assert_eq!(config.hover.highlight, [1.0, 0.0, 0.0]);
        assert_eq!(config.focus.duration_secs, 2.0);
    }

    #[test]
    fn config_round_trips_through_json() {
        let mut config = SceneConfig::default();
        config.light.kind = LightKind::Directional;
        config.fly_in.target = Some([0.0, 0.0, 15.0]);
        config.focus.easing = Easing::QuadraticInOut;

        let text = serde_json::to_string(&config).unwrap();
        let back: SceneConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back.light.kind, LightKind::Directional);
        assert_eq!(back.fly_in.target, Some([0.0, 0.0, 15.0]));
        assert_eq!(back.focus.easing, Easing::QuadraticInOut);
    }

    #[test]
    fn name_filter_is_case_insensitive() {
        let hover = HoverConfig {
            name_filter: Some("building".to_string()),
            ..HoverConfig::default()
        };
        assert!(hover.passes_filter("Building_07"));
        assert!(hover.passes_filter("OLD_BUILDING"));
        assert!(!hover.passes_filter("terrain"));

        let unfiltered = HoverConfig::default();
        assert!(unfiltered.passes_filter("anything"));
    }
}
