use crate::engine::core::app_setup::create_app;

mod engine;
mod tools;

/// Scene configuration is loaded from this path under the asset root.
/// When the file is missing or malformed the viewer falls back to
/// `SceneConfig::default()` and keeps running.
pub const SCENE_CONFIG_PATH: &'static str = "scenes/viewer.json";

fn main() {
    create_app().run();
}
