pub mod config_loader;
pub mod model_loader;
pub mod progress;
